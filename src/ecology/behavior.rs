//! Creature behavior policies
//!
//! Each archetype is a small decision table over distance to the player and
//! one uniform roll. Evaluation is pure; `run_behavior_pass` applies the
//! resulting actions to the creature map and reports the damage dealt.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::creature::{creature_count, creatures_at, move_creature, Creature, CreatureMap};
use super::species::{Archetype, SpeciesDescriptor, SpeciesId};
use crate::core::config::SimConfig;
use crate::core::error::BehaviorFault;
use crate::core::guard::finite_or;
use crate::core::types::{CreatureId, Tick};
use crate::world::hex::HexCoord;
use crate::world::map::HexMap;

/// Upper bound on damage from a single creature attack
pub const MAX_BEHAVIOR_DAMAGE: f32 = 40.0;
/// Aggression bonus per extra packmate
pub const PACK_AGGRESSION_BONUS: f32 = 0.25;

/// What a creature does this tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Attack { damage: f32, message: String },
    Move { target: HexCoord, message: String },
    Display { message: String },
    Wait,
}

/// Payload-free tag of an `Action`, used in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Attack,
    Move,
    Display,
    Wait,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Attack { .. } => ActionKind::Attack,
            Self::Move { .. } => ActionKind::Move,
            Self::Display { .. } => ActionKind::Display,
            Self::Wait => ActionKind::Wait,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Attack { message, .. }
            | Self::Move { message, .. }
            | Self::Display { message } => Some(message),
            Self::Wait => None,
        }
    }
}

/// One creature's resolved action, as recorded in the behavior log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorEntry {
    pub tick: Tick,
    pub coord: HexCoord,
    pub creature: CreatureId,
    pub species: SpeciesId,
    pub action: ActionKind,
    pub message: Option<String>,
}

/// Outcome of one behavior pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BehaviorReport {
    /// Creatures whose trigger roll succeeded
    pub attempted: usize,
    /// Of those, how many produced an action without a fault
    pub resolved: usize,
    pub faults: Vec<BehaviorFault>,
    /// Total attack damage aimed at the player
    pub damage: f32,
    pub entries: Vec<BehaviorEntry>,
}

/// Everything a policy may look at
pub struct BehaviorContext<'a> {
    pub creature: &'a Creature,
    pub species: &'static SpeciesDescriptor,
    pub position: HexCoord,
    pub player: HexCoord,
    pub hexes: &'a HexMap,
    pub creatures: &'a CreatureMap,
    pub max_per_hex: usize,
}

impl BehaviorContext<'_> {
    fn distance(&self) -> i32 {
        self.position.distance(&self.player)
    }

    /// Self plus same-species creatures in this hex and ring 1
    pub fn pack_size(&self) -> usize {
        self.position
            .hexes_in_range(1)
            .iter()
            .flat_map(|c| creatures_at(self.creatures, c))
            .filter(|c| c.species == self.creature.species)
            .count()
            .max(1)
    }

    /// Aggression scaled by pack size for pack-minded archetypes
    fn aggression(&self) -> f32 {
        let base = self.species.aggression;
        if self.species.archetype.uses_pack() {
            let extra = self.pack_size().saturating_sub(1) as f32;
            (base * (1.0 + PACK_AGGRESSION_BONUS * extra)).min(1.0)
        } else {
            base
        }
    }

    fn can_enter(&self, coord: &HexCoord) -> bool {
        self.hexes.get(coord).is_some_and(|cell| {
            let info = cell.terrain.info();
            info.passable && info.hazard.is_none()
        }) && creature_count(self.creatures, coord) < self.max_per_hex
    }

    fn open_neighbors(&self) -> Vec<HexCoord> {
        self.position
            .neighbors()
            .into_iter()
            .filter(|n| self.can_enter(n))
            .collect()
    }

    fn toward_player(&self) -> Option<HexCoord> {
        self.open_neighbors()
            .into_iter()
            .min_by_key(|n| n.distance(&self.player))
            .filter(|n| n.distance(&self.player) < self.distance())
    }

    fn away_from_player(&self) -> Option<HexCoord> {
        let current = self.distance();
        let mut best: Option<HexCoord> = None;
        for n in self.open_neighbors() {
            let d = n.distance(&self.player);
            if d > current && best.map_or(true, |b| d > b.distance(&self.player)) {
                best = Some(n);
            }
        }
        best
    }

    fn toward_preferred(&self) -> Option<HexCoord> {
        self.open_neighbors().into_iter().find(|n| {
            self.hexes
                .get(n)
                .is_some_and(|cell| self.species.preferred.contains(&cell.terrain.category()))
        })
    }

    fn attack(&self, modifier: f32, verb: &str) -> Action {
        let raw = self.species.danger * self.creature.size * modifier;
        let damage = finite_or(raw, 0.0, "behavior damage").clamp(0.0, MAX_BEHAVIOR_DAMAGE);
        Action::Attack {
            damage,
            message: format!("The {} {}!", self.species.name, verb),
        }
    }

    fn step(&self, target: Option<HexCoord>, verb: &str) -> Action {
        match target {
            Some(target) => Action::Move {
                target,
                message: format!("The {} {}.", self.species.name, verb),
            },
            None => Action::Wait,
        }
    }

    fn display(&self, text: &str) -> Action {
        Action::Display {
            message: format!("The {} {}.", self.species.name, text),
        }
    }
}

/// Decide one creature's action from its archetype policy.
///
/// `roll` is a uniform draw in `[0, 1)`.
pub fn evaluate(ctx: &BehaviorContext<'_>, roll: f32) -> Result<Action, BehaviorFault> {
    if !ctx.hexes.contains_key(&ctx.position) {
        return Err(BehaviorFault::MissingHex {
            id: ctx.creature.id,
            coord: ctx.position,
        });
    }
    if !ctx.creature.size.is_finite() || ctx.creature.size <= 0.0 {
        return Err(BehaviorFault::InvalidSize {
            id: ctx.creature.id,
            size: ctx.creature.size,
        });
    }

    let d = ctx.distance();
    let aggression = ctx.aggression();
    let action = match ctx.species.archetype {
        Archetype::Passive => {
            if d <= 1 && roll < 0.5 {
                ctx.step(ctx.away_from_player(), "drifts away")
            } else if roll < 0.2 {
                ctx.display("ignores you")
            } else {
                Action::Wait
            }
        }
        Archetype::Skittish => {
            if d <= 2 {
                if roll < 0.8 {
                    ctx.step(ctx.away_from_player(), "bolts")
                } else {
                    ctx.display("freezes")
                }
            } else if roll < 0.3 {
                ctx.step(ctx.toward_preferred(), "scurries off")
            } else {
                Action::Wait
            }
        }
        Archetype::Defensive => {
            if d <= 1 && roll < 0.4 {
                ctx.attack(0.5, "lashes its clubbed tail")
            } else if d <= 2 {
                ctx.display("braces behind its armor")
            } else {
                Action::Wait
            }
        }
        Archetype::PackPredator => {
            if d <= 1 && roll < aggression {
                ctx.attack(0.8, "darts in to bite")
            } else if d <= 3 && roll < aggression {
                ctx.step(ctx.toward_player(), "pack closes in")
            } else if roll < 0.3 {
                ctx.display("chirps to its packmates")
            } else {
                Action::Wait
            }
        }
        Archetype::Territorial => {
            if d <= 1 {
                if roll < aggression {
                    ctx.attack(0.7, "defends its ground")
                } else {
                    ctx.display("bristles")
                }
            } else if d <= 2 && roll < aggression {
                ctx.display("warns you off")
            } else if roll < 0.2 {
                ctx.step(ctx.toward_preferred(), "patrols its patch")
            } else {
                Action::Wait
            }
        }
        Archetype::Herbivore => {
            if d <= 1 && roll < 0.6 {
                ctx.step(ctx.away_from_player(), "moves off")
            } else if roll < 0.3 {
                ctx.step(ctx.toward_preferred(), "grazes onward")
            } else {
                Action::Wait
            }
        }
        Archetype::DangerousHerbivore => {
            if d <= 1 && roll < aggression {
                ctx.attack(1.0, "swings its spiked tail")
            } else if d <= 1 {
                ctx.display("rumbles a warning")
            } else if roll < 0.3 {
                ctx.step(ctx.toward_preferred(), "grazes onward")
            } else {
                Action::Wait
            }
        }
        Archetype::GiantHerbivore => {
            if d == 0 && roll < aggression {
                ctx.attack(0.4, "tramples past")
            } else if roll < 0.3 {
                ctx.step(ctx.toward_preferred(), "lumbers on")
            } else if roll < 0.5 {
                ctx.display("shakes the ground")
            } else {
                Action::Wait
            }
        }
        Archetype::AerialPredator => {
            if d <= 1 && roll < aggression {
                ctx.attack(0.8, "swoops")
            } else if d <= 4 && roll < 0.5 {
                ctx.step(ctx.toward_player(), "circles overhead")
            } else {
                Action::Wait
            }
        }
        Archetype::AmbushPredator => {
            if d <= 1 && roll < (aggression + 0.2).min(1.0) {
                ctx.attack(1.2, "bursts from hiding")
            } else {
                Action::Wait
            }
        }
        Archetype::RivalPredator => {
            if d <= 1 && roll < aggression {
                ctx.attack(1.0, "contests your kill")
            } else if d <= 3 && roll < 0.5 {
                ctx.display("sizes you up")
            } else if roll < aggression * 0.5 {
                ctx.step(ctx.toward_player(), "follows your scent")
            } else {
                Action::Wait
            }
        }
        Archetype::ApexPredator => {
            if d <= 1 && roll < aggression {
                ctx.attack(1.5, "charges")
            } else if d <= 4 && roll < aggression {
                ctx.step(ctx.toward_player(), "stalks you")
            } else {
                Action::Wait
            }
        }
    };
    Ok(action)
}

/// Run one behavior tick for creatures within `behavior_radius` of `anchor`.
///
/// Creatures that already acted at `tick` are skipped. A fault is logged and
/// counted, and the creature is treated as having waited.
pub fn run_behavior_pass(
    anchor: HexCoord,
    hexes: &HexMap,
    creatures: &mut CreatureMap,
    tick: Tick,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> BehaviorReport {
    let candidates: Vec<(HexCoord, CreatureId)> = creatures
        .iter()
        .filter(|(coord, _)| coord.distance(&anchor) <= config.behavior_radius)
        .flat_map(|(coord, list)| list.iter().map(move |c| (*coord, c.id)))
        .collect();

    let mut report = BehaviorReport::default();
    for (coord, id) in candidates {
        let Some(creature) = creatures_at(creatures, &coord).iter().find(|c| c.id == id) else {
            continue;
        };
        if creature.last_acted == Some(tick) {
            continue;
        }
        if rng.gen::<f32>() >= config.behavior_trigger_chance {
            continue;
        }
        report.attempted += 1;

        let roll = rng.gen::<f32>();
        let result = {
            let ctx = BehaviorContext {
                creature,
                species: creature.species.descriptor(),
                position: coord,
                player: anchor,
                hexes,
                creatures: &*creatures,
                max_per_hex: config.max_creatures_per_hex,
            };
            evaluate(&ctx, roll)
        };
        let species = creature.species;

        let action = match result {
            Ok(action) => {
                report.resolved += 1;
                action
            }
            Err(fault) => {
                tracing::warn!("behavior fault: {}", fault);
                report.faults.push(fault);
                Action::Wait
            }
        };

        let mut position = coord;
        match &action {
            Action::Attack { damage, .. } => report.damage += damage,
            Action::Move { target, .. } => {
                if move_creature(creatures, &coord, id, *target) {
                    position = *target;
                }
            }
            Action::Display { .. } | Action::Wait => {}
        }
        if let Some(acted) = creatures
            .get_mut(&position)
            .and_then(|list| list.iter_mut().find(|c| c.id == id))
        {
            acted.last_acted = Some(tick);
        }

        report.entries.push(BehaviorEntry {
            tick,
            coord,
            creature: id,
            species,
            action: action.kind(),
            message: action.message().map(str::to_string),
        });
    }

    tracing::debug!(
        "behavior pass at tick {}: {} attempted, {} resolved, {:.1} damage",
        tick,
        report.attempted,
        report.resolved,
        report.damage
    );
    report
}
