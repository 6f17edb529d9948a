//! The state-transition reducer
//!
//! `transition` never mutates its input. It works on a clone (cheap: the big
//! maps are shared until written) and either returns the new state or
//! rejects the intent with a `SimError`, in which case the clone is dropped.

use std::sync::Arc;

use rand::Rng;

use super::intent::Intent;
use super::log::NotificationKind;
use super::world_state::{BehaviorStats, WorldState};
use crate::combat::resolution::{resolve_attack, CombatOutcome, CombatRolls};
use crate::core::config::SimConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{CreatureId, DeathCause, NotificationId};
use crate::ecology::behavior::{run_behavior_pass, ActionKind};
use crate::ecology::creature::{creatures_at, find_creature, remove_creature};
use crate::ecology::spawn::{spawn_into_hex, SpawnContext};
use crate::world::features::{plan_region_features, Region};
use crate::world::generation::{generate_around, generate_hexes};
use crate::world::hex::HexCoord;
use crate::world::visibility::update_visibility;

/// Apply `intent` to `state`, returning the successor state.
///
/// Once the run has ended every intent except `Restart` is rejected with
/// `SimError::GameOver`.
pub fn transition(state: &WorldState, intent: Intent) -> Result<WorldState> {
    if state.is_terminal() && !matches!(intent, Intent::Restart { .. }) {
        return Err(SimError::GameOver);
    }

    let mut next = state.clone();
    match intent {
        Intent::GenerateRegionFeatures { center } => plan_region(&mut next, center),
        Intent::GenerateHex { coord } => {
            generate(&mut next, &[coord]);
        }
        Intent::UpdateVisibility => refresh_visibility(&mut next),
        Intent::SpawnCreatures { coord } => {
            if !next.hexes.contains_key(&coord) {
                return Err(SimError::UnknownHex(coord));
            }
            spawn(&mut next, coord);
        }
        Intent::AttackCreature { coord, creature_id } => attack(&mut next, coord, creature_id)?,
        Intent::ProcessCreatureBehaviors => {
            next.tick += 1;
            behavior_pass(&mut next);
        }
        Intent::MovePlayer { target } => move_player(&mut next, target)?,
        Intent::SelectHex { coord } => match next.hexes.get(&coord) {
            None => return Err(SimError::UnknownHex(coord)),
            Some(cell) if !cell.discovered => return Err(SimError::UndiscoveredHex(coord)),
            Some(_) => next.selected = Some(coord),
        },
        Intent::HoverHex { coord } => next.hovered = Some(coord),
        Intent::ClearHover => next.hovered = None,
        Intent::DismissNotification { id } => dismiss(&mut next, id)?,
        Intent::AutoDismissNotifications => {
            let ttl = next.config.notification_ttl;
            let expired = next.notifications.expire(next.tick, ttl);
            if expired > 0 {
                tracing::debug!("auto-dismissed {} notifications", expired);
            }
        }
        Intent::Restart { seed } => {
            let seed = seed.unwrap_or_else(|| next.rng.gen());
            let config = SimConfig {
                seed,
                ..(*next.config).clone()
            };
            tracing::info!("restarting with seed {}", seed);
            next = WorldState::new(config)?;
        }
    }
    Ok(next)
}

fn plan_region(state: &mut WorldState, center: HexCoord) {
    let region = Region::new(center, state.config.region_radius);
    let planned = plan_region_features(region, &mut state.rng);
    Arc::make_mut(&mut state.features).add_region(region, planned);
}

/// Generate and settle any missing coordinates. Returns the new ones.
fn generate(state: &mut WorldState, coords: &[HexCoord]) -> Vec<HexCoord> {
    if coords.iter().all(|c| state.hexes.contains_key(c)) {
        return Vec::new();
    }
    generate_hexes(
        coords,
        Arc::make_mut(&mut state.hexes),
        &state.features,
        &state.config,
        &mut state.rng,
    )
}

fn refresh_visibility(state: &mut WorldState) {
    let radius = state.config.visibility_radius;
    update_visibility(
        Arc::make_mut(&mut state.hexes),
        &state.player.position,
        radius,
    );
}

fn spawn(state: &mut WorldState, coord: HexCoord) -> Vec<CreatureId> {
    let Some(terrain) = state.hexes.get(&coord).map(|cell| cell.terrain) else {
        return Vec::new();
    };
    let ctx = SpawnContext {
        level: state.player.level,
        player_weight: state.player.weight,
        tick: state.tick,
    };
    spawn_into_hex(
        coord,
        terrain,
        Arc::make_mut(&mut state.creatures),
        ctx,
        &mut state.next_creature_id,
        &state.config,
        &mut state.rng,
    )
}

fn die(state: &mut WorldState, cause: DeathCause, message: String) {
    tracing::info!(
        "player died ({}) after {} moves, score {:.1}",
        cause,
        state.player.moves,
        state.player.score
    );
    state.death = Some(cause);
    state
        .notifications
        .push(NotificationKind::Danger, message, state.tick);
}

fn level_up(state: &mut WorldState) {
    if let Some(level) = state.player.grow() {
        tracing::info!("player reached level {}", level);
        state.notifications.push(
            NotificationKind::Growth,
            format!("You have grown! Now level {}.", level),
            state.tick,
        );
    }
}

/// Run one behavior pass around the player and fold the damage in
fn behavior_pass(state: &mut WorldState) {
    let anchor = state.player.position;
    let tick = state.tick;
    let report = run_behavior_pass(
        anchor,
        &state.hexes,
        Arc::make_mut(&mut state.creatures),
        tick,
        &state.config,
        &mut state.rng,
    );

    state.last_behavior = BehaviorStats {
        attempted: report.attempted,
        resolved: report.resolved,
        faults: report.faults.len(),
        damage: report.damage,
    };
    for entry in &report.entries {
        if entry.action == ActionKind::Attack {
            if let Some(message) = &entry.message {
                state
                    .notifications
                    .push(NotificationKind::Danger, message.clone(), tick);
            }
        }
    }
    state.behavior_log.extend(report.entries);

    if report.damage > 0.0 {
        state.player.injure(report.damage);
        if state.player.fitness <= 0.0 {
            die(
                state,
                DeathCause::Combat,
                "You were killed by the creatures around you.".to_string(),
            );
        }
    }
}

fn attack(state: &mut WorldState, coord: HexCoord, id: CreatureId) -> Result<()> {
    let from = state.player.position;
    if from.distance(&coord) > 1 {
        return Err(SimError::NotAdjacent { from, to: coord });
    }
    let Some(creature) = find_creature(&state.creatures, &coord, id).cloned() else {
        return Err(SimError::CreatureNotFound { coord, id });
    };

    let pack_size = coord
        .hexes_in_range(1)
        .iter()
        .flat_map(|c| creatures_at(&state.creatures, c))
        .filter(|c| c.species == creature.species)
        .count();
    let rolls = CombatRolls::draw(&mut state.rng, state.config.combat_noise_band);
    let species = creature.species.descriptor();
    let result = resolve_attack(
        state.player.vitals(),
        species,
        creature.size,
        pack_size,
        &rolls,
    );

    remove_creature(Arc::make_mut(&mut state.creatures), &coord, id);
    state.player.apply_vitals(result.vitals);

    let (kind, message) = match result.outcome {
        CombatOutcome::Escaped => (
            NotificationKind::Info,
            format!("The {} escaped.", species.name),
        ),
        CombatOutcome::DrivenOff => (
            NotificationKind::Danger,
            format!("The {} fought you off! (-{:.0} fitness)", species.name, result.injury),
        ),
        CombatOutcome::Evaded => (
            NotificationKind::Warning,
            format!("The {} was too quick for you.", species.name),
        ),
        CombatOutcome::Killed { reward, .. } => (
            NotificationKind::Info,
            format!("You caught the {} (+{:.0} energy).", species.name, reward),
        ),
    };
    tracing::debug!("attack on {}: {:?}", species.name, result.outcome);
    state.notifications.push(kind, message, state.tick);

    level_up(state);
    if let Some(cause) = result.death.or_else(|| state.player.exhaustion()) {
        let message = format!("You died: {}.", cause);
        die(state, cause, message);
    }
    Ok(())
}

fn move_player(state: &mut WorldState, target: HexCoord) -> Result<()> {
    let from = state.player.position;
    if from.distance(&target) != 1 {
        return Err(SimError::NotAdjacent { from, to: target });
    }
    let Some(cell) = state.hexes.get(&target) else {
        return Err(SimError::UnknownHex(target));
    };
    let terrain = cell.terrain;
    let first_visit = !cell.visited;
    let info = terrain.info();
    if !info.passable {
        return Err(SimError::Impassable(target, terrain));
    }

    state.player.position = target;
    state.player.moves += 1;
    state.tick += 1;
    if let Some(cell) = Arc::make_mut(&mut state.hexes).get_mut(&target) {
        cell.visited = true;
    }

    if let Some(cause) = info.hazard {
        die(state, cause, format!("You {} in the {}.", cause, info.name));
        return Ok(());
    }
    if let Some(min_weight) = info.min_weight {
        if state.player.weight < min_weight {
            die(
                state,
                DeathCause::Drowned,
                format!("You drowned crossing the {}.", info.name),
            );
            return Ok(());
        }
    }

    let cost = state.player.move_energy_cost(terrain);
    state.player.spend_energy(cost);
    state.player.metabolize();
    let roll = state.rng.gen::<f32>();
    if state.player.take_terrain_risk(terrain, roll) > 0.0 {
        state.notifications.push(
            NotificationKind::Warning,
            format!("You were hurt crossing the {}.", info.name),
            state.tick,
        );
    }
    state.player.heal();
    level_up(state);

    if let Some(cause) = state.player.exhaustion() {
        let message = format!("You died: {}.", cause);
        die(state, cause, message);
        return Ok(());
    }

    if state
        .features
        .needs_region(&target, state.config.region_edge_margin)
    {
        plan_region(state, target);
    }

    let radius = state.config.generation_radius;
    let created = if target
        .hexes_in_range(radius)
        .iter()
        .all(|c| state.hexes.contains_key(c))
    {
        Vec::new()
    } else {
        generate_around(
            target,
            radius,
            Arc::make_mut(&mut state.hexes),
            &state.features,
            &state.config,
            &mut state.rng,
        )
    };
    refresh_visibility(state);

    if first_visit {
        spawn(state, target);
    }
    for coord in created {
        spawn(state, coord);
    }

    behavior_pass(state);
    Ok(())
}

fn dismiss(state: &mut WorldState, id: NotificationId) -> Result<()> {
    if state.notifications.dismiss(id) {
        Ok(())
    } else {
        Err(SimError::NotificationNotFound(id))
    }
}
