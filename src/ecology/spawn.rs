//! Creature spawning
//!
//! One Bernoulli trial per habitat species, scaled by how the species suits
//! a player of the current size. Trials stop at the hex cap or the attempt
//! limit, whichever comes first.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::creature::{add_creature, creature_count, Creature, CreatureMap};
use super::habitat::Habitat;
use super::species::SpeciesId;
use crate::core::config::SimConfig;
use crate::core::guard::{probability, safe_ratio};
use crate::core::types::{CreatureId, Tick};
use crate::world::hex::HexCoord;
use crate::world::terrain::TerrainId;

/// Small prey spawn more often while the player is at or below this level
pub const SMALL_PREY_MAX_LEVEL: u8 = 3;
pub const SMALL_PREY_BOOST: f32 = 1.5;
/// Species this many times heavier than the player are dampened
pub const LARGE_CREATURE_RATIO: f32 = 50.0;
pub const LARGE_CREATURE_DAMPING: f32 = 0.4;
/// Apex and rival predators reach full odds at this level
pub const APEX_FULL_LEVEL: u8 = 5;

/// The player attributes spawning depends on
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext {
    pub level: u8,
    pub player_weight: f32,
    pub tick: Tick,
}

/// Multiplier applied to a species' base habitat weight
pub fn encounter_multiplier(species: SpeciesId, level: u8, player_weight: f32) -> f32 {
    let descriptor = species.descriptor();
    let mut multiplier = 1.0;

    if species.is_small_prey() && level <= SMALL_PREY_MAX_LEVEL {
        multiplier *= SMALL_PREY_BOOST;
    }

    let ratio = safe_ratio(descriptor.weight, player_weight, 1.0, "spawn weight ratio");
    if ratio > LARGE_CREATURE_RATIO {
        multiplier *= LARGE_CREATURE_DAMPING;
    }

    if descriptor.archetype.is_apex() && level < APEX_FULL_LEVEL {
        multiplier *= level as f32 / APEX_FULL_LEVEL as f32;
    }

    multiplier
}

/// Populate `coord` from its habitat table. Returns the ids spawned.
///
/// Impassable and hazard terrain never receives creatures.
pub fn spawn_into_hex(
    coord: HexCoord,
    terrain: TerrainId,
    creatures: &mut CreatureMap,
    ctx: SpawnContext,
    next_id: &mut u64,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<CreatureId> {
    let info = terrain.info();
    if !info.passable || info.hazard.is_some() {
        return Vec::new();
    }

    let mut spawned = Vec::new();
    let mut attempts = 0;
    for &(species, base_weight) in Habitat::for_terrain(terrain).species_table() {
        if attempts >= config.max_spawn_attempts
            || creature_count(creatures, &coord) >= config.max_creatures_per_hex
        {
            break;
        }
        attempts += 1;

        let p = probability(
            base_weight * encounter_multiplier(species, ctx.level, ctx.player_weight),
            "spawn probability",
        );
        if rng.gen::<f32>() >= p {
            continue;
        }

        let min_age = species.descriptor().min_age;
        let size = if min_age < 1.0 {
            rng.gen_range(min_age..=1.0)
        } else {
            1.0
        };
        let id = CreatureId(*next_id);
        *next_id += 1;
        add_creature(creatures, coord, Creature::new(id, species, size, ctx.tick));
        spawned.push(id);
        tracing::debug!(
            "spawned {} ({:.2}) at ({}, {})",
            species.name(),
            size,
            coord.q,
            coord.r
        );
    }
    spawned
}
