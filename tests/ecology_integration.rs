//! Ecology integration tests
//!
//! Spawning and behavior passes over a generated world: caps, terrain
//! restrictions, id uniqueness and the shape of the creature map.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use primeval::core::types::CreatureId;
use primeval::ecology::creature::{add_creature, creature_count, population};
use primeval::ecology::{
    run_behavior_pass, spawn_into_hex, Creature, CreatureMap, Habitat, SpawnContext, SpeciesId,
};
use primeval::world::{HexCell, HexCoord, HexMap, TerrainId};
use primeval::{SimConfig, WorldState};

fn hatchling_ctx() -> SpawnContext {
    SpawnContext {
        level: 1,
        player_weight: 1.0,
        tick: 0,
    }
}

/// Populate every hex of a seeded world
fn populated(seed: u64) -> (HexMap, CreatureMap, SimConfig) {
    let state = WorldState::with_seed(seed).unwrap();
    let hexes = state.hexes().clone();
    let config = state.config().clone();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut creatures = CreatureMap::new();
    let mut next_id = 0;
    for (coord, cell) in &hexes {
        spawn_into_hex(
            *coord,
            cell.terrain,
            &mut creatures,
            hatchling_ctx(),
            &mut next_id,
            &config,
            &mut rng,
        );
    }
    (hexes, creatures, config)
}

fn all_ids(creatures: &CreatureMap) -> Vec<CreatureId> {
    creatures.values().flatten().map(|c| c.id).collect()
}

#[test]
fn test_spawn_respects_hex_cap() {
    for seed in 0..10 {
        let (_, creatures, config) = populated(seed);
        for (coord, list) in &creatures {
            assert!(!list.is_empty(), "empty list kept at {:?}", coord);
            assert!(list.len() <= config.max_creatures_per_hex);
        }
    }
}

#[test]
fn test_spawned_ids_unique() {
    let (_, creatures, _) = populated(4);
    let ids = all_ids(&creatures);
    let unique: BTreeSet<CreatureId> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
}

#[test]
fn test_no_spawns_on_hostile_terrain() {
    let config = SimConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut creatures = CreatureMap::new();
    let mut next_id = 0;
    for (i, terrain) in [TerrainId::Mountain, TerrainId::Quicksand, TerrainId::Lava]
        .into_iter()
        .enumerate()
    {
        let coord = HexCoord::new(i as i32, 0);
        for _ in 0..50 {
            let ids = spawn_into_hex(
                coord,
                terrain,
                &mut creatures,
                hatchling_ctx(),
                &mut next_id,
                &config,
                &mut rng,
            );
            assert!(ids.is_empty(), "{:?} received creatures", terrain);
        }
    }
    assert_eq!(population(&creatures), 0);
}

#[test]
fn test_spawned_species_come_from_habitat() {
    let (hexes, creatures, _) = populated(12);
    for (coord, list) in &creatures {
        let terrain = hexes[coord].terrain;
        let table = Habitat::for_terrain(terrain).species_table();
        for creature in list {
            assert!(
                table.iter().any(|(species, _)| *species == creature.species),
                "{:?} spawned on {:?}",
                creature.species,
                terrain
            );
        }
    }
}

#[test]
fn test_behavior_passes_conserve_creatures() {
    let (hexes, mut creatures, config) = populated(21);
    let before: BTreeSet<CreatureId> = all_ids(&creatures).into_iter().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(21);

    for tick in 1..=20 {
        let report = run_behavior_pass(
            HexCoord::ORIGIN,
            &hexes,
            &mut creatures,
            tick,
            &config,
            &mut rng,
        );
        assert!(report.resolved + report.faults.len() == report.attempted);
        assert!(report.damage >= 0.0);
        assert_eq!(report.entries.len(), report.attempted);

        for (coord, list) in &creatures {
            assert!(!list.is_empty());
            assert!(hexes.contains_key(coord), "creature left the map at {:?}", coord);
            assert!(creature_count(&creatures, coord) <= config.max_creatures_per_hex);
        }
    }

    let after: BTreeSet<CreatureId> = all_ids(&creatures).into_iter().collect();
    assert_eq!(before, after);
}

#[test]
fn test_distant_creatures_stay_put() {
    let config = SimConfig::default();
    let far = HexCoord::new(config.behavior_radius + 3, 0);
    let hexes: HexMap = far
        .hexes_in_range(1)
        .into_iter()
        .map(|c| (c, HexCell::new(c, TerrainId::Plains)))
        .collect();
    let mut creatures = CreatureMap::new();
    add_creature(
        &mut creatures,
        far,
        Creature::new(CreatureId(1), SpeciesId::Dryosaurus, 1.0, 0),
    );
    let snapshot = creatures.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for tick in 1..=10 {
        let report = run_behavior_pass(
            HexCoord::ORIGIN,
            &hexes,
            &mut creatures,
            tick,
            &config,
            &mut rng,
        );
        assert_eq!(report.attempted, 0);
    }
    assert_eq!(creatures, snapshot);
}
