//! Post-processing of freshly generated batches
//!
//! Runs once per batch. A hex is only ever touched while unsettled, so a
//! second pass over the same batch is a no-op.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::hex::HexCoord;
use super::map::{neighbor_terrains, HexMap};
use super::terrain::{TerrainCategory, TerrainId};
use crate::core::config::SimConfig;

/// Forest neighbors needed to turn an isolated river hex into gallery forest
pub const GALLERY_FOREST_NEIGHBORS: usize = 2;
/// River neighbors needed before a riverbank may become a lake
pub const LAKE_RIVER_NEIGHBORS: usize = 2;

/// Apply the batch rules to every unsettled hex in `batch`, then mark the
/// whole batch settled.
pub fn settle_batch(
    map: &mut HexMap,
    batch: &[HexCoord],
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) {
    let pending: Vec<HexCoord> = batch
        .iter()
        .filter(|c| map.get(c).is_some_and(|cell| !cell.settled))
        .copied()
        .collect();

    let mut changes = Vec::new();
    for coord in &pending {
        let Some(terrain) = map.get(coord).map(|cell| cell.terrain) else {
            continue;
        };
        let around = neighbor_terrains(map, coord);
        let rivers = around.iter().filter(|t| **t == TerrainId::River).count();
        let forests = around
            .iter()
            .filter(|t| t.category() == TerrainCategory::Forest)
            .count();

        match terrain {
            TerrainId::River if rivers <= 1 && forests >= GALLERY_FOREST_NEIGHBORS => {
                changes.push((*coord, TerrainId::GalleryForest));
            }
            TerrainId::Riverbank
                if rivers >= LAKE_RIVER_NEIGHBORS
                    && rng.gen::<f32>() < config.lake_conversion_chance =>
            {
                changes.push((*coord, TerrainId::Lake));
            }
            _ => {}
        }
    }

    for (coord, terrain) in &changes {
        if let Some(cell) = map.get_mut(coord) {
            cell.terrain = *terrain;
        }
    }
    for coord in &pending {
        if let Some(cell) = map.get_mut(coord) {
            cell.settled = true;
        }
    }

    if !changes.is_empty() {
        tracing::debug!("post-processing changed {} hexes", changes.len());
    }
}
