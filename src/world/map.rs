//! Sparse hex map
//!
//! Hexes are generated lazily around the player and never removed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::hex::HexCoord;
use super::terrain::TerrainId;

/// A single generated hex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexCell {
    pub coord: HexCoord,
    pub terrain: TerrainId,
    /// The player has stood here
    pub visited: bool,
    /// Currently in sight
    pub visible: bool,
    /// Has ever been in sight
    pub discovered: bool,
    /// Adjacent, passable, reachable with one move
    pub in_range: bool,
    /// Post-processing has run; terrain is final
    pub settled: bool,
}

impl HexCell {
    pub fn new(coord: HexCoord, terrain: TerrainId) -> Self {
        Self {
            coord,
            terrain,
            visited: false,
            visible: false,
            discovered: false,
            in_range: false,
            settled: false,
        }
    }
}

/// Hex map keyed by coordinate. `BTreeMap` keeps iteration deterministic.
pub type HexMap = BTreeMap<HexCoord, HexCell>;

/// Terrain at a coordinate, if generated
pub fn terrain_at(map: &HexMap, coord: &HexCoord) -> Option<TerrainId> {
    map.get(coord).map(|cell| cell.terrain)
}

/// Terrains of the generated neighbors of `coord`, in direction order
pub fn neighbor_terrains(map: &HexMap, coord: &HexCoord) -> Vec<TerrainId> {
    coord
        .neighbors()
        .iter()
        .filter_map(|n| terrain_at(map, n))
        .collect()
}

/// Terrains of the generated hexes exactly `radius` steps away
pub fn ring_terrains(map: &HexMap, coord: &HexCoord, radius: u32) -> Vec<TerrainId> {
    coord
        .ring(radius)
        .iter()
        .filter_map(|n| terrain_at(map, n))
        .collect()
}

/// Generated, passable neighbors of `coord`
pub fn passable_neighbors(map: &HexMap, coord: &HexCoord) -> Vec<HexCoord> {
    coord
        .neighbors()
        .into_iter()
        .filter(|n| terrain_at(map, n).is_some_and(|t| t.is_passable()))
        .collect()
}
