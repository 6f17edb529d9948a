//! Fog of war
//!
//! Recomputes `visible` and `in_range` from scratch around the player and
//! latches `discovered`. Running it twice without moving changes nothing.

use ahash::AHashSet;

use super::hex::HexCoord;
use super::map::{terrain_at, HexMap};

/// Sight radius from `player`: the base radius plus the standing hex's
/// visibility contribution, never below 1.
pub fn sight_radius(map: &HexMap, player: &HexCoord, base_radius: i32) -> i32 {
    let bonus = terrain_at(map, player).map_or(0, |t| t.info().visibility);
    (base_radius + bonus).max(1)
}

/// True when no hex strictly between `from` and `to` blocks sight.
/// Ungenerated hexes never block.
pub fn has_line_of_sight(map: &HexMap, from: &HexCoord, to: &HexCoord) -> bool {
    let line = from.line_to(to);
    if line.len() <= 2 {
        return true;
    }
    !line[1..line.len() - 1]
        .iter()
        .any(|c| terrain_at(map, c).is_some_and(|t| t.blocks_los()))
}

/// Hexes the player can currently see
pub fn visible_hexes(map: &HexMap, player: &HexCoord, base_radius: i32) -> AHashSet<HexCoord> {
    let radius = sight_radius(map, player, base_radius);
    player
        .hexes_in_range(radius as u32)
        .into_iter()
        .filter(|c| map.contains_key(c) && has_line_of_sight(map, player, c))
        .collect()
}

/// Refresh visibility flags for the whole map.
pub fn update_visibility(map: &mut HexMap, player: &HexCoord, base_radius: i32) {
    let visible = visible_hexes(map, player, base_radius);
    for (coord, cell) in map.iter_mut() {
        cell.visible = visible.contains(coord);
        if cell.visible {
            cell.discovered = true;
        }
        cell.in_range = coord.distance(player) == 1 && cell.terrain.is_passable();
    }
    tracing::debug!(
        "visibility from ({}, {}): {} hexes in sight",
        player.q,
        player.r,
        visible.len()
    );
}
