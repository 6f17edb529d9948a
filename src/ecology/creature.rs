//! Creatures and the sparse creature map
//!
//! A creature's position is the key of the list holding it. Helpers here
//! keep the invariant that no key maps to an empty list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::species::SpeciesId;
use crate::core::types::{CreatureId, Tick};
use crate::world::hex::HexCoord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub species: SpeciesId,
    /// Fraction of adult size in `[species.min_age, 1.0]`
    pub size: f32,
    pub spawn_tick: Tick,
    pub last_acted: Option<Tick>,
}

impl Creature {
    pub fn new(id: CreatureId, species: SpeciesId, size: f32, spawn_tick: Tick) -> Self {
        Self {
            id,
            species,
            size,
            spawn_tick,
            last_acted: None,
        }
    }

    /// Live weight in kg
    pub fn weight(&self) -> f32 {
        self.species.descriptor().weight * self.size
    }
}

pub type CreatureMap = BTreeMap<HexCoord, Vec<Creature>>;

pub fn creatures_at<'a>(map: &'a CreatureMap, coord: &HexCoord) -> &'a [Creature] {
    map.get(coord).map_or(&[], |list| list.as_slice())
}

pub fn creature_count(map: &CreatureMap, coord: &HexCoord) -> usize {
    map.get(coord).map_or(0, Vec::len)
}

pub fn find_creature<'a>(
    map: &'a CreatureMap,
    coord: &HexCoord,
    id: CreatureId,
) -> Option<&'a Creature> {
    creatures_at(map, coord).iter().find(|c| c.id == id)
}

pub fn add_creature(map: &mut CreatureMap, coord: HexCoord, creature: Creature) {
    map.entry(coord).or_default().push(creature);
}

/// Remove a creature, dropping the hex entry when it empties
pub fn remove_creature(
    map: &mut CreatureMap,
    coord: &HexCoord,
    id: CreatureId,
) -> Option<Creature> {
    let list = map.get_mut(coord)?;
    let index = list.iter().position(|c| c.id == id)?;
    let creature = list.remove(index);
    if list.is_empty() {
        map.remove(coord);
    }
    Some(creature)
}

/// Relocate a creature. Returns false if it was not found at `from`.
pub fn move_creature(map: &mut CreatureMap, from: &HexCoord, id: CreatureId, to: HexCoord) -> bool {
    match remove_creature(map, from, id) {
        Some(creature) => {
            add_creature(map, to, creature);
            true
        }
        None => false,
    }
}

/// Total creatures on the map
pub fn population(map: &CreatureMap) -> usize {
    map.values().map(Vec::len).sum()
}
