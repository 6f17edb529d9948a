//! Species catalog
//!
//! Static descriptors keyed by the closed `SpeciesId` enum. Weights are adult
//! baseline kilograms; `danger` is the kilogram-equivalent fighting mass used
//! by combat, so a predator can punch above its weight.

use serde::{Deserialize, Serialize};

use crate::world::terrain::TerrainCategory;

/// Behavior policy family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Ignores the player, drifts away when crowded
    Passive,
    /// Flees whenever the player is close
    Skittish,
    /// Holds ground and strikes back only at close range
    Defensive,
    /// Hunts in groups; bolder with more packmates nearby
    PackPredator,
    /// Defends its patch, more so with company
    Territorial,
    /// Grazes and moves off when approached
    Herbivore,
    /// Grazer that answers a close approach with force
    DangerousHerbivore,
    /// Too big to care; tramples what shares its hex
    GiantHerbivore,
    /// Circles from above and swoops
    AerialPredator,
    /// Waits unseen and strikes at point blank
    AmbushPredator,
    /// Mid-sized predator competing with the player
    RivalPredator,
    /// Top of the food chain
    ApexPredator,
}

impl Archetype {
    /// Archetypes whose pack size scales aggression
    pub fn uses_pack(&self) -> bool {
        matches!(self, Self::PackPredator | Self::Territorial)
    }

    /// Archetypes whose spawning is suppressed for young players
    pub fn is_apex(&self) -> bool {
        matches!(self, Self::ApexPredator | Self::RivalPredator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpeciesId {
    Dragonfly,
    Salamander,
    Lizard,
    Docodon,
    Compsognathus,
    Rhamphorhynchus,
    Ornitholestes,
    Goniopholis,
    Dryosaurus,
    Camptosaurus,
    Gargoyleosaurus,
    Stegosaurus,
    Diplodocus,
    Brachiosaurus,
    Ceratosaurus,
    Allosaurus,
    Torvosaurus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesDescriptor {
    pub name: &'static str,
    pub archetype: Archetype,
    /// Energy value of a full-size kill before efficiency scaling
    pub nutrition: f32,
    /// Fighting mass in kg-equivalents
    pub danger: f32,
    /// 0..1 willingness to attack
    pub aggression: f32,
    /// Multiplier on how hard it is to pin down
    pub difficulty: f32,
    /// Adult weight in kg
    pub weight: f32,
    /// Smallest size fraction that spawns
    pub min_age: f32,
    pub preferred: &'static [TerrainCategory],
}

/// Species at or below this adult weight count as small prey
pub const SMALL_PREY_WEIGHT: f32 = 1.0;

use Archetype as A;
use TerrainCategory as T;

#[allow(clippy::too_many_arguments)]
const fn species(
    name: &'static str,
    archetype: Archetype,
    nutrition: f32,
    danger: f32,
    aggression: f32,
    difficulty: f32,
    weight: f32,
    min_age: f32,
    preferred: &'static [TerrainCategory],
) -> SpeciesDescriptor {
    SpeciesDescriptor {
        name,
        archetype,
        nutrition,
        danger,
        aggression,
        difficulty,
        weight,
        min_age,
        preferred,
    }
}

static CATALOG: [SpeciesDescriptor; 17] = [
    species(
        "Giant Dragonfly",
        A::Passive,
        6.0,
        0.05,
        0.0,
        0.6,
        0.05,
        1.0,
        &[T::Wetland, T::Forest],
    ),
    species(
        "Salamander",
        A::Passive,
        8.0,
        0.1,
        0.0,
        0.7,
        0.2,
        0.6,
        &[T::Wetland, T::Water],
    ),
    species(
        "Lizard",
        A::Skittish,
        10.0,
        0.2,
        0.05,
        0.8,
        0.3,
        0.5,
        &[T::Arid, T::Plains],
    ),
    species(
        "Docodon",
        A::Skittish,
        14.0,
        0.3,
        0.1,
        0.9,
        0.4,
        0.5,
        &[T::Forest],
    ),
    species(
        "Compsognathus",
        A::PackPredator,
        18.0,
        2.0,
        0.6,
        1.1,
        3.0,
        0.4,
        &[T::Forest, T::Plains],
    ),
    species(
        "Rhamphorhynchus",
        A::AerialPredator,
        12.0,
        1.5,
        0.4,
        1.6,
        1.5,
        0.5,
        &[T::Water, T::Wetland],
    ),
    species(
        "Ornitholestes",
        A::Territorial,
        30.0,
        8.0,
        0.6,
        1.3,
        12.0,
        0.4,
        &[T::Forest],
    ),
    species(
        "Goniopholis",
        A::AmbushPredator,
        60.0,
        60.0,
        0.7,
        1.0,
        150.0,
        0.3,
        &[T::Water, T::Wetland],
    ),
    species(
        "Dryosaurus",
        A::Herbivore,
        45.0,
        4.0,
        0.1,
        1.5,
        80.0,
        0.3,
        &[T::Forest, T::Plains],
    ),
    species(
        "Camptosaurus",
        A::Herbivore,
        60.0,
        12.0,
        0.1,
        1.1,
        400.0,
        0.2,
        &[T::Plains, T::Wetland],
    ),
    species(
        "Gargoyleosaurus",
        A::Defensive,
        80.0,
        150.0,
        0.3,
        0.5,
        1000.0,
        0.2,
        &[T::Arid, T::Mountain],
    ),
    species(
        "Stegosaurus",
        A::DangerousHerbivore,
        120.0,
        900.0,
        0.5,
        0.6,
        5000.0,
        0.2,
        &[T::Plains, T::Forest],
    ),
    species(
        "Diplodocus",
        A::GiantHerbivore,
        250.0,
        2500.0,
        0.2,
        0.3,
        15000.0,
        0.15,
        &[T::Plains],
    ),
    species(
        "Brachiosaurus",
        A::GiantHerbivore,
        300.0,
        6000.0,
        0.2,
        0.3,
        40000.0,
        0.15,
        &[T::Forest, T::Plains],
    ),
    species(
        "Ceratosaurus",
        A::RivalPredator,
        150.0,
        600.0,
        0.8,
        1.0,
        700.0,
        0.3,
        &[T::Forest, T::Water],
    ),
    species(
        "Allosaurus",
        A::ApexPredator,
        200.0,
        1500.0,
        0.9,
        1.0,
        1700.0,
        0.3,
        &[T::Plains, T::Forest],
    ),
    species(
        "Torvosaurus",
        A::ApexPredator,
        220.0,
        1800.0,
        0.95,
        1.0,
        2000.0,
        0.3,
        &[T::Plains],
    ),
];

impl SpeciesId {
    pub const ALL: [SpeciesId; 17] = [
        Self::Dragonfly,
        Self::Salamander,
        Self::Lizard,
        Self::Docodon,
        Self::Compsognathus,
        Self::Rhamphorhynchus,
        Self::Ornitholestes,
        Self::Goniopholis,
        Self::Dryosaurus,
        Self::Camptosaurus,
        Self::Gargoyleosaurus,
        Self::Stegosaurus,
        Self::Diplodocus,
        Self::Brachiosaurus,
        Self::Ceratosaurus,
        Self::Allosaurus,
        Self::Torvosaurus,
    ];

    pub fn descriptor(&self) -> &'static SpeciesDescriptor {
        &CATALOG[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    pub fn archetype(&self) -> Archetype {
        self.descriptor().archetype
    }

    pub fn is_small_prey(&self) -> bool {
        self.descriptor().weight <= SMALL_PREY_WEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_ids() {
        assert_eq!(SpeciesId::Dragonfly.name(), "Giant Dragonfly");
        assert_eq!(SpeciesId::Torvosaurus.name(), "Torvosaurus");
        assert_eq!(SpeciesId::Goniopholis.archetype(), Archetype::AmbushPredator);
    }

    #[test]
    fn test_descriptors_are_sane() {
        for id in SpeciesId::ALL {
            let d = id.descriptor();
            assert!(d.min_age > 0.0 && d.min_age <= 1.0, "{}", d.name);
            assert!(d.weight > 0.0 && d.nutrition > 0.0, "{}", d.name);
            assert!((0.0..=1.0).contains(&d.aggression), "{}", d.name);
            assert!(!d.preferred.is_empty(), "{}", d.name);
        }
    }

    #[test]
    fn test_small_prey() {
        assert!(SpeciesId::Lizard.is_small_prey());
        assert!(!SpeciesId::Compsognathus.is_small_prey());
    }

    #[test]
    fn test_apex_flags() {
        assert!(Archetype::ApexPredator.is_apex());
        assert!(Archetype::RivalPredator.is_apex());
        assert!(!Archetype::PackPredator.is_apex());
        assert!(Archetype::Territorial.uses_pack());
    }
}
