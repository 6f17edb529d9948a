//! Habitats and their encounter tables

use serde::{Deserialize, Serialize};

use super::species::SpeciesId;
use crate::world::terrain::TerrainId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Habitat {
    Riparian,
    Wetland,
    Woodland,
    Grassland,
    Scrub,
    Highland,
    Barren,
}

use SpeciesId as S;

impl Habitat {
    pub fn for_terrain(terrain: TerrainId) -> Habitat {
        use TerrainId as T;
        match terrain {
            T::River | T::Lake | T::Riverbank => Self::Riparian,
            T::Marsh | T::Quicksand => Self::Wetland,
            T::OpenWoods | T::Forest | T::DenseForest | T::GalleryForest => Self::Woodland,
            T::Plains | T::Meadow | T::GameTrail => Self::Grassland,
            T::Scrubland | T::Savanna | T::Badlands => Self::Scrub,
            T::Hills | T::Rocky | T::Mountain => Self::Highland,
            T::Desert | T::DeadForest | T::Lava | T::Volcano => Self::Barren,
        }
    }

    /// `(species, base spawn weight)` in trial order
    pub fn species_table(&self) -> &'static [(SpeciesId, f32)] {
        match self {
            Self::Riparian => &[
                (S::Dragonfly, 0.3),
                (S::Salamander, 0.35),
                (S::Rhamphorhynchus, 0.2),
                (S::Goniopholis, 0.12),
                (S::Camptosaurus, 0.1),
                (S::Ceratosaurus, 0.04),
            ],
            Self::Wetland => &[
                (S::Dragonfly, 0.35),
                (S::Salamander, 0.3),
                (S::Goniopholis, 0.1),
                (S::Camptosaurus, 0.12),
                (S::Rhamphorhynchus, 0.1),
            ],
            Self::Woodland => &[
                (S::Dragonfly, 0.3),
                (S::Docodon, 0.3),
                (S::Lizard, 0.15),
                (S::Compsognathus, 0.15),
                (S::Ornitholestes, 0.1),
                (S::Dryosaurus, 0.15),
                (S::Brachiosaurus, 0.04),
                (S::Ceratosaurus, 0.04),
                (S::Allosaurus, 0.03),
            ],
            Self::Grassland => &[
                (S::Lizard, 0.25),
                (S::Docodon, 0.2),
                (S::Compsognathus, 0.15),
                (S::Dryosaurus, 0.15),
                (S::Camptosaurus, 0.12),
                (S::Stegosaurus, 0.08),
                (S::Diplodocus, 0.06),
                (S::Allosaurus, 0.04),
                (S::Torvosaurus, 0.02),
            ],
            Self::Scrub => &[
                (S::Lizard, 0.35),
                (S::Dragonfly, 0.2),
                (S::Compsognathus, 0.12),
                (S::Gargoyleosaurus, 0.1),
                (S::Allosaurus, 0.03),
            ],
            Self::Highland => &[
                (S::Lizard, 0.3),
                (S::Docodon, 0.15),
                (S::Rhamphorhynchus, 0.15),
                (S::Gargoyleosaurus, 0.08),
            ],
            Self::Barren => &[(S::Lizard, 0.15), (S::Dragonfly, 0.1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_terrain_has_habitat() {
        for t in TerrainId::ALL {
            assert!(!Habitat::for_terrain(t).species_table().is_empty());
        }
    }

    #[test]
    fn test_weights_are_probabilities() {
        for t in TerrainId::ALL {
            for (_, w) in Habitat::for_terrain(t).species_table() {
                assert!(*w > 0.0 && *w <= 1.0);
            }
        }
    }

    #[test]
    fn test_rivers_hold_crocodiles() {
        let table = Habitat::for_terrain(TerrainId::River).species_table();
        assert!(table.iter().any(|(s, _)| *s == SpeciesId::Goniopholis));
    }
}
