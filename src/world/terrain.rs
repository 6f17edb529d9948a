//! Terrain catalog
//!
//! Flat, behavior-free data keyed by the closed `TerrainId` enum. The
//! ordering of both enums below is the generator's fixed tie-break order.

use serde::{Deserialize, Serialize};

use crate::core::types::DeathCause;

/// Ecological category used by the generator's neighbor rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerrainCategory {
    Water,
    Wetland,
    Forest,
    Plains,
    Arid,
    Mountain,
    Volcanic,
}

impl TerrainCategory {
    pub const ALL: [TerrainCategory; 7] = [
        Self::Water,
        Self::Wetland,
        Self::Forest,
        Self::Plains,
        Self::Arid,
        Self::Mountain,
        Self::Volcanic,
    ];

    /// Terrain used when the generator continues or enters this category
    /// without a more specific rule
    pub fn default_terrain(&self) -> TerrainId {
        match self {
            Self::Water => TerrainId::Riverbank,
            Self::Wetland => TerrainId::Marsh,
            Self::Forest => TerrainId::OpenWoods,
            Self::Plains => TerrainId::Plains,
            Self::Arid => TerrainId::Scrubland,
            Self::Mountain => TerrainId::Hills,
            Self::Volcanic => TerrainId::Rocky,
        }
    }
}

/// Terrain identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerrainId {
    River,
    Lake,
    Riverbank,
    Marsh,
    Quicksand,
    OpenWoods,
    Forest,
    DenseForest,
    GalleryForest,
    Plains,
    Meadow,
    GameTrail,
    Scrubland,
    Savanna,
    Badlands,
    Desert,
    Hills,
    Rocky,
    Mountain,
    DeadForest,
    Lava,
    Volcano,
}

/// Static catalog entry for a terrain
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainType {
    pub name: &'static str,
    pub passable: bool,
    /// Energy spent entering the hex at hatchling weight
    pub energy_cost: f32,
    /// Chance per entry of a terrain injury
    pub fitness_risk: f32,
    /// Entering below this weight drowns the player
    pub min_weight: Option<f32>,
    /// Added to the sight radius while standing here
    pub visibility: i32,
    pub blocks_los: bool,
    pub category: TerrainCategory,
    /// Entering always ends the run with this cause
    pub hazard: Option<DeathCause>,
}

const fn terrain(
    name: &'static str,
    energy_cost: f32,
    fitness_risk: f32,
    visibility: i32,
    category: TerrainCategory,
) -> TerrainType {
    TerrainType {
        name,
        passable: true,
        energy_cost,
        fitness_risk,
        min_weight: None,
        visibility,
        blocks_los: false,
        category,
        hazard: None,
    }
}

use TerrainCategory as C;

static CATALOG: [TerrainType; 22] = [
    TerrainType {
        min_weight: Some(40.0),
        ..terrain("River", 6.0, 0.05, 0, C::Water)
    },
    TerrainType {
        min_weight: Some(250.0),
        ..terrain("Lake", 8.0, 0.05, 1, C::Water)
    },
    terrain("Riverbank", 2.5, 0.02, 0, C::Wetland),
    terrain("Marsh", 4.0, 0.05, 0, C::Wetland),
    TerrainType {
        hazard: Some(DeathCause::Sank),
        ..terrain("Quicksand", 5.0, 0.0, 0, C::Wetland)
    },
    terrain("Open Woods", 2.5, 0.02, 0, C::Forest),
    TerrainType {
        blocks_los: true,
        ..terrain("Forest", 3.5, 0.03, -1, C::Forest)
    },
    TerrainType {
        blocks_los: true,
        ..terrain("Dense Forest", 4.5, 0.05, -1, C::Forest)
    },
    terrain("Gallery Forest", 3.0, 0.02, 0, C::Forest),
    terrain("Plains", 2.0, 0.01, 0, C::Plains),
    terrain("Meadow", 2.0, 0.01, 0, C::Plains),
    terrain("Game Trail", 1.5, 0.0, 0, C::Plains),
    terrain("Scrubland", 2.5, 0.03, 0, C::Arid),
    terrain("Savanna", 2.5, 0.02, 1, C::Arid),
    terrain("Badlands", 3.5, 0.08, 0, C::Arid),
    terrain("Desert", 5.0, 0.06, 1, C::Arid),
    terrain("Hills", 3.5, 0.04, 1, C::Mountain),
    terrain("Rocky", 4.0, 0.08, 1, C::Mountain),
    TerrainType {
        passable: false,
        blocks_los: true,
        ..terrain("Mountain", 10.0, 0.2, 2, C::Mountain)
    },
    terrain("Dead Forest", 3.0, 0.05, 0, C::Volcanic),
    TerrainType {
        hazard: Some(DeathCause::Burned),
        ..terrain("Lava", 10.0, 1.0, 0, C::Volcanic)
    },
    TerrainType {
        passable: false,
        blocks_los: true,
        ..terrain("Volcano", 10.0, 1.0, 2, C::Volcanic)
    },
];

impl TerrainId {
    pub const ALL: [TerrainId; 22] = [
        Self::River,
        Self::Lake,
        Self::Riverbank,
        Self::Marsh,
        Self::Quicksand,
        Self::OpenWoods,
        Self::Forest,
        Self::DenseForest,
        Self::GalleryForest,
        Self::Plains,
        Self::Meadow,
        Self::GameTrail,
        Self::Scrubland,
        Self::Savanna,
        Self::Badlands,
        Self::Desert,
        Self::Hills,
        Self::Rocky,
        Self::Mountain,
        Self::DeadForest,
        Self::Lava,
        Self::Volcano,
    ];

    /// Catalog entry for this terrain
    pub fn info(&self) -> &'static TerrainType {
        &CATALOG[*self as usize]
    }

    pub fn category(&self) -> TerrainCategory {
        self.info().category
    }

    pub fn is_passable(&self) -> bool {
        self.info().passable
    }

    pub fn blocks_los(&self) -> bool {
        self.info().blocks_los
    }

    pub fn is_water(&self) -> bool {
        matches!(self, Self::River | Self::Lake)
    }

    /// Forest tier (open woods < forest < dense forest)
    pub fn forest_tier(&self) -> u8 {
        match self {
            Self::OpenWoods => 1,
            Self::Forest | Self::GalleryForest => 2,
            Self::DenseForest => 3,
            _ => 0,
        }
    }

    /// Arid tier (scrubland < savanna < badlands < desert)
    pub fn arid_tier(&self) -> u8 {
        match self {
            Self::Scrubland => 1,
            Self::Savanna => 2,
            Self::Badlands => 3,
            Self::Desert => 4,
            _ => 0,
        }
    }

    /// Terrain to extend when a neighbor of this type is the one being
    /// continued. Terrains only placed by linear features or rules map to a
    /// nearby ordinary terrain.
    pub fn continuation(&self) -> TerrainId {
        match self {
            Self::River | Self::Lake => Self::Riverbank,
            Self::Quicksand => Self::Marsh,
            Self::GameTrail => Self::Plains,
            Self::Mountain => Self::Hills,
            Self::Lava | Self::Volcano => Self::Rocky,
            other => *other,
        }
    }
}

/// Terrain for a given arid tier (1..=4)
pub fn arid_terrain(tier: u8) -> TerrainId {
    match tier {
        0 | 1 => TerrainId::Scrubland,
        2 => TerrainId::Savanna,
        3 => TerrainId::Badlands,
        _ => TerrainId::Desert,
    }
}

/// Terrain for a given forest tier (1..=3)
pub fn forest_terrain(tier: u8) -> TerrainId {
    match tier {
        0 | 1 => TerrainId::OpenWoods,
        2 => TerrainId::Forest,
        _ => TerrainId::DenseForest,
    }
}
