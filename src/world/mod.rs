//! Hex world: geometry, terrain, generation and visibility

pub mod features;
pub mod generation;
pub mod hex;
pub mod map;
pub mod postprocess;
pub mod terrain;
pub mod visibility;

pub use features::{plan_region_features, FeatureKind, FeatureSet, LinearFeature, Region};
pub use generation::{generate_around, generate_hexes, infer_terrain};
pub use hex::{HexCoord, HEX_SIZE};
pub use map::{HexCell, HexMap};
pub use postprocess::settle_batch;
pub use terrain::{TerrainCategory, TerrainId, TerrainType};
pub use visibility::update_visibility;
