use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::types::{CreatureId, NotificationId};
use crate::world::hex::HexCoord;
use crate::world::terrain::TerrainId;

/// Rejected intents and I/O failures. A rejected intent leaves state untouched.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Game is over; only restart is accepted")]
    GameOver,

    #[error("Target {to:?} is not adjacent to {from:?}")]
    NotAdjacent { from: HexCoord, to: HexCoord },

    #[error("Hex {0:?} has not been generated")]
    UnknownHex(HexCoord),

    #[error("Hex {0:?} has not been discovered")]
    UndiscoveredHex(HexCoord),

    #[error("Hex {0:?} ({1:?}) is impassable")]
    Impassable(HexCoord, TerrainId),

    #[error("Creature {id:?} not found at {coord:?}")]
    CreatureNotFound { coord: HexCoord, id: CreatureId },

    #[error("Notification not found: {0:?}")]
    NotificationNotFound(NotificationId),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// A fault raised while evaluating one creature's behavior.
///
/// Faults are isolated: the creature is treated as having waited and the
/// rest of the pass continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BehaviorFault {
    #[error("Creature {id:?} sits on ungenerated hex {coord:?}")]
    MissingHex { id: CreatureId, coord: HexCoord },

    #[error("Creature {id:?} has non-finite size {size}")]
    InvalidSize { id: CreatureId, size: f32 },
}
