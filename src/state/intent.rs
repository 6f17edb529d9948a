//! Intents accepted by the reducer

use serde::{Deserialize, Serialize};

use crate::core::types::{CreatureId, NotificationId};
use crate::world::hex::HexCoord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Plan macro features for a region centered on `center`
    GenerateRegionFeatures { center: HexCoord },
    /// Generate one hex; existing hexes are left as they are
    GenerateHex { coord: HexCoord },
    UpdateVisibility,
    SpawnCreatures { coord: HexCoord },
    AttackCreature { coord: HexCoord, creature_id: CreatureId },
    /// Advance the creature clock and run one behavior pass
    ProcessCreatureBehaviors,
    MovePlayer { target: HexCoord },
    SelectHex { coord: HexCoord },
    HoverHex { coord: HexCoord },
    ClearHover,
    DismissNotification { id: NotificationId },
    AutoDismissNotifications,
    /// Fresh world; `None` draws a seed from the current RNG
    Restart { seed: Option<u64> },
}
