//! Root simulation state and the reducer that advances it

pub mod intent;
pub mod log;
pub mod player;
pub mod transition;
pub mod world_state;

pub use intent::Intent;
pub use log::{BehaviorLog, Notification, NotificationKind, NotificationQueue};
pub use player::PlayerState;
pub use transition::transition;
pub use world_state::{BehaviorStats, StateSnapshot, WorldState};
