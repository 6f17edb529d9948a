pub mod config;
pub mod error;
pub mod guard;
pub mod types;

pub use config::{ConfigError, SimConfig};
pub use error::{BehaviorFault, Result, SimError};
pub use types::{CreatureId, DeathCause, NotificationId, Tick};
