//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// World clock. Advances once per player move and once per creature tick.
pub type Tick = u64;

/// Unique identifier for a spawned creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub u64);

/// Unique identifier for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

/// Why the player's run ended. Terminal outcomes are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Walked into quicksand
    Sank,
    /// Entered deep water below the terrain's minimum weight
    Drowned,
    /// Walked into lava
    Burned,
    /// Energy reached zero
    Starved,
    /// Fitness reached zero from terrain hazards
    Injuries,
    /// Fitness reached zero in a fight
    Combat,
}

impl DeathCause {
    /// Short reason tag shown to the presentation layer
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Sank => "sank",
            Self::Drowned => "drowned",
            Self::Burned => "burned",
            Self::Starved => "starved",
            Self::Injuries => "injuries",
            Self::Combat => "combat",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}
