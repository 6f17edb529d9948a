//! Primeval - turn-based survival on a procedurally generated hex world
//!
//! A hatchling theropod explores, hunts and grows while the surrounding
//! ecosystem spawns, roams and fights back. All change flows through
//! [`state::transition`].

pub mod combat;
pub mod core;
pub mod ecology;
pub mod state;
pub mod world;

pub use crate::core::{Result, SimConfig, SimError};
pub use crate::state::{transition, Intent, WorldState};
