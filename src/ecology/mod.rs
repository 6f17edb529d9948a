//! Creature ecology: species, habitats, spawning and behavior

pub mod behavior;
pub mod creature;
pub mod habitat;
pub mod spawn;
pub mod species;

pub use behavior::{run_behavior_pass, Action, ActionKind, BehaviorEntry, BehaviorReport};
pub use creature::{Creature, CreatureMap};
pub use habitat::Habitat;
pub use spawn::{spawn_into_hex, SpawnContext};
pub use species::{Archetype, SpeciesDescriptor, SpeciesId};
