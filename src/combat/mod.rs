//! Combat between the player and a single creature

pub mod constants;
pub mod resolution;

pub use resolution::{
    level_for_weight, resolve_attack, CombatOutcome, CombatResult, CombatRolls, PlayerVitals,
};
