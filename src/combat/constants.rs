//! Combat constants - all tunable values in one place
//!
//! Weights are kilograms, stats are on the 0..100 scale.

// Growth
/// Minimum weight for each growth level; index 0 is level 1
pub const LEVEL_WEIGHT_THRESHOLDS: [f32; 8] = [0.0, 4.0, 15.0, 50.0, 150.0, 400.0, 900.0, 1500.0];
pub const MAX_LEVEL: u8 = LEVEL_WEIGHT_THRESHOLDS.len() as u8;
/// Injury multiplier per level; sturdier bodies take less
pub const LEVEL_INJURY_SCALE: [f32; 8] = [1.0, 0.95, 0.9, 0.85, 0.8, 0.75, 0.7, 0.65];
/// Reference weight for agility and energy scaling
pub const HATCHLING_WEIGHT: f32 = 1.0;

// Escape
pub const ESCAPE_BASE: f32 = 0.1;
/// Extra escape chance for prey much lighter than the player
pub const ESCAPE_SMALL_PREY: f32 = 0.45;
pub const ESCAPE_HATCHLING_BONUS: f32 = 0.1;
pub const ESCAPE_MAX: f32 = 0.6;
pub const ESCAPE_ENERGY_COST: f32 = 2.0;

// Fierceness
pub const INJURY_BASE: f32 = 8.0;
pub const INJURY_PER_RATIO: f32 = 12.0;
pub const INJURY_RATIO_CAP: f32 = 5.0;

// Agility
pub const AGILITY_LOG_SCALE: f32 = 0.15;
pub const AGILITY_FLOOR: f32 = 0.5;
pub const SIZE_PENALTY_SCALE: f32 = 0.5;
/// Prey up to this many times lighter carry no size penalty
pub const SIZE_RATIO_TOLERANCE: f32 = 10.0;
pub const EVADE_ENERGY_COST: f32 = 3.0;

// Kills
/// Fierceness ratio above which a successful hunt still costs fitness
pub const STRUGGLE_THRESHOLD: f32 = 0.5;
pub const STRUGGLE_INJURY: f32 = 10.0;
pub const REWARD_SCALE: f32 = 1.0;
/// `(max prey/player weight ratio, efficiency)` buckets, checked in order
pub const EFFICIENCY_BUCKETS: [(f32, f32); 4] = [
    (0.02, 0.25),
    (0.1, 0.6),
    (1.0, 1.0),
    (f32::INFINITY, 1.2),
];
pub const SATISFACTION_PER_LEVEL: f32 = 0.15;
pub const SATISFACTION_FLOOR: f32 = 0.2;
pub const WEIGHT_PER_EXCESS_ENERGY: f32 = 0.002;
pub const MAX_GAIN_FRACTION: f32 = 0.1;
pub const SCORE_OVERFLOW_BONUS: f32 = 2.0;
pub const SCORE_FEED_BONUS: f32 = 1.0;
