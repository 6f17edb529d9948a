//! Player-vs-creature attack resolution
//!
//! Randomness enters only through `CombatRolls`, drawn up front, so any
//! outcome can be forced. Every branch removes the creature from play; the
//! caller does the removal.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::constants::*;
use crate::core::guard::{clamp_stat, finite_or, safe_ln, safe_ratio, STAT_MAX};
use crate::core::types::DeathCause;
use crate::ecology::species::SpeciesDescriptor;

/// The player numbers combat reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerVitals {
    pub weight: f32,
    pub fitness: f32,
    pub energy: f32,
    pub level: u8,
    pub score: f32,
}

/// Pre-drawn random inputs for one attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatRolls {
    /// Uniform in [0, 1); escape happens below the escape chance
    pub escape: f32,
    /// Multiplier on the creature's fierceness
    pub fierceness_noise: f32,
    /// Multiplier on the creature's difficulty
    pub agility_noise: f32,
}

impl CombatRolls {
    /// Draw rolls with noise uniform in `[1 - band, 1 + band]`
    pub fn draw(rng: &mut ChaCha8Rng, band: f32) -> Self {
        Self {
            escape: rng.gen(),
            fierceness_noise: noise(rng, band),
            agility_noise: noise(rng, band),
        }
    }
}

fn noise(rng: &mut ChaCha8Rng, band: f32) -> f32 {
    if band > 0.0 {
        rng.gen_range(1.0 - band..=1.0 + band)
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CombatOutcome {
    /// The creature got away before contact
    Escaped,
    /// The creature was too fierce; the player is hurt and it retreats
    DrivenOff,
    /// The creature was too quick to pin down
    Evaded,
    /// Hunt succeeded
    Killed { reward: f32, weight_gain: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatResult {
    pub vitals: PlayerVitals,
    pub outcome: CombatOutcome,
    /// Fitness lost in this attack
    pub injury: f32,
    pub fierceness_ratio: Option<f32>,
    pub agility_ratio: Option<f32>,
    pub death: Option<DeathCause>,
}

/// Growth level for a weight (1-based, never above `MAX_LEVEL`)
pub fn level_for_weight(weight: f32) -> u8 {
    LEVEL_WEIGHT_THRESHOLDS
        .iter()
        .take_while(|threshold| weight >= **threshold)
        .count()
        .max(1) as u8
}

pub fn level_injury_scale(level: u8) -> f32 {
    let index = (level.max(1) - 1) as usize;
    LEVEL_INJURY_SCALE[index.min(LEVEL_INJURY_SCALE.len() - 1)]
}

/// Weight scaled by log fitness, from half weight at 0 fitness to full
/// weight at 100
pub fn player_fierceness(weight: f32, fitness: f32) -> f32 {
    let fitness_term = safe_ratio(
        (1.0 + fitness.max(0.0)).ln(),
        (1.0 + STAT_MAX).ln(),
        0.0,
        "fitness term",
    );
    finite_or(weight * (0.5 + 0.5 * fitness_term), 0.0, "player fierceness")
}

pub fn player_agility(weight: f32) -> f32 {
    let log_weight = safe_ln(weight / HATCHLING_WEIGHT, 0.0, "agility weight");
    (1.0 + AGILITY_LOG_SCALE * log_weight).max(AGILITY_FLOOR)
}

/// Penalty for hunting prey far smaller than the player
pub fn size_ratio_penalty(player_weight: f32, prey_weight: f32) -> f32 {
    let log_ratio = safe_ln(player_weight / prey_weight, 0.0, "size ratio");
    1.0 + SIZE_PENALTY_SCALE * (log_ratio - SIZE_RATIO_TOLERANCE.ln()).max(0.0)
}

pub fn escape_chance(prey_weight: f32, player_weight: f32, level: u8) -> f32 {
    let ratio = safe_ratio(prey_weight, player_weight, 1.0, "escape weight ratio").min(1.0);
    let mut p = ESCAPE_BASE + ESCAPE_SMALL_PREY * (1.0 - ratio);
    if level <= 1 {
        p += ESCAPE_HATCHLING_BONUS;
    }
    p.min(ESCAPE_MAX)
}

/// Reward multiplier by prey/player weight ratio
pub fn efficiency(prey_weight: f32, player_weight: f32) -> f32 {
    let ratio = safe_ratio(prey_weight, player_weight, 1.0, "efficiency ratio");
    EFFICIENCY_BUCKETS
        .iter()
        .find(|(max_ratio, _)| ratio < *max_ratio)
        .map_or(1.0, |(_, e)| *e)
}

/// Prey belonging to a lower growth level than the player satisfies less
pub fn satisfaction(prey_weight: f32, level: u8) -> f32 {
    let levels_above = level.saturating_sub(level_for_weight(prey_weight));
    (1.0 - SATISFACTION_PER_LEVEL * levels_above as f32).max(SATISFACTION_FLOOR)
}

/// Resolve one attack by the player.
pub fn resolve_attack(
    vitals: PlayerVitals,
    species: &SpeciesDescriptor,
    size: f32,
    pack_size: usize,
    rolls: &CombatRolls,
) -> CombatResult {
    let mut v = vitals;
    let size = finite_or(size, 1.0, "creature size");
    let prey_weight = species.weight * size;

    let mut result = CombatResult {
        vitals: v,
        outcome: CombatOutcome::Escaped,
        injury: 0.0,
        fierceness_ratio: None,
        agility_ratio: None,
        death: None,
    };

    if rolls.escape < escape_chance(prey_weight, v.weight, v.level) {
        v.energy = clamp_stat(v.energy - ESCAPE_ENERGY_COST, "energy");
        result.vitals = v;
        return result;
    }

    let pack = pack_size.max(1) as f32;
    let fierceness = species.danger * (size / pack) * rolls.fierceness_noise;
    let ratio = safe_ratio(
        fierceness,
        player_fierceness(v.weight, v.fitness).max(1.0),
        0.0,
        "fierceness ratio",
    );
    result.fierceness_ratio = Some(ratio);

    if ratio >= 1.0 {
        let injury = (INJURY_BASE + INJURY_PER_RATIO * ratio.min(INJURY_RATIO_CAP))
            * level_injury_scale(v.level);
        v.fitness = clamp_stat(v.fitness - injury, "fitness");
        result.injury = injury;
        result.outcome = CombatOutcome::DrivenOff;
    } else {
        let agility = safe_ratio(
            species.difficulty * rolls.agility_noise * size_ratio_penalty(v.weight, prey_weight),
            player_agility(v.weight),
            1.0,
            "agility ratio",
        );
        result.agility_ratio = Some(agility);

        if agility >= 1.0 {
            v.energy = clamp_stat(v.energy - EVADE_ENERGY_COST, "energy");
            result.outcome = CombatOutcome::Evaded;
        } else {
            if ratio > STRUGGLE_THRESHOLD {
                let injury = STRUGGLE_INJURY * ratio;
                v.fitness = clamp_stat(v.fitness - injury, "fitness");
                result.injury = injury;
            }

            let reward = finite_or(
                species.nutrition
                    * size
                    * efficiency(prey_weight, v.weight)
                    * satisfaction(prey_weight, v.level)
                    * REWARD_SCALE,
                0.0,
                "reward",
            );
            let mut weight_gain = 0.0;
            if v.energy + reward > STAT_MAX {
                let excess = v.energy + reward - STAT_MAX;
                weight_gain = (excess * WEIGHT_PER_EXCESS_ENERGY * v.weight)
                    .min(MAX_GAIN_FRACTION * v.weight);
                v.weight += weight_gain;
                v.energy = STAT_MAX;
                v.score += reward * SCORE_OVERFLOW_BONUS;
            } else {
                v.energy = clamp_stat(v.energy + reward, "energy");
                v.score += reward * SCORE_FEED_BONUS;
            }
            result.outcome = CombatOutcome::Killed {
                reward,
                weight_gain,
            };
        }
    }

    if v.fitness <= 0.0 {
        result.death = Some(DeathCause::Combat);
    }
    result.vitals = v;
    result
}
