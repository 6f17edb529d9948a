//! Player state and per-move physiology

use serde::{Deserialize, Serialize};

use crate::combat::constants::{HATCHLING_WEIGHT, MAX_LEVEL};
use crate::combat::resolution::{level_for_weight, PlayerVitals};
use crate::core::guard::{clamp_stat, finite_or, safe_ln};
use crate::core::types::DeathCause;
use crate::world::hex::HexCoord;
use crate::world::terrain::TerrainId;

/// Weight never drops below this
pub const WEIGHT_FLOOR: f32 = 0.5;
/// Fraction of weight above the floor burned per move
pub const METABOLIC_LOSS_RATE: f32 = 0.003;
/// Energy cost growth per e-fold of weight above hatchling
pub const ENERGY_WEIGHT_SCALE: f32 = 0.1;
/// Fitness lost when a terrain risk roll fails
pub const TERRAIN_INJURY: f32 = 8.0;
pub const PASSIVE_HEAL: f32 = 0.5;
/// Passive healing only happens above this energy
pub const HEAL_ENERGY_THRESHOLD: f32 = 30.0;

pub const START_WEIGHT: f32 = 1.0;
pub const START_ENERGY: f32 = 80.0;
pub const START_FITNESS: f32 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: HexCoord,
    /// Growth level, 1-based; never decreases
    pub level: u8,
    pub weight: f32,
    pub energy: f32,
    pub fitness: f32,
    pub score: f32,
    pub moves: u64,
}

impl PlayerState {
    pub fn new(position: HexCoord) -> Self {
        Self {
            position,
            level: 1,
            weight: START_WEIGHT,
            energy: START_ENERGY,
            fitness: START_FITNESS,
            score: 0.0,
            moves: 0,
        }
    }

    pub fn vitals(&self) -> PlayerVitals {
        PlayerVitals {
            weight: self.weight,
            fitness: self.fitness,
            energy: self.energy,
            level: self.level,
            score: self.score,
        }
    }

    /// Take combat results back, re-applying the stat bounds
    pub fn apply_vitals(&mut self, vitals: PlayerVitals) {
        self.weight = finite_or(vitals.weight, self.weight, "weight").max(WEIGHT_FLOOR);
        self.fitness = clamp_stat(vitals.fitness, "fitness");
        self.energy = clamp_stat(vitals.energy, "energy");
        self.score = finite_or(vitals.score, self.score, "score");
    }

    /// Energy needed to enter `terrain` at the current weight
    pub fn move_energy_cost(&self, terrain: TerrainId) -> f32 {
        let log_weight = safe_ln(self.weight / HATCHLING_WEIGHT, 0.0, "move weight");
        let multiplier = (1.0 + ENERGY_WEIGHT_SCALE * log_weight).max(0.5);
        terrain.info().energy_cost * multiplier
    }

    pub fn spend_energy(&mut self, amount: f32) {
        self.energy = clamp_stat(self.energy - amount, "energy");
    }

    /// Lose a fraction of the weight above the floor
    pub fn metabolize(&mut self) {
        let above = (self.weight - WEIGHT_FLOOR).max(0.0);
        self.weight = WEIGHT_FLOOR + above * (1.0 - METABOLIC_LOSS_RATE);
    }

    /// Apply terrain injury when `roll` falls under the terrain's risk.
    /// Returns the fitness lost.
    pub fn take_terrain_risk(&mut self, terrain: TerrainId, roll: f32) -> f32 {
        if roll < terrain.info().fitness_risk {
            self.injure(TERRAIN_INJURY);
            TERRAIN_INJURY
        } else {
            0.0
        }
    }

    pub fn injure(&mut self, amount: f32) {
        self.fitness = clamp_stat(self.fitness - amount, "fitness");
    }

    pub fn heal(&mut self) {
        if self.energy > HEAL_ENERGY_THRESHOLD {
            self.fitness = clamp_stat(self.fitness + PASSIVE_HEAL, "fitness");
        }
    }

    /// Raise the level to match the current weight. Returns the new level
    /// if it changed.
    pub fn grow(&mut self) -> Option<u8> {
        let earned = level_for_weight(self.weight).min(MAX_LEVEL);
        if earned > self.level {
            self.level = earned;
            Some(earned)
        } else {
            None
        }
    }

    /// Death from exhausted stats, if any
    pub fn exhaustion(&self) -> Option<DeathCause> {
        if self.energy <= 0.0 {
            Some(DeathCause::Starved)
        } else if self.fitness <= 0.0 {
            Some(DeathCause::Injuries)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player() {
        let p = PlayerState::new(HexCoord::ORIGIN);
        assert_eq!(p.level, 1);
        assert_eq!(p.weight, START_WEIGHT);
        assert!(p.exhaustion().is_none());
    }

    #[test]
    fn test_metabolism_approaches_floor() {
        let mut p = PlayerState::new(HexCoord::ORIGIN);
        for _ in 0..10_000 {
            p.metabolize();
        }
        assert!(p.weight >= WEIGHT_FLOOR);
        assert!(p.weight < WEIGHT_FLOOR + 0.01);
    }

    #[test]
    fn test_heavier_moves_cost_more() {
        let mut p = PlayerState::new(HexCoord::ORIGIN);
        let light = p.move_energy_cost(TerrainId::Plains);
        assert_eq!(light, 2.0);
        p.weight = 100.0;
        assert!(p.move_energy_cost(TerrainId::Plains) > light);
    }

    #[test]
    fn test_growth_is_monotonic() {
        let mut p = PlayerState::new(HexCoord::ORIGIN);
        p.weight = 20.0;
        assert_eq!(p.grow(), Some(3));
        p.weight = 2.0;
        assert_eq!(p.grow(), None);
        assert_eq!(p.level, 3);
    }

    #[test]
    fn test_terrain_risk() {
        let mut p = PlayerState::new(HexCoord::ORIGIN);
        assert_eq!(p.take_terrain_risk(TerrainId::Badlands, 0.5), 0.0);
        assert_eq!(p.take_terrain_risk(TerrainId::Badlands, 0.0), TERRAIN_INJURY);
        assert_eq!(p.fitness, START_FITNESS - TERRAIN_INJURY);
    }

    #[test]
    fn test_exhaustion_causes() {
        let mut p = PlayerState::new(HexCoord::ORIGIN);
        p.spend_energy(500.0);
        assert_eq!(p.energy, 0.0);
        assert_eq!(p.exhaustion(), Some(DeathCause::Starved));
        let mut p = PlayerState::new(HexCoord::ORIGIN);
        p.injure(150.0);
        assert_eq!(p.exhaustion(), Some(DeathCause::Injuries));
    }

    #[test]
    fn test_apply_vitals_clamps() {
        let mut p = PlayerState::new(HexCoord::ORIGIN);
        let mut v = p.vitals();
        v.energy = 140.0;
        v.fitness = f32::NAN;
        v.weight = 0.1;
        p.apply_vitals(v);
        assert_eq!(p.energy, 100.0);
        assert_eq!(p.fitness, 0.0);
        assert_eq!(p.weight, WEIGHT_FLOOR);
    }
}
