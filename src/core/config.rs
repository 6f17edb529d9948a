//! Simulation configuration with documented constants
//!
//! Tunables that shape pacing live here. Formula constants that define the
//! combat math stay in `combat::constants`; per-rule generation odds stay next
//! to the rules in `world::generation`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the simulation systems
///
/// Carried inside `WorldState` behind an `Arc`; there is no global copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the world RNG. Two worlds with the same seed and the same
    /// intent sequence are identical.
    pub seed: u64,

    // === WORLD GENERATION ===
    /// Hexes within this distance of the player are generated after each move
    pub generation_radius: u32,

    /// Radius of one macro-planning region (hexes)
    ///
    /// Mountain ranges, rivers, migration routes and volcanic clusters are
    /// placed inside this radius around the region center.
    pub region_radius: i32,

    /// A new region is planned when the player is within this many hexes of
    /// the edge of every planned region
    pub region_edge_margin: i32,

    /// Probability of continuing the dominant neighbor category when no
    /// ecological rule fires
    pub continue_category_chance: f32,

    /// Probability that a riverbank between river cells becomes a lake
    pub lake_conversion_chance: f32,

    // === VISIBILITY ===
    /// Base sight radius before the player hex's visibility contribution
    pub visibility_radius: i32,

    // === ECOLOGY ===
    /// Hard cap on creatures sharing one hex
    pub max_creatures_per_hex: usize,

    /// Bernoulli trials allowed per spawn request
    pub max_spawn_attempts: usize,

    /// Chance that a creature evaluates its behavior policy on a tick
    pub behavior_trigger_chance: f32,

    /// Creatures farther than this from the anchor do not act
    pub behavior_radius: i32,

    // === COMBAT ===
    /// Width of the uniform noise band around 1.0 applied to combat ratios
    ///
    /// At 0.2 the noise is drawn from [0.8, 1.2].
    pub combat_noise_band: f32,

    // === LOGS ===
    /// Maximum queued notifications; oldest are evicted
    pub notification_capacity: usize,

    /// Notifications older than this many ticks are auto-dismissed
    pub notification_ttl: u64,

    /// Maximum behavior log entries; oldest are evicted
    pub behavior_log_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1977,

            generation_radius: 4,
            region_radius: 14,
            region_edge_margin: 5,
            continue_category_chance: 0.65,
            lake_conversion_chance: 0.15,

            visibility_radius: 2,

            max_creatures_per_hex: 3,
            max_spawn_attempts: 12,
            behavior_trigger_chance: 0.4,
            behavior_radius: 4,

            combat_noise_band: 0.2,

            notification_capacity: 5,
            notification_ttl: 6,
            behavior_log_capacity: 50,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) TOML document. Missing keys keep defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("continue_category_chance", self.continue_category_chance),
            ("lake_conversion_chance", self.lake_conversion_chance),
            ("behavior_trigger_chance", self.behavior_trigger_chance),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "{} ({}) must be within [0, 1]",
                    name, p
                )));
            }
        }

        if !(0.0..1.0).contains(&self.combat_noise_band) {
            return Err(ConfigError::Invalid(format!(
                "combat_noise_band ({}) must be within [0, 1)",
                self.combat_noise_band
            )));
        }

        if self.region_radius < 1 || self.region_edge_margin < 0 {
            return Err(ConfigError::Invalid(format!(
                "region_radius ({}) must be at least 1 and region_edge_margin ({}) non-negative",
                self.region_radius, self.region_edge_margin
            )));
        }

        if self.region_edge_margin >= self.region_radius {
            return Err(ConfigError::Invalid(format!(
                "region_edge_margin ({}) should be < region_radius ({})",
                self.region_edge_margin, self.region_radius
            )));
        }

        if self.generation_radius == 0 || self.visibility_radius < 1 {
            return Err(ConfigError::Invalid(
                "generation_radius and visibility_radius must be at least 1".into(),
            ));
        }

        if self.max_creatures_per_hex == 0
            || self.notification_capacity == 0
            || self.behavior_log_capacity == 0
        {
            return Err(ConfigError::Invalid("capacities must be positive".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimConfig::from_toml_str("seed = 7\nnotification_capacity = 3\n").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.notification_capacity, 3);
        assert_eq!(config.region_radius, SimConfig::default().region_radius);
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let result = SimConfig::from_toml_str("behavior_trigger_chance = 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = SimConfig::from_toml_str("seed = [");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_margin_must_fit_region() {
        let config = SimConfig {
            region_edge_margin: 20,
            region_radius: 10,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_region_rejected() {
        let config = SimConfig {
            region_radius: -1,
            region_edge_margin: -3,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = SimConfig {
            region_edge_margin: -1,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());

        let smallest = SimConfig {
            region_radius: 1,
            region_edge_margin: 0,
            ..SimConfig::default()
        };
        assert!(smallest.validate().is_ok());
    }
}
