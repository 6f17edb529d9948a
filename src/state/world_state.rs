//! WorldState - the root simulation container
//!
//! Created once with `WorldState::new` and afterwards only replaced by the
//! result of `transition`. The hex and creature maps sit behind `Arc` and are
//! copied on write, so a retained older state never sees later changes.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::log::{BehaviorLog, Notification, NotificationKind, NotificationQueue};
use super::player::PlayerState;
use crate::core::config::SimConfig;
use crate::core::error::Result;
use crate::core::types::{DeathCause, Tick};
use crate::ecology::creature::{creatures_at, population, Creature, CreatureMap};
use crate::world::features::{plan_region_features, FeatureSet, Region};
use crate::world::generation::generate_around;
use crate::world::hex::HexCoord;
use crate::world::map::{HexCell, HexMap};
use crate::world::terrain::TerrainId;
use crate::world::visibility::update_visibility;

/// Terrain of the starting hex
pub const START_TERRAIN: TerrainId = TerrainId::Plains;

/// Counts from the most recent behavior pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorStats {
    pub attempted: usize,
    pub resolved: usize,
    pub faults: usize,
    pub damage: f32,
}

#[derive(Debug, Clone)]
pub struct WorldState {
    pub(crate) config: Arc<SimConfig>,
    pub(crate) player: PlayerState,
    pub(crate) hexes: Arc<HexMap>,
    pub(crate) creatures: Arc<CreatureMap>,
    pub(crate) features: Arc<FeatureSet>,
    pub(crate) notifications: NotificationQueue,
    pub(crate) behavior_log: BehaviorLog,
    pub(crate) last_behavior: BehaviorStats,
    pub(crate) death: Option<DeathCause>,
    pub(crate) tick: Tick,
    pub(crate) selected: Option<HexCoord>,
    pub(crate) hovered: Option<HexCoord>,
    pub(crate) next_creature_id: u64,
    pub(crate) rng: ChaCha8Rng,
}

impl WorldState {
    /// Build a fresh world around the origin.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let origin = HexCoord::ORIGIN;

        let mut hexes = HexMap::new();
        let mut start = HexCell::new(origin, START_TERRAIN);
        start.visited = true;
        start.settled = true;
        hexes.insert(origin, start);

        let mut features = FeatureSet::new();
        let region = Region::new(origin, config.region_radius);
        features.add_region(region, plan_region_features(region, &mut rng));

        generate_around(
            origin,
            config.generation_radius,
            &mut hexes,
            &features,
            &config,
            &mut rng,
        );
        update_visibility(&mut hexes, &origin, config.visibility_radius);

        let mut notifications = NotificationQueue::new(config.notification_capacity);
        notifications.push(
            NotificationKind::Info,
            "You hatch on an open plain. Find food and grow.",
            0,
        );

        tracing::info!(
            "new world (seed {}): {} hexes, {} features",
            config.seed,
            hexes.len(),
            features.features().len()
        );

        Ok(Self {
            behavior_log: BehaviorLog::new(config.behavior_log_capacity),
            config: Arc::new(config),
            player: PlayerState::new(origin),
            hexes: Arc::new(hexes),
            creatures: Arc::new(CreatureMap::new()),
            features: Arc::new(features),
            notifications,
            last_behavior: BehaviorStats::default(),
            death: None,
            tick: 0,
            selected: None,
            hovered: None,
            next_creature_id: 0,
            rng,
        })
    }

    /// Default configuration with the given seed
    pub fn with_seed(seed: u64) -> Result<Self> {
        Self::new(SimConfig {
            seed,
            ..SimConfig::default()
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn hexes(&self) -> &HexMap {
        &self.hexes
    }

    pub fn hex(&self, coord: &HexCoord) -> Option<&HexCell> {
        self.hexes.get(coord)
    }

    pub fn creatures(&self) -> &CreatureMap {
        &self.creatures
    }

    pub fn creatures_at(&self, coord: &HexCoord) -> &[Creature] {
        creatures_at(&self.creatures, coord)
    }

    pub fn creature_population(&self) -> usize {
        population(&self.creatures)
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn behavior_log(&self) -> &BehaviorLog {
        &self.behavior_log
    }

    pub fn last_behavior(&self) -> BehaviorStats {
        self.last_behavior
    }

    pub fn death(&self) -> Option<DeathCause> {
        self.death
    }

    pub fn is_terminal(&self) -> bool {
        self.death.is_some()
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn selected(&self) -> Option<HexCoord> {
        self.selected
    }

    pub fn hovered(&self) -> Option<HexCoord> {
        self.hovered
    }

    /// Serializable view for presentation layers
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            tick: self.tick,
            player: self.player.clone(),
            hexes: self.hexes.values().cloned().collect(),
            creatures: self
                .creatures
                .iter()
                .flat_map(|(coord, list)| list.iter().map(move |c| (*coord, c.clone())))
                .collect(),
            notifications: self.notifications.iter().cloned().collect(),
            death: self.death,
            selected: self.selected,
            hovered: self.hovered,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub tick: Tick,
    pub player: PlayerState,
    pub hexes: Vec<HexCell>,
    pub creatures: Vec<(HexCoord, Creature)>,
    pub notifications: Vec<Notification>,
    pub death: Option<DeathCause>,
    pub selected: Option<HexCoord>,
    pub hovered: Option<HexCoord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_surrounds_player() {
        let state = WorldState::with_seed(42).unwrap();
        let config = SimConfig::default();
        assert_eq!(state.hex(&HexCoord::ORIGIN).map(|c| c.terrain), Some(START_TERRAIN));
        for coord in HexCoord::ORIGIN.hexes_in_range(config.generation_radius) {
            assert!(state.hex(&coord).is_some_and(|c| c.settled));
        }
        assert!(state.hex(&HexCoord::ORIGIN).is_some_and(|c| c.visited && c.visible));
        assert_eq!(state.features().regions().len(), 1);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = WorldState::with_seed(7).unwrap();
        let b = WorldState::with_seed(7).unwrap();
        assert_eq!(a.hexes(), b.hexes());
        assert_eq!(a.features(), b.features());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            notification_capacity: 0,
            ..SimConfig::default()
        };
        assert!(WorldState::new(config).is_err());
    }

    #[test]
    fn test_region_bounds_checked_before_planning() {
        let negative = SimConfig {
            region_radius: -1,
            region_edge_margin: -3,
            ..SimConfig::default()
        };
        assert!(matches!(
            WorldState::new(negative),
            Err(crate::core::error::SimError::Config(_))
        ));

        let tiny = SimConfig {
            region_radius: 1,
            region_edge_margin: 0,
            ..SimConfig::default()
        };
        let state = WorldState::new(tiny).unwrap();
        assert_eq!(state.features().regions().len(), 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = WorldState::with_seed(3).unwrap();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.hexes.len(), state.hexes().len());
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: StateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.player, snapshot.player);
    }
}
