//! Reducer integration tests
//!
//! Whole runs through `transition`: determinism, immutability of prior
//! states, notification expiry, restart and config loading.

use primeval::core::ConfigError;
use primeval::world::HexCoord;
use primeval::{transition, Intent, SimConfig, SimError, WorldState};

/// A neighbor the player can enter without dying on arrival
fn safe_step(state: &WorldState) -> Option<HexCoord> {
    let player = state.player();
    let mut options: Vec<HexCoord> = player
        .position
        .neighbors()
        .into_iter()
        .filter(|c| {
            state.hex(c).is_some_and(|cell| {
                let info = cell.terrain.info();
                info.passable
                    && info.hazard.is_none()
                    && info.min_weight.map_or(true, |w| player.weight >= w)
            })
        })
        .collect();
    options.sort_by_key(|c| state.hex(c).map_or(true, |cell| cell.visited));
    options.first().copied()
}

fn walk(seed: u64, steps: usize) -> Vec<WorldState> {
    let mut states = vec![WorldState::with_seed(seed).unwrap()];
    for _ in 0..steps {
        let current = states.last().unwrap();
        if current.is_terminal() {
            break;
        }
        let Some(target) = safe_step(current) else {
            break;
        };
        let next = transition(current, Intent::MovePlayer { target }).unwrap();
        states.push(next);
    }
    states
}

#[test]
fn test_same_seed_same_run() {
    let a = walk(1234, 25);
    let b = walk(1234, 25);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.snapshot(), y.snapshot());
    }
}

#[test]
fn test_prior_states_unchanged() {
    let states = walk(88, 15);
    let first = WorldState::with_seed(88).unwrap();
    assert_eq!(states[0].snapshot(), first.snapshot());
    for pair in states.windows(2) {
        assert!(pair[0].tick() < pair[1].tick());
        assert!(pair[0].hexes().len() <= pair[1].hexes().len());
    }
}

#[test]
fn test_world_grows_around_player() {
    let states = walk(3, 20);
    let last = states.last().unwrap();
    let radius = last.config().generation_radius;
    if !last.is_terminal() {
        for coord in last.player().position.hexes_in_range(radius) {
            assert!(last.hex(&coord).is_some_and(|c| c.settled), "{:?} missing", coord);
        }
    }
    assert!(last.hexes().len() >= states[0].hexes().len());
}

#[test]
fn test_rejected_intent_leaves_state_alone() {
    let state = WorldState::with_seed(19).unwrap();
    let before = state.snapshot();
    assert!(transition(&state, Intent::MovePlayer { target: HexCoord::new(5, 5) }).is_err());
    assert!(transition(&state, Intent::SelectHex { coord: HexCoord::new(40, 0) }).is_err());
    assert!(transition(&state, Intent::SpawnCreatures { coord: HexCoord::new(40, 0) }).is_err());
    assert_eq!(state.snapshot(), before);
}

#[test]
fn test_behavior_tick_advances_clock_and_logs() {
    let mut state = WorldState::with_seed(61).unwrap();
    for _ in 0..10 {
        if state.is_terminal() {
            break;
        }
        let next = transition(&state, Intent::ProcessCreatureBehaviors).unwrap();
        assert_eq!(next.tick(), state.tick() + 1);
        assert!(next.behavior_log().len() <= next.config().behavior_log_capacity);
        state = next;
    }
}

#[test]
fn test_notifications_expire_with_time() {
    let mut state = WorldState::with_seed(70).unwrap();
    let ttl = state.config().notification_ttl;
    assert_eq!(state.creature_population(), 0);
    for _ in 0..=ttl {
        state = transition(&state, Intent::ProcessCreatureBehaviors).unwrap();
    }
    assert!(!state.is_terminal());
    let state = transition(&state, Intent::AutoDismissNotifications).unwrap();
    assert!(state.notifications().is_empty(), "welcome notice should have expired");
}

#[test]
fn test_restart_with_seed_matches_fresh_world() {
    let states = walk(500, 8);
    let last = states.last().unwrap();
    let restarted = transition(last, Intent::Restart { seed: Some(9) }).unwrap();
    let fresh = WorldState::with_seed(9).unwrap();
    assert_eq!(restarted.snapshot(), fresh.snapshot());
    assert_eq!(restarted.tick(), 0);
}

#[test]
fn test_restart_without_seed_is_reproducible() {
    let state = WorldState::with_seed(14).unwrap();
    let a = transition(&state, Intent::Restart { seed: None }).unwrap();
    let b = transition(&state, Intent::Restart { seed: None }).unwrap();
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.player().moves, 0);
}

#[test]
fn test_config_from_toml_keeps_defaults() {
    let config = SimConfig::from_toml_str("seed = 5\nvisibility_radius = 3\n").unwrap();
    assert_eq!(config.seed, 5);
    assert_eq!(config.visibility_radius, 3);
    assert_eq!(config.max_creatures_per_hex, SimConfig::default().max_creatures_per_hex);

    let state = WorldState::new(config).unwrap();
    assert_eq!(state.config().visibility_radius, 3);
}

#[test]
fn test_config_rejects_bad_input() {
    assert!(matches!(
        SimConfig::from_toml_str("seed = \"not a number\""),
        Err(ConfigError::Parse(_))
    ));
    let invalid = SimConfig {
        max_creatures_per_hex: 0,
        ..SimConfig::default()
    };
    assert!(matches!(WorldState::new(invalid), Err(SimError::Config(_))));
}
