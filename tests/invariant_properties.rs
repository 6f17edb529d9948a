//! Property tests over random intent sequences
//!
//! Whatever the player tries, accepted or rejected, the state stays inside
//! its bounds.

use proptest::prelude::*;

use primeval::state::player::WEIGHT_FLOOR;
use primeval::world::HexCoord;
use primeval::{transition, Intent, WorldState};

/// A state-independent description of one input; resolved against the
/// current state to pick concrete targets
#[derive(Debug, Clone)]
enum Op {
    Move(usize),
    Attack(usize),
    Behave,
    Spawn,
    Select(i32, i32),
    Hover(i32, i32),
    ClearHover,
    DismissOldest,
    AutoDismiss,
    Visibility,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..6).prop_map(Op::Move),
        2 => (0usize..8).prop_map(Op::Attack),
        2 => Just(Op::Behave),
        1 => Just(Op::Spawn),
        1 => (-6i32..=6, -6i32..=6).prop_map(|(q, r)| Op::Select(q, r)),
        1 => (-6i32..=6, -6i32..=6).prop_map(|(q, r)| Op::Hover(q, r)),
        1 => Just(Op::ClearHover),
        1 => Just(Op::DismissOldest),
        1 => Just(Op::AutoDismiss),
        1 => Just(Op::Visibility),
    ]
}

fn to_intent(state: &WorldState, op: &Op) -> Option<Intent> {
    let position = state.player().position;
    Some(match op {
        Op::Move(dir) => Intent::MovePlayer {
            target: position.neighbor(*dir),
        },
        Op::Attack(n) => {
            let targets: Vec<_> = position
                .hexes_in_range(1)
                .into_iter()
                .flat_map(|c| state.creatures_at(&c).iter().map(move |cr| (c, cr.id)))
                .collect();
            let (coord, creature_id) = *targets.get(n % targets.len().max(1))?;
            Intent::AttackCreature { coord, creature_id }
        }
        Op::Behave => Intent::ProcessCreatureBehaviors,
        Op::Spawn => Intent::SpawnCreatures { coord: position },
        Op::Select(q, r) => Intent::SelectHex {
            coord: HexCoord::new(position.q + q, position.r + r),
        },
        Op::Hover(q, r) => Intent::HoverHex {
            coord: HexCoord::new(*q, *r),
        },
        Op::ClearHover => Intent::ClearHover,
        Op::DismissOldest => Intent::DismissNotification {
            id: state.notifications().iter().next()?.id,
        },
        Op::AutoDismiss => Intent::AutoDismissNotifications,
        Op::Visibility => Intent::UpdateVisibility,
    })
}

fn check_bounds(state: &WorldState) -> Result<(), TestCaseError> {
    let player = state.player();
    prop_assert!((0.0..=100.0).contains(&player.fitness), "fitness {}", player.fitness);
    prop_assert!((0.0..=100.0).contains(&player.energy), "energy {}", player.energy);
    prop_assert!(player.weight >= WEIGHT_FLOOR);
    prop_assert!(player.weight.is_finite() && player.score.is_finite());
    prop_assert!(state.notifications().len() <= state.config().notification_capacity);
    prop_assert!(state.behavior_log().len() <= state.config().behavior_log_capacity);
    prop_assert!(state.hex(&player.position).is_some());
    for (coord, list) in state.creatures() {
        prop_assert!(!list.is_empty(), "empty creature list at {:?}", coord);
        prop_assert!(list.len() <= state.config().max_creatures_per_hex);
        prop_assert!(state.hex(coord).is_some());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_random_play_stays_in_bounds(
        seed in 0u64..1000,
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let mut state = WorldState::with_seed(seed).unwrap();
        check_bounds(&state)?;

        for op in &ops {
            let Some(intent) = to_intent(&state, op) else {
                continue;
            };
            let level = state.player().level;
            let tick = state.tick();
            let discovered: Vec<HexCoord> = state
                .hexes()
                .values()
                .filter(|c| c.discovered)
                .map(|c| c.coord)
                .collect();

            match transition(&state, intent) {
                Ok(next) => {
                    check_bounds(&next)?;
                    prop_assert!(next.player().level >= level);
                    prop_assert!(next.tick() >= tick);
                    for coord in &discovered {
                        prop_assert!(next.hex(coord).is_some_and(|c| c.discovered));
                    }
                    state = next;
                }
                Err(_) => {
                    check_bounds(&state)?;
                }
            }
            if state.is_terminal() {
                prop_assert!(transition(&state, Intent::ClearHover).is_err());
                break;
            }
        }
    }

    #[test]
    fn test_visibility_is_idempotent(
        seed in 0u64..1000,
        steps in prop::collection::vec(0usize..6, 0..12),
    ) {
        let mut state = WorldState::with_seed(seed).unwrap();
        for dir in steps {
            let target = state.player().position.neighbor(dir);
            if let Ok(next) = transition(&state, Intent::MovePlayer { target }) {
                if next.is_terminal() {
                    break;
                }
                state = next;
            }
        }
        let once = transition(&state, Intent::UpdateVisibility).unwrap();
        let twice = transition(&once, Intent::UpdateVisibility).unwrap();
        prop_assert_eq!(once.hexes(), state.hexes());
        prop_assert_eq!(twice.hexes(), once.hexes());
    }
}
