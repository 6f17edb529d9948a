//! Primeval - headless driver
//!
//! Plays a seeded run with a simple forage policy and prints a summary.
//! Useful for eyeballing balance changes and for reproducing a seed.

use std::path::PathBuf;

use clap::Parser;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use primeval::combat::resolution::player_fierceness;
use primeval::core::error::Result;
use primeval::core::SimConfig;
use primeval::state::{transition, Intent, WorldState};
use primeval::world::map::passable_neighbors;
use primeval::world::HexCoord;

#[derive(Parser, Debug)]
#[command(name = "primeval")]
#[command(about = "Run a headless Primeval survival simulation")]
struct Args {
    /// World seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum player turns
    #[arg(long, default_value_t = 200)]
    turns: u32,

    /// Optional TOML config file; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    turns: u32,
    moves: u64,
    level: u8,
    weight: f32,
    energy: f32,
    fitness: f32,
    score: f32,
    death: Option<String>,
    hexes: usize,
    regions: usize,
    creatures: usize,
}

/// Something the player can safely eat from where it stands
fn pick_prey(state: &WorldState) -> Option<Intent> {
    let player = state.player();
    let strength = player_fierceness(player.weight, player.fitness).max(1.0);
    player.position.hexes_in_range(1).into_iter().find_map(|coord| {
        state
            .creatures_at(&coord)
            .iter()
            .find(|c| c.species.descriptor().danger * c.size < strength)
            .map(|c| Intent::AttackCreature {
                coord,
                creature_id: c.id,
            })
    })
}

/// A neighbor that will not kill the player outright, unvisited first
fn pick_step(state: &WorldState, rng: &mut ChaCha8Rng) -> Option<HexCoord> {
    let player = state.player();
    let mut safe: Vec<HexCoord> = passable_neighbors(state.hexes(), &player.position)
        .into_iter()
        .filter(|c| {
            state.hex(c).is_some_and(|cell| {
                let info = cell.terrain.info();
                info.hazard.is_none() && info.min_weight.map_or(true, |w| player.weight >= w)
            })
        })
        .collect();
    safe.shuffle(rng);
    safe.iter()
        .find(|c| state.hex(c).is_some_and(|cell| !cell.visited))
        .or_else(|| safe.first())
        .copied()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("primeval=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    config.seed = args.seed.unwrap_or_else(rand::random);
    let seed = config.seed;

    let mut state = WorldState::new(config)?;
    let mut policy_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    tracing::info!("starting run with seed {}", seed);

    let mut turns = 0;
    while turns < args.turns && !state.is_terminal() {
        turns += 1;
        let intent = match pick_prey(&state) {
            Some(attack) => attack,
            None => match pick_step(&state, &mut policy_rng) {
                Some(target) => Intent::MovePlayer { target },
                None => Intent::ProcessCreatureBehaviors,
            },
        };
        match transition(&state, intent) {
            Ok(next) => state = next,
            Err(e) => tracing::warn!("turn {} rejected: {}", turns, e),
        }
        if !state.is_terminal() {
            state = transition(&state, Intent::AutoDismissNotifications)?;
        }
    }

    let player = state.player();
    let summary = RunSummary {
        seed,
        turns,
        moves: player.moves,
        level: player.level,
        weight: player.weight,
        energy: player.energy,
        fitness: player.fitness,
        score: player.score,
        death: state.death().map(|d| d.to_string()),
        hexes: state.hexes().len(),
        regions: state.features().regions().len(),
        creatures: state.creature_population(),
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("=== PRIMEVAL (seed {}) ===", summary.seed);
        println!("Turns played: {}  Moves: {}", summary.turns, summary.moves);
        println!(
            "Level {}  Weight {:.2} kg  Energy {:.1}  Fitness {:.1}",
            summary.level, summary.weight, summary.energy, summary.fitness
        );
        println!("Score: {:.1}", summary.score);
        match &summary.death {
            Some(cause) => println!("Died: {}", cause),
            None => println!("Survived"),
        }
        println!(
            "World: {} hexes, {} regions, {} creatures",
            summary.hexes, summary.regions, summary.creatures
        );
        for n in state.notifications().iter() {
            println!("  [{:?}] {}", n.kind, n.message);
        }
    }

    Ok(())
}
