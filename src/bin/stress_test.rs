//! Random-deck stress run
//!
//! Builds many timelines from seeded random decks in parallel and checks that
//! no two live robots ever share a cell and that no robot ever stands in a
//! wall.

use std::path::PathBuf;
use std::time::Instant;

use ahash::AHashSet;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use robodeck::core::error::Result;
use robodeck::core::SimulationConfig;
use robodeck::deck::random_deck;
use robodeck::simulation::{Outcome, Session, Timeline};
use robodeck::stage::{load_stage, parse_stage, Stage};

const BUILT_IN_STAGE: &str = "\
SEEEEWEEE
EWWWEWEWE
EEEWEEEWE
WWEWWWEWE
EEEEEWEEF
";

#[derive(Parser, Debug)]
#[command(name = "stress_test")]
#[command(about = "Run random decks and verify timeline invariants")]
struct Args {
    /// Number of random decks
    #[arg(long, default_value_t = 1000)]
    runs: u64,

    /// Base seed; run i uses seed + i
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Cards per random deck
    #[arg(long, default_value_t = 6)]
    cards: usize,

    /// Robot slots per run
    #[arg(long, default_value_t = 6)]
    robots: usize,

    /// Tick cap per run
    #[arg(long, default_value_t = 500)]
    max_ticks: usize,

    /// Stage file; a small built-in maze is used when omitted
    #[arg(long)]
    stage: Option<PathBuf>,
}

#[derive(Default)]
struct Tally {
    completed: usize,
    looping: usize,
    settled: usize,
    capped: usize,
    violations: usize,
    total_ticks: usize,
}

impl Tally {
    fn merge(mut self, other: Tally) -> Tally {
        self.completed += other.completed;
        self.looping += other.looping;
        self.settled += other.settled;
        self.capped += other.capped;
        self.violations += other.violations;
        self.total_ticks += other.total_ticks;
        self
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("robodeck=warn")),
        )
        .init();

    let args = Args::parse();
    let stage = match &args.stage {
        Some(path) => load_stage(path)?,
        None => parse_stage(BUILT_IN_STAGE)?,
    };
    let config = SimulationConfig {
        robot_count: args.robots,
        max_ticks: args.max_ticks,
        ..SimulationConfig::default()
    };
    config.validate()?;

    println!(
        "=== STRESS TEST: {} decks of {} cards, {} robots, {}x{} stage ===\n",
        args.runs,
        args.cards,
        args.robots,
        stage.width(),
        stage.height()
    );

    let start = Instant::now();
    let tally = (0..args.runs)
        .into_par_iter()
        .map(|i| run_one(&stage, &config, args.seed.wrapping_add(i), args.cards))
        .reduce(Tally::default, Tally::merge);
    let elapsed = start.elapsed();

    println!("Completed: {}", tally.completed);
    println!("Looping:   {}", tally.looping);
    println!("Settled:   {}", tally.settled);
    println!("Capped:    {}", tally.capped);
    println!("Ticks:     {}", tally.total_ticks);
    println!("Time:      {:?}", elapsed);

    if tally.violations > 0 {
        println!("\nFAILED: {} invariant violations", tally.violations);
        std::process::exit(1);
    }
    println!("\nAll invariants held");
    Ok(())
}

fn run_one(stage: &Stage, config: &SimulationConfig, seed: u64, cards: usize) -> Tally {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let deck = random_deck(&mut rng, cards);

    let mut tally = Tally::default();
    // The config was validated up front, so construction cannot fail here
    let Ok(session) = Session::new(stage.clone(), deck, config.clone()) else {
        return tally;
    };
    let timeline = session.timeline();

    tally.total_ticks = timeline.max_time();
    tally.violations = count_violations(stage, timeline, seed);
    match timeline.outcome() {
        Outcome::Completed => tally.completed = 1,
        Outcome::Loop { .. } => tally.looping = 1,
        Outcome::Settled => tally.settled = 1,
        Outcome::Capped => tally.capped = 1,
    }
    tally
}

fn count_violations(stage: &Stage, timeline: &Timeline, seed: u64) -> usize {
    let mut violations = 0;
    for (tick, state) in timeline.states().iter().enumerate() {
        let mut seen = AHashSet::new();
        for robot in state.active_robots() {
            if stage.is_wall(robot.position) {
                tracing::error!(seed, tick, cell = %robot.position, "robot inside a wall");
                violations += 1;
            }
            if !seen.insert(robot.position) {
                tracing::error!(seed, tick, cell = %robot.position, "two robots share a cell");
                violations += 1;
            }
        }
    }
    violations
}
