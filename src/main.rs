//! RoboDeck - Command line runner
//!
//! Loads a stage and a deck, precomputes the timeline and prints it either as
//! a readable report or as JSON.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use robodeck::core::error::Result;
use robodeck::core::types::{Cell, Tick};
use robodeck::core::SimulationConfig;
use robodeck::deck::load_deck;
use robodeck::robot::{Direction, Heading};
use robodeck::simulation::{Outcome, Session, StageState};
use robodeck::stage::load_stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Run a deck of rule cards against a stage
#[derive(Parser, Debug)]
#[command(name = "robodeck")]
#[command(about = "Simulate robots playing a rule deck on a grid stage")]
struct Args {
    /// Stage text file
    #[arg(long)]
    stage: PathBuf,

    /// Deck text file
    #[arg(long)]
    deck: PathBuf,

    /// TOML file with simulation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of robot slots (overrides the config file)
    #[arg(long)]
    robots: Option<usize>,

    /// Tick cap (overrides the config file)
    #[arg(long)]
    max_ticks: Option<usize>,

    /// Do not terminate robots standing on the exit
    #[arg(long)]
    no_touch_exit: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Report the first tick a robot reaches this cell, given as X,Y
    #[arg(long)]
    break_at: Option<Cell>,
}

#[derive(Serialize)]
struct Report<'a> {
    outcome: Outcome,
    max_time: Tick,
    loop_time: Option<Tick>,
    first_break: Option<Tick>,
    states: &'a [StageState],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("robodeck=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(robots) = args.robots {
        config.robot_count = robots;
    }
    if let Some(max_ticks) = args.max_ticks {
        config.max_ticks = max_ticks;
    }
    if args.no_touch_exit {
        config.touch_exit = false;
    }

    let stage = load_stage(&args.stage)?;
    let deck = load_deck(&args.deck)?;
    tracing::info!(
        width = stage.width(),
        height = stage.height(),
        cards = deck.len(),
        "loaded puzzle"
    );

    let session = Session::new(stage, deck, config)?;
    let timeline = session.timeline();
    let first_break = args.break_at.and_then(|cell| session.first_break(cell, 0));

    match args.format {
        Format::Json => {
            let report = Report {
                outcome: timeline.outcome(),
                max_time: timeline.max_time(),
                loop_time: timeline.loop_time(),
                first_break,
                states: timeline.states(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Format::Text => {
            println!("Outcome:   {:?}", timeline.outcome());
            println!("Max time:  {}", timeline.max_time());
            match timeline.loop_time() {
                Some(t) => println!("Loop time: {}", t),
                None => println!("Loop time: none"),
            }
            if let Some(cell) = args.break_at {
                match first_break {
                    Some(t) => println!("Break at {}: tick {}", cell, t),
                    None => println!("Break at {}: never reached", cell),
                }
            }
            println!();
            for (tick, state) in timeline.states().iter().enumerate() {
                let robots: Vec<String> = state
                    .robots
                    .iter()
                    .enumerate()
                    .map(|(slot, r)| {
                        let action = state
                            .actions
                            .get(slot)
                            .map(|a| format!("{:?}", a))
                            .unwrap_or_default();
                        format!("#{} {}{} {}", slot, describe(r.direction), r.position, action)
                    })
                    .collect();
                println!("{:>4}: {}", tick, robots.join(" | "));
            }
        }
    }

    Ok(())
}

fn describe(direction: Direction) -> &'static str {
    match direction {
        Direction::Facing(h) => match h {
            Heading::Up => "^",
            Heading::Right => ">",
            Heading::Down => "v",
            Heading::Left => "<",
        },
        Direction::Spawning => "+",
        Direction::Despawned => "x",
    }
}
