//! Lane Escape headless runner
//!
//! Drives the simulation with the autopilot at a fixed frame time. The
//! windowed frontend is a separate adapter; this binary is for balance
//! checks and replays.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lane_escape::sim::{RunState, autopilot, tick};
use lane_escape::{Tuning, logging};

/// Run an autopilot session and report how it went
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Simulated time to run for (seconds)
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// Frame duration fed to each tick (ms)
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,

    /// JSON balance overrides
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    // Long stalls would tunnel traffic through the player
    let frame_ms = args.frame_ms.clamp(1.0, 100.0);
    let frames = (args.seconds.max(0.0) * 1000.0 / frame_ms) as u64;

    let mut state = RunState::with_tuning(args.seed, tuning);
    for _ in 0..frames {
        let input = autopilot::drive(&state.snapshot());
        if input.restart {
            break;
        }
        tick(&mut state, &input, frame_ms);
    }

    let snapshot = state.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!(
            "seed {}: escaped {} cars, heat level {}, pace {:.1}x{}",
            args.seed,
            snapshot.score,
            snapshot.score_tier,
            snapshot.pace,
            if snapshot.is_over { " (caught)" } else { "" }
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);
    log::info!("Lane Escape (headless) starting...");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
