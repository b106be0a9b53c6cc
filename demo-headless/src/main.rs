//! Headless wildfire demo
//!
//! Seeds a random forest, runs the automaton until it terminates (or a tick
//! cap is hit) and prints the burned/survived/obstacle series as a table.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package demo-headless -- --preset windswept --show-grid
//! RUST_LOG=debug cargo run --package demo-headless -- --width 40 --height 20
//! ```

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wildfire_core::{
    CellCategory, Grid, SimulationController, SimulationParameters, SimulationState,
    WildfireError, WindMode,
};

/// Wildfire cellular automaton with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "wildfire-demo")]
#[command(about = "Probabilistic wildfire spread simulation", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 150)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 75)]
    height: usize,

    /// Initial vegetation density (0-1)
    #[arg(short, long, default_value_t = 0.8)]
    density: f32,

    /// RNG seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Parameter preset (classic, windswept, regrowth)
    #[arg(short, long, default_value = "classic")]
    preset: String,

    /// Chance a burning cell ignites a neighbour (overrides preset)
    #[arg(long)]
    ignition_probability: Option<f32>,

    /// Chance bare ground regrows per tick (overrides preset)
    #[arg(long)]
    rebirth_probability: Option<f32>,

    /// Upwind spread multiplier (overrides preset)
    #[arg(long)]
    wind_decay: Option<f32>,

    /// Ticks a cell burns (overrides preset)
    #[arg(long)]
    burn_duration: Option<u32>,

    /// Ticks of ash before regrowth (overrides preset)
    #[arg(long)]
    burned_duration: Option<u32>,

    /// Wind mode (calm, unidirectional, diagonal) (overrides preset)
    #[arg(short, long)]
    wind: Option<String>,

    /// Reignite a random cell whenever the fire goes out
    #[arg(long)]
    reignite: bool,

    /// Stop after this many ticks even if the run has not terminated
    #[arg(short, long, default_value_t = 1000)]
    max_ticks: u64,

    /// Print a report row every N ticks
    #[arg(short, long, default_value_t = 10)]
    report_interval: u64,

    /// Wall-clock delay between ticks in milliseconds
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,

    /// Print the grid as text at every report
    #[arg(long)]
    show_grid: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn build_parameters(args: &Args) -> Result<SimulationParameters, WildfireError> {
    let mut params = SimulationParameters::preset(&args.preset)?;
    if let Some(p) = args.ignition_probability {
        params = params.with_ignition_probability(p);
    }
    if let Some(p) = args.rebirth_probability {
        params = params.with_rebirth_probability(p);
    }
    if let Some(f) = args.wind_decay {
        params = params.with_wind_decay_factor(f);
    }
    if let Some(t) = args.burn_duration {
        params = params.with_burn_duration(t);
    }
    if let Some(t) = args.burned_duration {
        params = params.with_burned_duration(t);
    }
    if let Some(wind) = &args.wind {
        params = params.with_wind_mode(wind.parse::<WindMode>()?);
    }
    if args.reignite {
        params = params.with_reignite(true);
    }
    params.validate()?;
    Ok(params)
}

fn run(args: &Args) -> Result<(), WildfireError> {
    let params = build_parameters(args)?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);

    println!("=== Wildfire Simulation ===\n");
    println!(
        "Grid: {}x{}, density {:.2}, seed {}",
        args.width, args.height, args.density, seed
    );
    println!(
        "Ignition {:.2}, rebirth {:.3}, wind {} (decay {:.2}), burn {} ticks, ash {} ticks, reignite {}\n",
        params.ignition_probability,
        params.rebirth_probability,
        params.wind_mode,
        params.wind_decay_factor,
        params.burn_duration,
        params.burned_duration,
        params.reignite
    );

    let mut sim = SimulationController::new(args.width, args.height, params)?;
    let (y, x) = sim.seed_random(args.density, &mut rng)?;
    info!("Fire started at ({}, {})", y, x);

    println!("   Tick | Burning | Burned | Survived | Obstacles | Event");
    println!("--------|---------|--------|----------|-----------|------------");
    print_row(&sim, "seeded");
    if args.show_grid {
        print_frame(sim.grid());
    }

    let report_interval = args.report_interval.max(1);
    let mut reignitions = 0u64;
    while sim.tick() < args.max_ticks && !sim.is_terminated() {
        let state = sim.step(&mut rng);
        let event = match state {
            SimulationState::ExtinguishedRepeat => {
                reignitions += 1;
                "reignited"
            }
            SimulationState::Terminated => "terminated",
            SimulationState::Running => "",
        };

        if sim.tick() % report_interval == 0 || !event.is_empty() {
            print_row(&sim, event);
            if args.show_grid {
                print_frame(sim.grid());
            }
        }

        if args.interval_ms > 0 {
            thread::sleep(Duration::from_millis(args.interval_ms));
        }
    }

    let stats = sim.stats();
    let series = sim.series();
    let peak_burned = series.burned().into_iter().max().unwrap_or(0);

    println!("\n=== Simulation Complete ===");
    println!("Ticks run: {}", sim.tick());
    println!("Terminated: {}", sim.is_terminated());
    println!("Reignitions: {}", reignitions);
    println!("Final burned area: {} cells", stats.burned());
    println!("Final surviving vegetation: {} cells", stats.survived());
    println!("Final obstacles: {} cells", stats.obstacles());
    println!("Peak burned area: {} cells", peak_burned);
    println!("Snapshots recorded: {}", series.len());
    Ok(())
}

fn print_row(sim: &SimulationController, event: &str) {
    let stats = sim.stats();
    println!(
        "{:7} | {:7} | {:6} | {:8} | {:9} | {}",
        sim.tick(),
        stats.burning(),
        stats.burned(),
        stats.survived(),
        stats.obstacles(),
        event
    );
}

fn print_frame(grid: &Grid) {
    let mut frame = String::with_capacity((grid.width() + 1) * grid.height());
    for row in grid.cells().chunks(grid.width()) {
        frame.extend(row.iter().map(|c| CellCategory::of(c).glyph()));
        frame.push('\n');
    }
    println!("{frame}");
}
