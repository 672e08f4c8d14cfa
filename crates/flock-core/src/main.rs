//! Flock Simulation Engine
//!
//! Headless runner: builds a flock from tuning parameters, steps it for a
//! number of frames and writes JSON snapshots for offline viewing.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use flock_core::config::{FlockConfig, DEFAULT_TUNING_PATH};
use flock_core::output::{
    generate_snapshot, write_current_state, write_snapshot_to_dir, SnapshotGenerator,
};
use flock_core::{SimError, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "flock_sim")]
#[command(about = "A headless boids flocking simulation")]
struct Args {
    /// Tuning file; missing files fall back to defaults
    #[arg(long, default_value = DEFAULT_TUNING_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Number of agents to spawn
    #[arg(long, allow_negative_numbers = true)]
    agents: Option<i64>,

    /// Nominal frame time in seconds
    #[arg(long)]
    delta_time: Option<f32>,

    /// Interval between world snapshots (in frames)
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for snapshot output
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    /// Apply command line overrides on top of the file configuration
    fn apply(&self, config: &mut FlockConfig) {
        if let Some(seed) = self.seed {
            config.world.seed = seed;
        }
        if let Some(ticks) = self.ticks {
            config.simulation.ticks = ticks;
        }
        if let Some(agents) = self.agents {
            config.world.number_to_spawn = agents;
        }
        if let Some(delta_time) = self.delta_time {
            config.simulation.delta_time = delta_time;
        }
        if let Some(interval) = self.snapshot_interval {
            config.simulation.snapshot_interval = interval;
        }
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn run(args: &Args) -> Result<(), SimError> {
    let mut config = FlockConfig::load_or_default(&args.config)?;
    args.apply(&mut config);
    config.validate()?;

    if args.print_config {
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    info!(
        seed = config.world.seed,
        agents = config.world.number_to_spawn,
        ticks = config.simulation.ticks,
        delta_time = config.simulation.delta_time,
        "Starting flock simulation"
    );

    std::fs::create_dir_all(&args.output)?;

    let ticks = config.simulation.ticks;
    let mut generator = SnapshotGenerator::new(config.simulation.snapshot_interval);
    let mut sim = Simulation::new(config)?;

    emit_snapshot(&sim, &mut generator, "simulation_start", &args.output);

    for _ in 0..ticks {
        let report = sim.step_frame();

        if report.refreshed {
            info!(
                tick = report.tick,
                elapsed = sim.clock().elapsed(),
                steering = report.steering,
                "Neighbor caches refreshed"
            );
        }

        if generator.should_snapshot(report.tick) {
            emit_snapshot(&sim, &mut generator, "periodic", &args.output);
        }
    }

    let final_snapshot = emit_snapshot(&sim, &mut generator, "simulation_end", &args.output);
    info!(
        ticks,
        elapsed = sim.clock().elapsed(),
        refreshes = sim.refresh_count(),
        polarization = final_snapshot.metrics.polarization,
        snapshots = generator.snapshot_count(),
        last_snapshot_tick = generator.last_snapshot_tick(),
        "Simulation complete"
    );

    Ok(())
}

/// Generate and write a snapshot; write failures are logged, not fatal
fn emit_snapshot(
    sim: &Simulation,
    generator: &mut SnapshotGenerator,
    triggered_by: &str,
    output: &Path,
) -> flock_events::WorldSnapshot {
    let snapshot = generate_snapshot(sim, generator, triggered_by);
    let tick = snapshot.timestamp.tick;
    if let Err(e) = write_snapshot_to_dir(&snapshot, output) {
        warn!("Could not write snapshot at tick {}: {}", tick, e);
    }
    if let Err(e) = write_current_state(&snapshot, output) {
        warn!("Could not write current state at tick {}: {}", tick, e);
    }
    snapshot
}
