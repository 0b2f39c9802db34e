//! Headless contagion simulation runner
//!
//! Loads a scenario, runs the engine for a fixed number of steps and reports
//! the epidemic curve in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use contagion_physics::HealthState;
use contagion_simulation::{
    peak_infected, Census, MobilitySchedule, Simulation, SimulationConfig,
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(about = "Disease spread among colliding particles in the unit square")]
struct Args {
    /// YAML scenario file; built-in defaults when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Number of steps to simulate
    #[arg(short = 'n', long, default_value_t = 900)]
    steps: u64,

    /// Seed overriding the scenario's
    #[arg(long)]
    seed: Option<u64>,

    /// Mobility schedule overriding the scenario's (none, stop_short, stop_mid,
    /// stop_long, lightswitch, lightswitch_4_21, lightswitch_6_21, lightswitch_6_21_frequent)
    #[arg(long)]
    schedule: Option<MobilitySchedule>,

    /// Log the census every this many steps (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn load_scenario(path: &Path) -> Result<SimulationConfig> {
    let file = File::open(path)
        .with_context(|| format!("failed to open scenario {}", path.display()))?;
    let config = serde_yaml::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse scenario {}", path.display()))?;
    Ok(config)
}

fn census_line(step: u64, census: &Census) -> String {
    let [healthy, infected, recovered, dead] = census.fractions();
    format!(
        "step {:>5} | healthy {:>5.1}% | infected {:>5.1}% | recovered {:>5.1}% | dead {:>5.1}%",
        step,
        healthy * 100.0,
        infected * 100.0,
        recovered * 100.0,
        dead * 100.0
    )
}

fn print_summary(sim: &Simulation) {
    let (peak_step, peak) = peak_infected(sim.census_history())
        .map(|(step, census)| (step, census.fraction(HealthState::Infected)))
        .unwrap_or_default();
    let last = sim.latest_census();

    println!("Simulated {} steps of {} particles", sim.current_step(), last.total());
    println!("  schedule:       {}", sim.config().schedule);
    println!("  peak infected:  {:.1}% at step {}", peak * 100.0, peak_step);
    for state in HealthState::ALL {
        println!(
            "  final {:<9} {:>4} ({:.1}%)",
            state.label(),
            last.count(state),
            last.fraction(state) * 100.0
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(schedule) = args.schedule {
        config.schedule = schedule;
    }

    log::info!("Starting contagion simulation...");
    let mut sim = Simulation::new(config).context("failed to initialize simulation")?;

    for _ in 0..args.steps {
        let snapshot = sim.step();
        let completed = snapshot.step + 1;
        if args.report_every > 0 && completed % args.report_every == 0 {
            log::info!("{}", census_line(completed, &snapshot.census));
        }
    }

    print_summary(&sim);
    Ok(())
}
