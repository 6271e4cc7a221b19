use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use daywatch::analysis::{estimate_baseline, Baseline};
use daywatch::config::{build_catalog, EventsFile, StatsFile};
use daywatch::detect::{scan, ScanReport};
use daywatch::simulate::{assemble, Dataset, SamplerLimits};

#[derive(Parser)]
#[command(
    name = "daywatch",
    about = "Daily-activity anomaly detection: simulate, baseline, scan",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate synthetic activity for the configured events
    Simulate {
        /// Events definition file (TOML)
        #[arg(long)]
        events: PathBuf,

        /// Stats profile file (TOML)
        #[arg(long)]
        stats: PathBuf,

        /// Number of days to simulate
        #[arg(long)]
        days: usize,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Where to write the dataset (JSON)
        #[arg(long, default_value = "dataset.json")]
        output: PathBuf,
    },

    /// Derive a per-event baseline from a recorded dataset
    Baseline {
        /// Dataset file (JSON, as written by `simulate`)
        #[arg(long)]
        dataset: PathBuf,

        /// Where to write the baseline (JSON)
        #[arg(long, default_value = "baseline.json")]
        output: PathBuf,
    },

    /// Score a dataset's days against a baseline and flag anomalies
    Scan {
        /// Events definition file (TOML; supplies the alert weights)
        #[arg(long)]
        events: PathBuf,

        /// Baseline file (JSON, as written by `baseline`)
        #[arg(long)]
        baseline: PathBuf,

        /// Dataset of days to score (JSON)
        #[arg(long)]
        dataset: PathBuf,

        /// JSON report output for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// Full pipeline: simulate training activity, learn a baseline, then
    /// simulate live activity from a second stats file and scan it
    Run {
        /// Events definition file (TOML)
        #[arg(long)]
        events: PathBuf,

        /// Training stats profile file (TOML)
        #[arg(long)]
        stats: PathBuf,

        /// Stats profile for the live days to be scored (TOML)
        #[arg(long)]
        live_stats: PathBuf,

        /// Days of training activity
        #[arg(long, default_value = "100")]
        days: usize,

        /// Days of live activity to score
        #[arg(long, default_value = "10")]
        live_days: usize,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            events,
            stats,
            days,
            seed,
            output,
        } => {
            let catalog = build_catalog(&EventsFile::load(&events)?, &StatsFile::load(&stats)?)?;
            let mut rng = seeded_rng(seed);
            let dataset = assemble(&mut rng, &catalog, days, &SamplerLimits::default())?;
            write_json(&output, &dataset)?;
            println!(
                "{} days of activity for {} events written to {}",
                dataset.days,
                dataset.series.len(),
                output.display()
            );
        }
        Commands::Baseline { dataset, output } => {
            let dataset: Dataset = read_json(&dataset)?;
            let baseline = estimate_baseline(&dataset.series)?;
            write_json(&output, &baseline)?;
            println!("Baseline statistics written to {}", output.display());
            for stats in &baseline.entries {
                println!(
                    "  {:<20} mean {:>8.2}  std dev {:>8.2}",
                    stats.name, stats.mean, stats.std_dev
                );
            }
        }
        Commands::Scan {
            events,
            baseline,
            dataset,
            json,
        } => {
            let weights = EventsFile::load(&events)?.weights();
            let baseline: Baseline = read_json(&baseline)?;
            let dataset: Dataset = read_json(&dataset)?;

            let report = scan(&dataset.day_rows()?, &baseline, &weights)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Run {
            events,
            stats,
            live_stats,
            days,
            live_days,
            seed,
        } => {
            let events = EventsFile::load(&events)?;
            let training_catalog =
                build_catalog(&events, &StatsFile::load(&stats)?)?;
            let live_catalog = build_catalog(&events, &StatsFile::load(&live_stats)?)?;

            let mut rng = seeded_rng(seed);
            let limits = SamplerLimits::default();

            let training = assemble(&mut rng, &training_catalog, days, &limits)?;
            let baseline = estimate_baseline(&training.series)?;
            let live = assemble(&mut rng, &live_catalog, live_days, &limits)?;

            let report = scan(&live.day_rows()?, &baseline, &events.weights())?;
            print_report(&report);
        }
    }

    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

fn print_report(report: &ScanReport) {
    println!("Threshold: {}", report.threshold);
    for verdict in &report.verdicts {
        println!(
            "Day {:>3} anomaly count = {:>8.2} {}",
            verdict.day,
            verdict.score,
            if verdict.flagged { "--- FLAGGED" } else { "" }
        );
    }
    if report.any_flagged {
        println!("\nALERT! Anomalies detected.");
    } else {
        println!("\nNo anomalies detected.");
    }
}
