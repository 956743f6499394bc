//! lognorm CLI entry point.
//!
//! Runs the log-normal population analysis headless and prints the
//! statistics panel and fit summaries.
#![allow(clippy::uninlined_format_args)]

mod report;

use clap::{Parser, Subcommand, ValueEnum};
use log::debug;

use lognorm_core::{compute, AnalyzerConfig, ParamRange, PopulationParams, ScaleMode};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("Core error: {0}")]
    Core(#[from] lognorm_core::Error),

    #[error("Report error: {0}")]
    Report(#[from] std::fmt::Error),
}

/// PDF view selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scale {
    /// Normal fits of the log-transformed data
    Log,
    /// Log-normal fits of the raw values
    Original,
}

impl From<Scale> for ScaleMode {
    fn from(scale: Scale) -> Self {
        match scale {
            Scale::Log => ScaleMode::Log,
            Scale::Original => ScaleMode::Original,
        }
    }
}

/// Log-normal population analyzer.
#[derive(Parser)]
#[command(name = "lognorm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, partition and fit the three populations
    Analyze {
        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Sample size per population
        #[arg(short = 'n', long, default_value = "1000")]
        samples: usize,

        /// Log mean of population 1
        #[arg(long, default_value = "0.5", allow_negative_numbers = true)]
        pop1_mean: f64,

        /// Log std dev of population 1
        #[arg(long, default_value = "0.4")]
        pop1_std: f64,

        /// Log mean of population 2
        #[arg(long, default_value = "1.2", allow_negative_numbers = true)]
        pop2_mean: f64,

        /// Log std dev of population 2
        #[arg(long, default_value = "0.3")]
        pop2_std: f64,

        /// Log mean of population 3
        #[arg(long, default_value = "2.0", allow_negative_numbers = true)]
        pop3_mean: f64,

        /// Log std dev of population 3
        #[arg(long, default_value = "0.35")]
        pop3_std: f64,

        /// Border 1 (defaults to the 30th percentile)
        #[arg(long, requires = "border2")]
        border1: Option<f64>,

        /// Border 2 (defaults to the 70th percentile)
        #[arg(long, requires = "border1")]
        border2: Option<f64>,

        /// PDF view
        #[arg(short, long, value_enum, default_value = "original")]
        scale: Scale,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the default populations and parameter ranges
    Defaults,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            seed,
            samples,
            pop1_mean,
            pop1_std,
            pop2_mean,
            pop2_std,
            pop3_mean,
            pop3_std,
            border1,
            border2,
            scale,
            verbose,
        } => {
            init_logging(verbose);

            let mut config = AnalyzerConfig::new()
                .with_seed(seed)
                .with_scale(scale.into())
                .with_population(0, PopulationParams::new(pop1_mean, pop1_std, samples))
                .with_population(1, PopulationParams::new(pop2_mean, pop2_std, samples))
                .with_population(2, PopulationParams::new(pop3_mean, pop3_std, samples));
            if let (Some(b1), Some(b2)) = (border1, border2) {
                config = config.with_borders(b1, b2);
            }
            debug!("configuration: {:?}", config);

            let analysis = compute(&config)?;
            print!("{}", report::render(&analysis)?);
        }

        Commands::Defaults => {
            for (i, p) in PopulationParams::defaults().iter().enumerate() {
                println!(
                    "Population {}: log mean {}, log std {}, {} samples",
                    i + 1,
                    p.log_mean,
                    p.log_std,
                    p.sample_count
                );
            }
            println!();
            for (name, range) in [
                ("Sample size", ParamRange::SAMPLE_COUNT),
                ("Log mean", ParamRange::LOG_MEAN),
                ("Log std dev", ParamRange::LOG_STD),
            ] {
                println!(
                    "{:<12} {} to {} (step {})",
                    name, range.min, range.max, range.step
                );
            }
        }
    }

    Ok(())
}
