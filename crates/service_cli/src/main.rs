//! rla-select - Verifiable Ballot Selection for Risk-Limiting Audits
//!
//! This is the operational entry point for the sampler workspace.
//!
//! # Commands
//!
//! - `rla-select select --seed <seed> --sample-size <n> --manifest <file>` - Draw and list ballots
//! - `rla-select demo --seed <seed> --population <N> --sample-size <n>` - Print a hand-checkable derivation
//! - `rla-select check-index --manifest <file>` - Verify the cumulative index against the manifest walk
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the CSV adapter to the
//! core sampler. Results go to stdout; logs go to stderr.
//!
//! # Configuration
//!
//! Settings come from CLI flags, then `RLA_*` environment variables, then
//! the TOML file given with `--config`, then defaults.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, LogLevel, SamplerConfig, ENV_VARS};

/// Verifiable ballot selection for risk-limiting audits
#[derive(Parser)]
#[command(name = "rla-select")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Sampling arguments shared by `select` and `demo`
#[derive(Args, Default)]
struct SampleArgs {
    /// Public random seed
    #[arg(short, long)]
    seed: Option<String>,

    /// Number of ballots to draw
    #[arg(short = 'n', long)]
    sample_size: Option<usize>,

    /// Ballot manifest (CSV)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Declared number of ballots in the population
    #[arg(short = 'N', long)]
    population: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a sample and list the ballots to pull
    Select {
        #[command(flatten)]
        sample: SampleArgs,

        /// Reject repeated positions
        #[arg(long)]
        without_replacement: bool,

        /// Discard the first K draws
        #[arg(long)]
        skip: Option<usize>,

        /// Listing order (selection, location)
        #[arg(short, long)]
        order: Option<String>,

        /// Position lookup (linear, indexed)
        #[arg(short, long)]
        resolver: Option<String>,

        /// Output format (text, json, csv)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Show how the first draws are derived, for checking by hand
    Demo {
        #[command(flatten)]
        sample: SampleArgs,

        /// Number of draws to show in full
        #[arg(short = 'k', long, default_value = "3")]
        derivations: u64,
    },

    /// Verify the cumulative index against a manifest
    CheckIndex {
        /// Ballot manifest (CSV)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else {
            self.log_level.clone()
        };
        let mut args = CliArgs {
            config_file: self.config.clone(),
            log_level,
            ..Default::default()
        };

        match &self.command {
            Commands::Select {
                sample,
                without_replacement,
                skip,
                order,
                resolver,
                format,
            } => {
                sample.fill(&mut args);
                args.without_replacement = *without_replacement;
                args.skip = *skip;
                args.order = order.clone();
                args.resolver = resolver.clone();
                args.format = format.clone();
            }
            Commands::Demo { sample, .. } => sample.fill(&mut args),
            Commands::CheckIndex { manifest } => args.manifest = manifest.clone(),
        }
        args
    }
}

impl SampleArgs {
    fn fill(&self, args: &mut CliArgs) {
        args.seed = self.seed.clone();
        args.sample_size = self.sample_size;
        args.manifest = self.manifest.clone();
        args.population = self.population;
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.directive()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli, config: SamplerConfig) -> Result<()> {
    match cli.command {
        Commands::Select { .. } => commands::select::run(&config),
        Commands::Demo { derivations, .. } => commands::demo::run(&config, derivations),
        Commands::CheckIndex { .. } => commands::check_index::run(&config),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level);
    if cli.verbose {
        info!("Verbose mode enabled");
    }
    for key in ENV_VARS {
        if std::env::var_os(key).is_some() {
            debug!(key, "Setting taken from environment");
        }
    }

    run(cli, config)?;
    Ok(())
}
