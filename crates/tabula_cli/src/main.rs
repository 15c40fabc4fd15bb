//! Tabula CLI - Command Line Front End for Timetable Pricing
//!
//! # Commands
//!
//! - `tabula price --dataset <file> --timetable <file>` - Price a timetable
//! - `tabula check --dataset <file> --timetable <file>` - Validate inputs without simulating
//!
//! # Architecture
//!
//! As the **S**ervice layer this crate only wires files, configuration and
//! logging to `tabula_pricing`; all pricing semantics live in the libraries.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{build_config, CliOverrides};

/// Tabula Monte Carlo timetable pricer
#[derive(Parser)]
#[command(name = "tabula")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./tabula.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a timetable against a dataset
    Price {
        /// Path to dataset file (TOML or JSON)
        #[arg(short, long)]
        dataset: PathBuf,

        /// Path to timetable file (JSON)
        #[arg(short, long)]
        timetable: PathBuf,

        /// Override the number of Monte Carlo paths
        #[arg(short, long)]
        paths: Option<usize>,

        /// Override the random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Write per-path present values to this CSV file
        #[arg(long)]
        raw_out: Option<PathBuf>,
    },

    /// Validate a dataset and timetable without simulating
    Check {
        /// Path to dataset file (TOML or JSON)
        #[arg(short, long)]
        dataset: PathBuf,

        /// Path to timetable file (JSON)
        #[arg(short, long)]
        timetable: PathBuf,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = match &cli.command {
        Commands::Price { format, .. } => format.clone(),
        Commands::Check { .. } => None,
    };
    let config = build_config(&CliOverrides {
        config_file: cli.config.clone(),
        log_level: cli.log_level.clone(),
        format,
    })?;

    init_tracing(config.log_level.as_filter_str());
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Price {
            dataset,
            timetable,
            paths,
            seed,
            raw_out,
            ..
        } => commands::price::run(&commands::price::PriceArgs {
            dataset,
            timetable,
            paths,
            seed,
            format: config.format,
            raw_out,
        }),
        Commands::Check { dataset, timetable } => commands::check::run(&dataset, &timetable),
    }
}
