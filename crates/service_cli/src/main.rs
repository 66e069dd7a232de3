//! `bermudan`: Bermudan swaption pricer
//!
//! Prices a Bermudan swaption on an OIS swap under one-factor Hull-White,
//! calibrated to the ATM normal vol surface, and reports its Greeks.
//!
//! # Commands
//!
//! - `bermudan price --config <file>` - Calibrate, price and run Greeks
//! - `bermudan check --config <file>` - Validate a run file and its data
//!
//! # Architecture
//!
//! As the service layer, this crate wires configuration and market data
//! files into the core, model, optimiser, pricing and risk crates.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, error};

mod commands;
mod config;
mod deal;
mod error;
mod logging;
mod market;
mod report;

pub use error::{CliError, Result};

/// Bermudan swaption pricer: HW1F calibration and risk
#[derive(Parser)]
#[command(name = "bermudan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calibrate, price and compute Greeks
    Price {
        /// Run file (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// JSON export path, overriding `output.json_file`
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the Greeks
        #[arg(long)]
        no_greeks: bool,
    },

    /// Validate a run file and its market data without pricing
    Check {
        /// Run file (TOML)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    debug!("verbose mode enabled");

    let outcome = match &cli.command {
        Commands::Price {
            config,
            output,
            no_greeks,
        } => commands::price::run(config, output.as_deref(), !no_greeks)
            .with_context(|| format!("pricing {} failed", config.display())),
        Commands::Check { config } => commands::check::run(config)
            .with_context(|| format!("checking {} failed", config.display())),
    };

    if let Err(e) = &outcome {
        error!("{e:#}");
    }
    outcome
}
