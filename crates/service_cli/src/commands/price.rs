//! Price command implementation
//!
//! Loads the run file and market data, calibrates, runs the Greeks and
//! writes the report and the JSON export.

use std::path::{Path, PathBuf};

use pricer_pricing::fd::FdHullWhiteSwaptionEngine;
use pricer_risk::{BermudanPricer, PricingResult};
use tracing::info;

use crate::config::BermudanConfig;
use crate::report::{write_json, Report};
use crate::{deal, market, Result};

/// Run the price command
pub fn run(config_path: &Path, output: Option<&Path>, with_greeks: bool) -> Result<()> {
    let config = BermudanConfig::load(config_path)?;
    info!(config = %config_path.display(), "Bermudan swaption pricer");

    let result = price(&config, with_greeks)?;

    let json_path: Option<PathBuf> = output
        .map(Path::to_path_buf)
        .or_else(|| config.output.json_file.as_deref().map(|f| config.resolve(f)));
    if let Some(path) = json_path {
        write_json(&result, &path)?;
    }

    info!("Done");
    Ok(())
}

/// Prices the configured deal and prints the report when enabled.
pub fn price(config: &BermudanConfig, with_greeks: bool) -> Result<PricingResult> {
    info!("[1/4] Market data");
    let market = market::load(config)?;
    let deal = deal::build(config)?;

    info!("[2/4] Calibration");
    let fd = config.fd_config()?;
    let engine = FdHullWhiteSwaptionEngine::new(fd)?;
    let mut pricer = BermudanPricer::new(
        engine,
        deal.swaption.clone(),
        market.curve,
        market.surface,
        config.pricer_config(),
    )?
    .with_target(market.target);
    pricer.calibrate()?;

    let greeks = if with_greeks {
        info!("[3/4] Greeks");
        Some(pricer.greeks()?)
    } else {
        info!("[3/4] Greeks skipped");
        None
    };
    let result = pricer.result(greeks)?;

    info!("[4/4] Output");
    if config.output.print_report {
        let report = Report {
            deal: &deal,
            result: &result,
            benchmark: &config.benchmark,
            fd_grid: (fd.time_steps(), fd.space_steps()),
        };
        println!("{report}");
    }
    Ok(result)
}
