//! Check command implementation
//!
//! Validates the run file and market data without pricing.

use std::path::Path;

use pricer_models::instruments::rates::pricing::par_swap_rate;
use tracing::info;

use crate::config::BermudanConfig;
use crate::{deal, market, Result};

/// Run the check command
pub fn run(config_path: &Path) -> Result<()> {
    let config = BermudanConfig::load(config_path)?;
    let market = market::load(&config)?;
    let deal = deal::build(&config)?;
    config.fd_config()?;

    let fair_rate = par_swap_rate(deal.swaption.underlying(), &market.curve)?;
    info!(
        curve_nodes = market.curve.nodes().len(),
        expiries = market.surface.expiries().len(),
        tenors = market.surface.tenors().len(),
        exercise_dates = deal.swaption.exercise().len(),
        fair_rate,
        target = ?market.target,
        "inputs valid"
    );
    println!(
        "OK: {} exercise dates, fair rate {:.6}%",
        deal.swaption.exercise().len(),
        fair_rate * 100.0
    );
    Ok(())
}
