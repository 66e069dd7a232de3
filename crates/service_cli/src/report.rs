//! Console report and JSON export.

use std::fmt;
use std::path::Path;

use pricer_risk::PricingResult;
use tracing::info;

use crate::config::BenchmarkSection;
use crate::deal::Deal;
use crate::Result;

const RULE: &str = "==========================================================================================";
const THIN: &str = "------------------------------------------------------------------------------------------";

/// Formats `value` with two decimals and thousands separators.
pub fn money(value: f64) -> String {
    let text = format!("{:.2}", value.abs());
    let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, digit) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && text.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac}")
}

/// Printable run summary.
pub struct Report<'a> {
    pub deal: &'a Deal,
    pub result: &'a PricingResult,
    pub benchmark: &'a BenchmarkSection,
    pub fd_grid: (usize, usize),
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        let ccy = &self.deal.currency;
        let m = &r.model;

        writeln!(f, "{RULE}")?;
        writeln!(f, "BERMUDAN SWAPTION: {ccy} OIS, HULL-WHITE 1F")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "ValDate    : {}", r.valuation_date)?;
        writeln!(
            f,
            "Deal       : {:.0}MM {ccy} {}",
            r.notional / 1e6,
            r.direction
        )?;
        writeln!(f, "Strike     : {:.6}%", r.strike * 100.0)?;
        writeln!(
            f,
            "Swap       : {} -> {}",
            self.deal.swap_start, self.deal.swap_end
        )?;
        writeln!(
            f,
            "ATM        : {:.6}%  |  Moneyness: {:+.2} bp",
            r.fair_rate * 100.0,
            r.moneyness_bp
        )?;
        writeln!(f, "Exercises  : {} dates", r.exercise_dates)?;
        writeln!(
            f,
            "Model      : HW1F | a={}{} | FDM {}x{}",
            m.mean_reversion,
            if m.mean_reversion_calibrated { " (calibrated)" } else { "" },
            self.fd_grid.0,
            self.fd_grid.1
        )?;
        writeln!(
            f,
            "sigma_ATM={:.6} + delta_sigma={:.6} -> sigma_total={:.6}",
            m.sigma_atm, m.delta_sigma, m.sigma_total
        )?;
        writeln!(
            f,
            "Calibration: {} ({} iterations{})",
            r.atm_calibration.method,
            r.atm_calibration.iterations,
            if r.atm_calibration.converged { "" } else { ", not converged" }
        )?;
        if let Some(inverse) = &r.inverse_calibration {
            writeln!(
                f,
                "Inverse    : {} ({} iterations{})",
                inverse.method,
                inverse.iterations,
                if inverse.converged { "" } else { ", not converged" }
            )?;
        }

        writeln!(f, "\n{RULE}\nRESULTS\n{RULE}")?;
        writeln!(f, "NPV              : {:>14} {ccy}", money(r.npv))?;
        writeln!(f, "ATM-only NPV     : {:>14} {ccy}", money(r.atm_npv))?;
        if let (Some(target), Some(diff)) = (r.target_npv, r.target_diff_pct) {
            writeln!(f, "Target NPV       : {:>14} {ccy} ({diff:+.4}%)", money(target))?;
        }
        writeln!(f, "Yield Value      : {:>14.3} bps", r.yield_value_bp)?;
        writeln!(f, "Premium          : {:>14.5}%", r.premium_pct)?;
        writeln!(f, "Underlying Prem  : {:>14.5}%", r.underlying_premium_pct)?;
        writeln!(f, "Underlying NPV   : {:>14} {ccy}", money(r.underlying_npv))?;

        if let Some(g) = &r.greeks {
            writeln!(f, "\n{RULE}\nGREEKS\n{RULE}")?;
            writeln!(f, "DV01             : {:>14}", money(g.dv01))?;
            writeln!(f, "Gamma (1bp)      : {:>14}", money(g.gamma))?;
            writeln!(f, "Vega (1bp)       : {:>14}", money(g.vega))?;
            writeln!(f, "Theta (1-day)    : {:>14}", money(g.theta))?;
            writeln!(f, "Delta (Hedge)    : {:>14.5}", g.hedge_delta)?;
            writeln!(f, "Underlying DV01  : {:>14}", money(g.underlying_dv01))?;
        }

        self.fmt_benchmark(f)
    }
}

impl Report<'_> {
    fn fmt_benchmark(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.benchmark;
        let r = self.result;
        let Some(g) = r.greeks.filter(|_| b.has_greeks()) else {
            return Ok(());
        };

        writeln!(f, "\n{RULE}\nBENCHMARK COMPARISON\n{RULE}")?;
        writeln!(
            f,
            "{:<22} {:>15} {:>15} {:>15}",
            "Metric", "Benchmark", "Model", "Diff"
        )?;
        writeln!(f, "{THIN}")?;
        if let Some(npv) = b.npv {
            let diff = if npv != 0.0 { 100.0 * (r.npv - npv) / npv } else { 0.0 };
            writeln!(
                f,
                "{:<22} {:>15} {:>15} {:>14.2}%",
                "NPV",
                money(npv),
                money(r.npv),
                diff
            )?;
        }
        if let Some(atm) = b.atm_strike {
            writeln!(
                f,
                "{:<22} {:>15.6} {:>15.6} {:>12.2} bp",
                "ATM (%)",
                atm,
                r.fair_rate * 100.0,
                (r.fair_rate - atm / 100.0) * 1e4
            )?;
        }
        if let Some(yv) = b.yield_value_bp {
            writeln!(
                f,
                "{:<22} {:>15.3} {:>15.3} {:>12.3} bp",
                "Yield Value (bp)",
                yv,
                r.yield_value_bp,
                r.yield_value_bp - yv
            )?;
        }
        let rows = [
            ("DV01", b.dv01, g.dv01),
            ("Gamma (1bp)", b.gamma_1bp, g.gamma),
            ("Vega (1bp)", b.vega_1bp, g.vega),
            ("Theta (1-day)", b.theta_1d, g.theta),
            ("Underlying DV01", b.underlying_dv01, g.underlying_dv01),
        ];
        for (label, bench, model) in rows {
            if let Some(bench) = bench {
                writeln!(
                    f,
                    "{:<22} {:>15} {:>15} {:>15}",
                    label,
                    money(bench),
                    money(model),
                    money(model - bench)
                )?;
            }
        }
        if let Some(delta) = b.delta_hedge {
            writeln!(
                f,
                "{:<22} {:>15.5} {:>15.5} {:>15.5}",
                "Delta (Hedge)",
                delta,
                g.hedge_delta,
                g.hedge_delta - delta
            )?;
        }
        writeln!(f, "{RULE}")
    }
}

/// Writes `result` as pretty-printed JSON.
pub fn write_json(result: &PricingResult, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), result)?;
    info!(path = %path.display(), "results exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(0.0), "0.00");
        assert_eq!(money(999.994), "999.99");
        assert_eq!(money(1234.5), "1,234.50");
        assert_eq!(money(-1234567.891), "-1,234,567.89");
        assert_eq!(money(100000.0), "100,000.00");
        assert_eq!(money(-0.001), "0.00");
    }
}
