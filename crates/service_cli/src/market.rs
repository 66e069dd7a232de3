//! Manual market data: discount curve and ATM normal vol grid, from CSV
//! files or inline config data.
//!
//! - Curve CSV: `date,discount_factor` per line; a `date` header and `#`
//!   comments are skipped
//! - Vol CSV: a header row of tail tenor labels (first cell ignored), then
//!   one row per expiry: label followed by values in `vol_unit`
//!
//! Labels are `<n><unit>` with unit `D`, `W`, `M`/`Mo` or `Y`/`Yr`
//! (`6Mo`, `10Yr`, `5Y`).

use std::io::Read;
use std::path::Path;

use pricer_core::market_data::{AtmNormalVolSurface, CurveNode, DiscountCurve};
use pricer_core::types::{Date, DayCountConvention};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::{BermudanConfig, DataSourceMode, VolSurfaceData};
use crate::{CliError, Result};

/// Unit of volatility quotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolUnit {
    /// Tens of basis points: `5.23` is 52.3bp.
    #[default]
    Bpx10,
    /// Basis points.
    Bp,
    /// Decimal rate units.
    Decimal,
}

impl VolUnit {
    /// Multiplier to decimal.
    pub fn scale(&self) -> f64 {
        match self {
            VolUnit::Bpx10 => 1e-3,
            VolUnit::Bp => 1e-4,
            VolUnit::Decimal => 1.0,
        }
    }
}

/// Curve, surface and target ready for the pricer.
#[derive(Debug, Clone)]
pub struct MarketData {
    pub curve: DiscountCurve,
    pub surface: AtmNormalVolSurface,
    /// Value the inverse calibration reproduces, if any.
    pub target: Option<f64>,
}

/// Converts a grid label to years.
pub fn label_to_years(label: &str) -> Result<f64> {
    let label = label.trim();
    let split = label
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(|| unknown_label(label))?;
    let (count, unit) = label.split_at(split);
    let n: f64 = count.trim().parse().map_err(|_| unknown_label(label))?;
    if !(n.is_finite() && n > 0.0) {
        return Err(unknown_label(label));
    }
    let years = match unit.to_ascii_lowercase().as_str() {
        "d" => n / 365.0,
        "w" => 7.0 * n / 365.0,
        "m" | "mo" => n / 12.0,
        "y" | "yr" => n,
        _ => return Err(unknown_label(label)),
    };
    Ok(years)
}

fn unknown_label(label: &str) -> CliError {
    CliError::Config(format!("unknown expiry/tenor label '{label}'"))
}

/// Reads `date,discount_factor` rows.
pub fn read_curve_csv<R: Read>(reader: R) -> Result<Vec<(String, f64)>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in csv.records().enumerate() {
        let record = record?;
        let Some(date) = record.get(0).filter(|s| !s.is_empty()) else {
            continue;
        };
        if date.eq_ignore_ascii_case("date") {
            continue;
        }
        let df = record
            .get(1)
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| {
                CliError::Config(format!("curve row {}: expected date,discount_factor", i + 1))
            })?;
        rows.push((date.to_string(), df));
    }
    Ok(rows)
}

/// Reads a vol grid with tenor labels across and expiry labels down.
pub fn read_vol_csv<R: Read>(reader: R) -> Result<VolSurfaceData> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut grid = VolSurfaceData::default();
    for record in csv.records() {
        let record = record?;
        if grid.tenor_labels.is_empty() {
            grid.tenor_labels = record.iter().skip(1).map(str::to_string).collect();
            continue;
        }
        let Some(label) = record.get(0) else {
            continue;
        };
        let values = record
            .iter()
            .skip(1)
            .map(|v| {
                v.parse::<f64>()
                    .map_err(|_| CliError::Config(format!("vol row '{label}': bad value '{v}'")))
            })
            .collect::<Result<Vec<f64>>>()?;
        grid.expiry_labels.push(label.to_string());
        grid.values.push(values);
    }
    Ok(grid)
}

/// Builds the curve from `(date, discount factor)` rows.
pub fn build_curve(valuation_date: Date, rows: &[(String, f64)]) -> Result<DiscountCurve> {
    let nodes = rows
        .iter()
        .map(|(date, df)| -> Result<CurveNode> { Ok(CurveNode::new(date.parse()?, *df)) })
        .collect::<Result<Vec<CurveNode>>>()?;
    Ok(DiscountCurve::new(
        valuation_date,
        &nodes,
        DayCountConvention::Actual365Fixed,
    )?)
}

/// Builds the surface from labelled quotes.
pub fn build_surface(grid: &VolSurfaceData, unit: VolUnit) -> Result<AtmNormalVolSurface> {
    if grid.values.is_empty() || grid.tenor_labels.is_empty() {
        return Err(CliError::Config("volatility grid is empty".to_string()));
    }
    if grid.values.len() != grid.expiry_labels.len() {
        return Err(CliError::Config(format!(
            "volatility grid has {} rows for {} expiry labels",
            grid.values.len(),
            grid.expiry_labels.len()
        )));
    }
    if let Some((label, row)) = grid
        .expiry_labels
        .iter()
        .zip(&grid.values)
        .find(|(_, row)| row.len() != grid.tenor_labels.len())
    {
        return Err(CliError::Config(format!(
            "volatility row '{label}' has {} values for {} tenor labels",
            row.len(),
            grid.tenor_labels.len()
        )));
    }

    let expiries = grid
        .expiry_labels
        .iter()
        .map(|l| label_to_years(l))
        .collect::<Result<Vec<f64>>>()?;
    let tenors = grid
        .tenor_labels
        .iter()
        .map(|l| label_to_years(l))
        .collect::<Result<Vec<f64>>>()?;
    let scale = unit.scale();
    let vols = grid
        .values
        .iter()
        .map(|row| row.iter().map(|v| v * scale).collect())
        .collect();
    Ok(AtmNormalVolSurface::new(expiries, tenors, vols)?)
}

/// Loads curve, surface and target as the config directs.
///
/// A configured file that does not exist falls back to the inline data
/// with a warning.
pub fn load(config: &BermudanConfig) -> Result<MarketData> {
    if config.data_source.mode == DataSourceMode::Bloomberg {
        warn!("live market data feed not available, falling back to manual data");
    }
    let manual = &config.data_source.manual;
    let valuation_date: Date = config.deal.valuation_date.parse()?;

    let rows = match existing(config, manual.curve_file.as_deref()) {
        Some(path) => {
            info!(path = %path.display(), "loading curve from file");
            read_curve_csv(std::fs::File::open(&path)?)?
        }
        None => {
            info!("loading curve from inline data");
            config.curve_data.clone()
        }
    };
    let curve = build_curve(valuation_date, &rows)?;
    info!(nodes = curve.nodes().len(), "curve ready");

    let grid = match existing(config, manual.vol_file.as_deref()) {
        Some(path) => {
            info!(path = %path.display(), "loading vol surface from file");
            read_vol_csv(std::fs::File::open(&path)?)?
        }
        None => {
            info!("loading vol surface from inline data");
            config.vol_surface_data.clone().unwrap_or_default()
        }
    };
    let surface = build_surface(&grid, manual.vol_unit)?;
    info!(
        expiries = surface.expiries().len(),
        tenors = surface.tenors().len(),
        "vol surface ready"
    );

    Ok(MarketData {
        curve,
        surface,
        target: target_npv(config.benchmark.npv),
    })
}

/// Benchmark value usable as an inverse-fit target; zero means none.
pub fn target_npv(benchmark: Option<f64>) -> Option<f64> {
    benchmark.filter(|v| v.is_finite() && *v != 0.0)
}

fn existing(config: &BermudanConfig, file: Option<&str>) -> Option<std::path::PathBuf> {
    let file = file.filter(|f| !f.is_empty())?;
    let path = config.resolve(file);
    if Path::new(&path).exists() {
        Some(path)
    } else {
        warn!(path = %path.display(), "market data file not found, using inline data");
        None
    }
}
