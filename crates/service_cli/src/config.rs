//! Deal configuration loaded from TOML.
//!
//! Sections follow the layout of a run file:
//!
//! ```toml
//! [deal]
//! valuation_date = "2025-03-17"
//! notional = 10_000_000
//! strike = 3.0            # percent
//! swap_start = "2030-03-19"
//! swap_end = "2035-03-19"
//!
//! [model]
//! mean_reversion = 0.03
//!
//! [benchmark]
//! npv = 125000.0          # target value for the inverse fit
//!
//! [data_source.manual]
//! curve_file = "curve.csv"
//! vol_file = "vol.csv"
//! ```
//!
//! Only `[deal]` is required; every other setting has a default.

use std::path::{Path, PathBuf};

use pricer_optimiser::calibration::CalibrationConfig;
use pricer_pricing::fd::FdConfig;
use pricer_risk::{GreeksConfig, ModelConfig, PricerConfig};
use serde::Deserialize;

use crate::market::VolUnit;
use crate::{CliError, Result};

/// Whole run file.
#[derive(Debug, Clone, Deserialize)]
pub struct BermudanConfig {
    pub deal: DealConfig,
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub exercise: ExerciseSection,
    #[serde(default)]
    pub greeks: GreeksSection,
    #[serde(default)]
    pub benchmark: BenchmarkSection,
    #[serde(default)]
    pub data_source: DataSourceSection,
    /// Inline `[date, discount_factor]` pairs.
    #[serde(default)]
    pub curve_data: Vec<(String, f64)>,
    #[serde(default)]
    pub vol_surface_data: Option<VolSurfaceData>,
    #[serde(default)]
    pub output: OutputSection,
    /// Directory relative paths in the file resolve against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// `[deal]`: the underlying swap and the option on it.
#[derive(Debug, Clone, Deserialize)]
pub struct DealConfig {
    pub valuation_date: String,
    pub notional: f64,
    /// Fixed rate in percent.
    pub strike: f64,
    #[serde(default = "default_direction")]
    pub direction: String,
    pub swap_start: String,
    pub swap_end: String,
    #[serde(default = "default_frequency")]
    pub fixed_frequency: String,
    #[serde(default = "default_day_count")]
    pub day_count: String,
    #[serde(default = "default_payment_lag")]
    pub payment_lag: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Holiday calendar; derived from `currency` when absent.
    #[serde(default)]
    pub calendar: Option<String>,
    #[serde(default = "default_convention")]
    pub business_day_convention: String,
}

fn default_direction() -> String {
    "Receiver".to_string()
}

fn default_frequency() -> String {
    "SemiAnnual".to_string()
}

fn default_day_count() -> String {
    "ACT/365".to_string()
}

fn default_payment_lag() -> u32 {
    2
}

fn default_currency() -> String {
    "CAD".to_string()
}

fn default_convention() -> String {
    "ModifiedFollowing".to_string()
}

/// `[model]`: Hull-White settings and the FD grid.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    pub mean_reversion: f64,
    pub calibrate_a: bool,
    pub fdm_time_grid: usize,
    pub fdm_space_grid: usize,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            mean_reversion: 0.03,
            calibrate_a: false,
            fdm_time_grid: 300,
            fdm_space_grid: 300,
        }
    }
}

/// How exercise dates are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseMode {
    /// Every accrual date but the last, on or after the swap start.
    #[default]
    Auto,
    /// The dates listed in `custom_dates`.
    Custom,
}

/// `[exercise]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExerciseSection {
    pub mode: ExerciseMode,
    pub custom_dates: Vec<String>,
}

/// `[greeks]`: bump sizes in basis points.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct GreeksSection {
    pub dv01_bump_bp: f64,
    pub gamma_bump_bp: f64,
    pub vega_bump_bp: f64,
    pub compute_theta: bool,
}

impl Default for GreeksSection {
    fn default() -> Self {
        Self {
            dv01_bump_bp: 1.0,
            gamma_bump_bp: 1.0,
            vega_bump_bp: 1.0,
            compute_theta: true,
        }
    }
}

/// `[benchmark]`: reference figures from another system.
///
/// `npv` doubles as the target of the inverse calibration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct BenchmarkSection {
    pub npv: Option<f64>,
    /// ATM rate in percent.
    pub atm_strike: Option<f64>,
    pub yield_value_bp: Option<f64>,
    pub premium: Option<f64>,
    pub underlying_premium: Option<f64>,
    pub dv01: Option<f64>,
    pub gamma_1bp: Option<f64>,
    pub vega_1bp: Option<f64>,
    pub theta_1d: Option<f64>,
    pub delta_hedge: Option<f64>,
    pub underlying_dv01: Option<f64>,
}

impl BenchmarkSection {
    /// True when any Greek is given, which turns on the comparison table.
    pub fn has_greeks(&self) -> bool {
        [
            self.dv01,
            self.gamma_1bp,
            self.vega_1bp,
            self.theta_1d,
            self.delta_hedge,
            self.underlying_dv01,
        ]
        .iter()
        .any(Option::is_some)
    }
}

/// Market data source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    #[default]
    Manual,
    /// Live terminal feed; not available here, loading falls back to manual.
    Bloomberg,
}

/// `[data_source]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataSourceSection {
    pub mode: DataSourceMode,
    pub manual: ManualSource,
}

/// `[data_source.manual]`: CSV files, falling back to inline data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManualSource {
    pub curve_file: Option<String>,
    pub vol_file: Option<String>,
    pub vol_unit: VolUnit,
}

/// `[vol_surface_data]`: inline volatility grid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VolSurfaceData {
    pub expiry_labels: Vec<String>,
    pub tenor_labels: Vec<String>,
    /// `values[expiry][tenor]` in `vol_unit`.
    pub values: Vec<Vec<f64>>,
}

/// `[output]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub print_report: bool,
    /// JSON export path, overridden by `--output`.
    pub json_file: Option<String>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            print_report: true,
            json_file: None,
        }
    }
}

impl BermudanConfig {
    /// Reads and parses a run file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Parses a run file held in memory; relative paths resolve against
    /// the working directory.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if !(self.deal.notional.is_finite() && self.deal.notional > 0.0) {
            return Err(CliError::Config(format!(
                "deal.notional must be positive, got {}",
                self.deal.notional
            )));
        }
        if self.exercise.mode == ExerciseMode::Custom && self.exercise.custom_dates.is_empty() {
            return Err(CliError::Config(
                "exercise.mode = \"custom\" needs exercise.custom_dates".to_string(),
            ));
        }
        Ok(())
    }

    /// `path` as given when absolute, else under the config directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Grid for the finite-difference engine.
    pub fn fd_config(&self) -> Result<FdConfig> {
        Ok(FdConfig::builder()
            .time_steps(self.model.fdm_time_grid)
            .space_steps(self.model.fdm_space_grid)
            .build()?)
    }

    /// Model, calibration and Greek settings for the pricer.
    pub fn pricer_config(&self) -> PricerConfig {
        let model = ModelConfig {
            mean_reversion: self.model.mean_reversion,
            calibrate_mean_reversion: self.model.calibrate_a,
        };
        let mut calibration = CalibrationConfig::default();
        if self.model.calibrate_a {
            calibration = calibration.with_mean_reversion_seed(self.model.mean_reversion);
        }
        let greeks = GreeksConfig::default()
            .with_curve_bump_bp(self.greeks.dv01_bump_bp)
            .with_gamma_bump_bp(self.greeks.gamma_bump_bp)
            .with_vol_bump_bp(self.greeks.vega_bump_bp)
            .with_theta(self.greeks.compute_theta);
        PricerConfig {
            model,
            calibration,
            greeks,
        }
    }
}
