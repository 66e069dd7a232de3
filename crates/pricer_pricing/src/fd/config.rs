//! Finite-difference grid configuration.

use crate::error::EngineError;

/// Maximum number of time steps.
pub const MAX_TIME_STEPS: usize = 100_000;

/// Maximum number of space points.
pub const MAX_SPACE_STEPS: usize = 100_001;

/// Minimum number of space points.
pub const MIN_SPACE_STEPS: usize = 5;

/// Grid settings for the finite-difference engine.
///
/// `space_steps` is rounded up to an odd count so that `x = 0` is a node.
///
/// # Example
/// ```
/// use pricer_pricing::fd::FdConfig;
///
/// let config = FdConfig::builder().time_steps(200).space_steps(200).build().unwrap();
/// assert_eq!(config.space_steps(), 201);
/// assert_eq!(config.std_devs(), 6.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FdConfig {
    time_steps: usize,
    space_steps: usize,
    std_devs: f64,
}

impl Default for FdConfig {
    fn default() -> Self {
        Self {
            time_steps: 300,
            space_steps: 301,
            std_devs: 6.0,
        }
    }
}

impl FdConfig {
    /// Creates a builder seeded with the defaults (300 × 301, 6 std devs).
    #[inline]
    pub fn builder() -> FdConfigBuilder {
        FdConfigBuilder::default()
    }

    /// Nominal number of time steps to the last exercise date.
    #[inline]
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Number of space points (odd).
    #[inline]
    pub fn space_steps(&self) -> usize {
        self.space_steps
    }

    /// Half-width of the space grid in standard deviations of `x`.
    #[inline]
    pub fn std_devs(&self) -> f64 {
        self.std_devs
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.time_steps == 0 || self.time_steps > MAX_TIME_STEPS {
            return Err(EngineError::InvalidConfig {
                name: "time_steps",
                reason: format!("{} not in [1, {}]", self.time_steps, MAX_TIME_STEPS),
            });
        }
        if self.space_steps < MIN_SPACE_STEPS || self.space_steps > MAX_SPACE_STEPS {
            return Err(EngineError::InvalidConfig {
                name: "space_steps",
                reason: format!(
                    "{} not in [{}, {}]",
                    self.space_steps, MIN_SPACE_STEPS, MAX_SPACE_STEPS
                ),
            });
        }
        if !(self.std_devs.is_finite() && self.std_devs > 0.0) {
            return Err(EngineError::InvalidConfig {
                name: "std_devs",
                reason: format!("{} must be positive", self.std_devs),
            });
        }
        Ok(())
    }
}

/// Builder for [`FdConfig`].
#[derive(Clone, Debug, Default)]
pub struct FdConfigBuilder {
    time_steps: Option<usize>,
    space_steps: Option<usize>,
    std_devs: Option<f64>,
}

impl FdConfigBuilder {
    /// Set the nominal number of time steps.
    #[inline]
    pub fn time_steps(mut self, time_steps: usize) -> Self {
        self.time_steps = Some(time_steps);
        self
    }

    /// Set the number of space points.
    #[inline]
    pub fn space_steps(mut self, space_steps: usize) -> Self {
        self.space_steps = Some(space_steps);
        self
    }

    /// Set the grid half-width in standard deviations.
    #[inline]
    pub fn std_devs(mut self, std_devs: f64) -> Self {
        self.std_devs = Some(std_devs);
        self
    }

    /// Build and validate.
    pub fn build(self) -> Result<FdConfig, EngineError> {
        let defaults = FdConfig::default();
        let space_steps = self.space_steps.unwrap_or(defaults.space_steps);
        let config = FdConfig {
            time_steps: self.time_steps.unwrap_or(defaults.time_steps),
            space_steps: space_steps | 1,
            std_devs: self.std_devs.unwrap_or(defaults.std_devs),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FdConfig::builder().build().unwrap();
        assert_eq!(config, FdConfig::default());
        assert_eq!(config.time_steps(), 300);
    }

    #[test]
    fn test_space_steps_forced_odd() {
        assert_eq!(FdConfig::builder().space_steps(100).build().unwrap().space_steps(), 101);
        assert_eq!(FdConfig::builder().space_steps(151).build().unwrap().space_steps(), 151);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            FdConfig::builder().time_steps(0).build(),
            Err(EngineError::InvalidConfig { name: "time_steps", .. })
        ));
        assert!(matches!(
            FdConfig::builder().space_steps(2).build(),
            Err(EngineError::InvalidConfig { name: "space_steps", .. })
        ));
        assert!(matches!(
            FdConfig::builder().std_devs(-1.0).build(),
            Err(EngineError::InvalidConfig { name: "std_devs", .. })
        ));
    }
}
