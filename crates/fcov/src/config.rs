//! Coverage point configuration
//!
//! Capacities, report layout and random seeding are fixed once when a
//! [`CoveragePoint`](crate::CoveragePoint) is constructed.

use crate::random::Seed;
use crate::result::{FcovError, FcovResult};
use serde::{Deserialize, Serialize};

/// Default bin table capacity
pub const DEFAULT_MAX_BINS: usize = 1000;
/// Default number of values a single bin can hold
pub const DEFAULT_MAX_BIN_VALUES: usize = 10;
/// Default bin name capacity, in characters
pub const DEFAULT_MAX_BIN_NAME_LENGTH: usize = 20;
/// Default summary table width, in characters
pub const DEFAULT_REPORT_WIDTH: usize = 100;

/// Coverage point configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Bin table capacity
    pub max_bins: usize,
    /// Values per bin descriptor
    pub max_bin_values: usize,
    /// Bin name capacity, in characters
    pub max_bin_name_length: usize,
    /// Total width of the summary table
    pub report_width: usize,
    /// Seed for the default random source (`None` draws from entropy)
    pub seed: Option<u64>,
    /// Emit a log event for every registration and generated value
    pub log_calls: bool,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            max_bins: DEFAULT_MAX_BINS,
            max_bin_values: DEFAULT_MAX_BIN_VALUES,
            max_bin_name_length: DEFAULT_MAX_BIN_NAME_LENGTH,
            report_width: DEFAULT_REPORT_WIDTH,
            seed: None,
            log_calls: true,
        }
    }
}

impl CoverageConfig {
    /// Create a builder for coverage config
    #[must_use]
    pub fn builder() -> CoverageConfigBuilder {
        CoverageConfigBuilder::default()
    }

    /// Seed for the default random source, if one was configured
    #[must_use]
    pub fn seed(&self) -> Option<Seed> {
        self.seed.map(Seed::from_u64)
    }

    /// Reject capacities that would make every registration fail
    pub fn validate(&self) -> FcovResult<()> {
        if self.max_bins == 0 {
            return Err(FcovError::invalid_config("max_bins must be at least 1"));
        }
        if self.max_bin_values == 0 {
            return Err(FcovError::invalid_config(
                "max_bin_values must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Builder for coverage configuration
#[derive(Debug)]
pub struct CoverageConfigBuilder {
    config: CoverageConfig,
}

impl Default for CoverageConfigBuilder {
    fn default() -> Self {
        Self {
            config: CoverageConfig::default(),
        }
    }
}

impl CoverageConfigBuilder {
    /// Set the bin table capacity
    #[must_use]
    pub const fn max_bins(mut self, max: usize) -> Self {
        self.config.max_bins = max;
        self
    }

    /// Set the per-bin value capacity
    #[must_use]
    pub const fn max_bin_values(mut self, max: usize) -> Self {
        self.config.max_bin_values = max;
        self
    }

    /// Set the bin name capacity
    #[must_use]
    pub const fn max_bin_name_length(mut self, max: usize) -> Self {
        self.config.max_bin_name_length = max;
        self
    }

    /// Set the summary table width
    #[must_use]
    pub const fn report_width(mut self, width: usize) -> Self {
        self.config.report_width = width;
        self
    }

    /// Seed the default random source
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Enable or disable per-call log events
    #[must_use]
    pub const fn log_calls(mut self, enabled: bool) -> Self {
        self.config.log_calls = enabled;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> FcovResult<CoverageConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoverageConfig::default();
        assert_eq!(config.max_bins, 1000);
        assert_eq!(config.max_bin_values, 10);
        assert_eq!(config.max_bin_name_length, 20);
        assert_eq!(config.report_width, 100);
        assert!(config.seed.is_none());
        assert!(config.log_calls);
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = CoverageConfig::builder()
            .max_bins(8)
            .max_bin_values(4)
            .max_bin_name_length(12)
            .report_width(80)
            .seed(42)
            .log_calls(false)
            .build()
            .unwrap();
        assert_eq!(config.max_bins, 8);
        assert_eq!(config.max_bin_values, 4);
        assert_eq!(config.max_bin_name_length, 12);
        assert_eq!(config.report_width, 80);
        assert_eq!(config.seed(), Some(Seed::from_u64(42)));
        assert!(!config.log_calls);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = CoverageConfig::builder().max_bins(0).build().unwrap_err();
        assert!(matches!(err, FcovError::InvalidConfig { .. }));

        let err = CoverageConfig::builder()
            .max_bin_values(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("max_bin_values"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CoverageConfig = serde_json::from_str(r#"{"max_bins": 16}"#).unwrap();
        assert_eq!(config.max_bins, 16);
        assert_eq!(config.max_bin_values, DEFAULT_MAX_BIN_VALUES);
        assert!(config.log_calls);
    }
}
