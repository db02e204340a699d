//! Declarative coverage plans
//!
//! A plan is a YAML document naming a scope, an optional configuration and
//! the bins to register:
//!
//! ```yaml
//! scope: alu_opcode
//! config:
//!   max_bins: 64
//! bins:
//!   - kind: value
//!     values: [0]
//!     min_hits: 3
//!     name: nop
//!   - kind: range
//!     min: 1
//!     max: 15
//!     num_bins: 3
//!   - kind: transition
//!     values: [1, 2, 3]
//!   - kind: illegal_range
//!     min: 200
//!     max: 255
//! ```

use crate::error::{CliError, CliResult};
use fcov::{BinDescriptor, BinOptions, CoverageConfig, CoveragePoint};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bin shapes a plan can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanBinKind {
    /// `bin` / `bin_values` over `values`
    Value,
    /// `bin_range(min, max, num_bins)`
    Range,
    /// `bin_vector(width)`
    Vector,
    /// `bin_transition(values)`
    Transition,
    /// One `ignore_bin` per entry of `values`
    Ignore,
    /// `ignore_bin_range(min, max)`
    IgnoreRange,
    /// One `illegal_bin` per entry of `values`
    Illegal,
    /// `illegal_bin_range(min, max)`
    IllegalRange,
}

const fn default_one() -> u64 {
    1
}

/// One registration in a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanBin {
    /// Bin shape
    pub kind: PlanBinKind,
    /// Values for value, transition, ignore and illegal bins
    #[serde(default)]
    pub values: Vec<i64>,
    /// Lower bound for range kinds
    #[serde(default)]
    pub min: Option<i64>,
    /// Upper bound for range kinds
    #[serde(default)]
    pub max: Option<i64>,
    /// Number of range bins (0 = one bin per value)
    #[serde(default)]
    pub num_bins: u32,
    /// Field width for vector bins
    #[serde(default)]
    pub width: Option<u32>,
    /// Coverage goal
    #[serde(default = "default_one")]
    pub min_hits: u64,
    /// Sampling weight
    #[serde(default = "default_one")]
    pub weight: u64,
    /// Display name
    #[serde(default)]
    pub name: String,
}

impl PlanBin {
    fn bounds(&self) -> CliResult<(i64, i64)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(CliError::plan(format!(
                "{:?} bin needs both 'min' and 'max'",
                self.kind
            ))),
        }
    }

    fn values(&self) -> CliResult<&[i64]> {
        if self.values.is_empty() {
            return Err(CliError::plan(format!(
                "{:?} bin needs at least one entry in 'values'",
                self.kind
            )));
        }
        Ok(&self.values)
    }

    /// Build the descriptors this entry registers
    pub fn descriptors(&self) -> CliResult<Vec<BinDescriptor>> {
        let bins = match self.kind {
            PlanBinKind::Value => match self.values()? {
                &[value] => fcov::bin(value),
                values => fcov::bin_values(values)?,
            },
            PlanBinKind::Range => {
                let (min, max) = self.bounds()?;
                fcov::bin_range(min, max, self.num_bins)?
            }
            PlanBinKind::Vector => {
                let width = self
                    .width
                    .ok_or_else(|| CliError::plan("vector bin needs 'width'"))?;
                fcov::bin_vector(width)?
            }
            PlanBinKind::Transition => fcov::bin_transition(self.values()?)?,
            PlanBinKind::Ignore => self
                .values()?
                .iter()
                .flat_map(|&value| fcov::ignore_bin(value))
                .collect(),
            PlanBinKind::IgnoreRange => {
                let (min, max) = self.bounds()?;
                fcov::ignore_bin_range(min, max)?
            }
            PlanBinKind::Illegal => self
                .values()?
                .iter()
                .flat_map(|&value| fcov::illegal_bin(value))
                .collect(),
            PlanBinKind::IllegalRange => {
                let (min, max) = self.bounds()?;
                fcov::illegal_bin_range(min, max)?
            }
        };
        Ok(bins)
    }

    fn options(&self) -> BinOptions {
        BinOptions::new()
            .min_hits(self.min_hits)
            .weight(self.weight)
            .name(self.name.clone())
    }
}

/// A complete coverage plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePlan {
    /// Scope of the coverage point
    #[serde(default)]
    pub scope: Option<String>,
    /// Coverage point configuration
    #[serde(default)]
    pub config: CoverageConfig,
    /// Bins in registration order
    pub bins: Vec<PlanBin>,
}

impl CoveragePlan {
    /// Parse a plan from YAML text
    pub fn from_yaml_str(text: &str) -> CliResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Read and parse a plan file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Build a coverage point with every bin of the plan registered
    ///
    /// `seed` overrides the seed of the plan's configuration.
    pub fn build_point(&self, seed: Option<u64>) -> CliResult<CoveragePoint> {
        let mut config = self.config.clone();
        if seed.is_some() {
            config.seed = seed;
        }
        let mut point = CoveragePoint::with_config(config)?;
        if let Some(scope) = &self.scope {
            point.set_scope(scope.clone());
        }
        for entry in &self.bins {
            point.add_bins_with(&entry.descriptors()?, entry.options())?;
        }
        Ok(point)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fcov::BinKind;

    const PLAN: &str = r"
scope: alu_opcode
config:
  max_bins: 64
  seed: 9
bins:
  - kind: value
    values: [0]
    min_hits: 3
    name: nop
  - kind: value
    values: [4, 5]
  - kind: range
    min: 1
    max: 15
    num_bins: 3
  - kind: vector
    width: 2
  - kind: transition
    values: [1, 2, 3]
    weight: 4
  - kind: ignore
    values: [16, 17]
  - kind: illegal_range
    min: 200
    max: 255
";

    #[test]
    fn test_parse_plan() {
        let plan = CoveragePlan::from_yaml_str(PLAN).unwrap();
        assert_eq!(plan.scope.as_deref(), Some("alu_opcode"));
        assert_eq!(plan.config.max_bins, 64);
        assert_eq!(plan.config.seed, Some(9));
        assert_eq!(plan.bins.len(), 7);
        assert_eq!(plan.bins[0].min_hits, 3);
        assert_eq!(plan.bins[1].min_hits, 1);
        assert_eq!(plan.bins[4].weight, 4);
        assert_eq!(plan.bins[6].kind, PlanBinKind::IllegalRange);
    }

    #[test]
    fn test_build_point() {
        let plan = CoveragePlan::from_yaml_str(PLAN).unwrap();
        let point = plan.build_point(None).unwrap();
        assert_eq!(point.scope(), "alu_opcode");
        // 1 + 1 + 3 + 4 + 1 + 2 + 1
        assert_eq!(point.num_bins(), 13);
        assert_eq!(point.bins()[0].name(), "nop");
        assert_eq!(point.bins()[0].min_hits(), 3);
        assert_eq!(point.bins()[1].values(), &[4, 5]);
        assert_eq!(point.bins()[9].kind(), BinKind::Transition);
        assert_eq!(point.bins()[9].weight(), 4);
        assert_eq!(point.bins()[10].kind(), BinKind::ValueIgnore);
        assert_eq!(point.bins()[12].kind(), BinKind::RangeIllegal);
    }

    #[test]
    fn test_seed_override() {
        let plan = CoveragePlan::from_yaml_str(PLAN).unwrap();
        let point = plan.build_point(Some(77)).unwrap();
        assert_eq!(point.config().seed, Some(77));
    }

    #[test]
    fn test_missing_bounds() {
        let plan = CoveragePlan::from_yaml_str("bins:\n  - kind: range\n    min: 3\n").unwrap();
        let err = plan.build_point(None).unwrap_err();
        assert!(err.to_string().contains("'min' and 'max'"));
    }

    #[test]
    fn test_missing_values() {
        let plan = CoveragePlan::from_yaml_str("bins:\n  - kind: transition\n").unwrap();
        assert!(matches!(
            plan.build_point(None),
            Err(CliError::Plan { .. })
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err =
            CoveragePlan::from_yaml_str("bins:\n  - kind: value\n    vals: [1]\n").unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
    }

    #[test]
    fn test_capacity_error_propagates() {
        let plan = CoveragePlan::from_yaml_str(
            "config:\n  max_bins: 2\nbins:\n  - kind: vector\n    width: 2\n",
        )
        .unwrap();
        assert!(matches!(
            plan.build_point(None),
            Err(CliError::Coverage(fcov::FcovError::BinTableFull { .. }))
        ));
    }
}
