//! Coverage Point
//!
//! Owns the registered bin table and implements registration, coverage-driven
//! value generation and hit tracking.
//!
//! ```
//! use fcov::{bin, bin_range, BinOptions, CoverageConfig, CoveragePoint};
//!
//! let config = CoverageConfig::builder().seed(7).build()?;
//! let mut point = CoveragePoint::with_config(config)?;
//! point.add_bins_with(&bin(5), BinOptions::new().min_hits(3).name("five"))?;
//! point.add_bins(&bin_range(10, 19, 2)?)?;
//!
//! while !point.coverage_completed() {
//!     let value = point.rand()?;
//!     point.sample_coverage(value);
//! }
//! assert!(point.bins()[0].is_covered());
//! # Ok::<(), fcov::FcovError>(())
//! ```

use super::bin::{BinDescriptor, BinKind};
use super::report::{CoverageMetric, CoverageSummary, Reporter};
use crate::config::CoverageConfig;
use crate::random::{RandomSource, SeededRandom};
use crate::result::{FcovError, FcovResult};
use std::io::Write;

/// Scope name of a freshly created coverage point
pub const DEFAULT_SCOPE: &str = "FUNC_COV";

/// Goal, weight and display name applied to every bin of one registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinOptions {
    min_hits: u64,
    weight: u64,
    name: String,
}

impl Default for BinOptions {
    fn default() -> Self {
        Self {
            min_hits: 1,
            weight: 1,
            name: String::new(),
        }
    }
}

impl BinOptions {
    /// Default options: goal 1, weight 1, no name
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hits required to mark each bin covered
    #[must_use]
    pub const fn min_hits(mut self, min_hits: u64) -> Self {
        self.min_hits = min_hits;
        self
    }

    /// Relative sampling weight
    #[must_use]
    pub const fn weight(mut self, weight: u64) -> Self {
        self.weight = weight;
        self
    }

    /// Display name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A bin registered in a coverage point, with its live counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bin {
    descriptor: BinDescriptor,
    transition_progress: usize,
    hits: u64,
    min_hits: u64,
    weight: u64,
    name: String,
}

impl Bin {
    /// Descriptor this bin was registered from
    #[must_use]
    pub const fn descriptor(&self) -> &BinDescriptor {
        &self.descriptor
    }

    /// Bin kind
    #[must_use]
    pub const fn kind(&self) -> BinKind {
        self.descriptor.kind()
    }

    /// Bin values
    #[must_use]
    pub fn values(&self) -> &[i64] {
        self.descriptor.values()
    }

    /// Qualifying observations so far
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Coverage goal
    #[must_use]
    pub const fn min_hits(&self) -> u64 {
        self.min_hits
    }

    /// Configured sampling weight
    #[must_use]
    pub const fn weight(&self) -> u64 {
        self.weight
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the next expected value of a transition (always 0 otherwise)
    #[must_use]
    pub const fn transition_progress(&self) -> usize {
        self.transition_progress
    }

    /// `hits >= min_hits`
    #[must_use]
    pub const fn is_covered(&self) -> bool {
        self.hits >= self.min_hits
    }

    /// Weight used by the next draw: configured weight until covered, then 0
    const fn sampling_weight(&self) -> u64 {
        if self.is_covered() {
            0
        } else {
            self.weight
        }
    }

    /// Apply one observed value. Returns true when this made the bin covered.
    fn observe(&mut self, value: i64) -> bool {
        let was_covered = self.is_covered();
        match self.kind() {
            BinKind::Value => {
                let matches = self.values().iter().filter(|&&v| v == value).count();
                self.hits += matches as u64;
            }
            BinKind::Range => {
                if self.descriptor.contains(value) {
                    self.hits += 1;
                }
            }
            BinKind::Transition => {
                let last = self.values().len() - 1;
                if self.values()[self.transition_progress] != value {
                    self.transition_progress = 0;
                } else if self.transition_progress == last {
                    self.transition_progress = 0;
                    self.hits += 1;
                } else {
                    self.transition_progress += 1;
                }
            }
            BinKind::ValueIgnore
            | BinKind::ValueIllegal
            | BinKind::RangeIgnore
            | BinKind::RangeIllegal => {}
        }
        !was_covered && self.is_covered()
    }
}

/// Transition sequence being emitted by `rand`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveTransition {
    bin_index: usize,
    next_value_index: usize,
}

/// Functional coverage point
///
/// Registration order is preserved; it is the report order and the order
/// in which candidates are offered to the weighted draw.
#[derive(Debug)]
pub struct CoveragePoint<R: RandomSource = SeededRandom> {
    scope: String,
    config: CoverageConfig,
    bins: Vec<Bin>,
    active_transition: Option<ActiveTransition>,
    rng: R,
}

impl CoveragePoint<SeededRandom> {
    /// Create an empty point with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(CoverageConfig::default(), SeededRandom::from_entropy())
    }

    /// Create an empty point; the random source is seeded from `config.seed`
    pub fn with_config(config: CoverageConfig) -> FcovResult<Self> {
        let rng = config
            .seed()
            .map_or_else(SeededRandom::from_entropy, SeededRandom::new);
        Self::with_rng(config, rng)
    }
}

impl Default for CoveragePoint<SeededRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> CoveragePoint<R> {
    /// Create an empty point drawing from a caller-supplied random source
    pub fn with_rng(config: CoverageConfig, rng: R) -> FcovResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, rng))
    }

    fn from_parts(config: CoverageConfig, rng: R) -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_string(),
            bins: Vec::new(),
            active_transition: None,
            config,
            rng,
        }
    }

    /// Set the display name used in logs and reports
    pub fn set_scope(&mut self, scope: impl Into<String>) {
        self.scope = scope.into();
    }

    /// Display name used in logs and reports
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Configuration fixed at construction
    #[must_use]
    pub const fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Registered bins, in registration order
    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Number of registered bins, ignore and illegal bins included
    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// `(bin index, next value index)` of the transition `rand` is emitting
    #[must_use]
    pub fn active_transition(&self) -> Option<(usize, usize)> {
        self.active_transition
            .map(|t| (t.bin_index, t.next_value_index))
    }

    /// Register bins with goal 1, weight 1 and no name
    pub fn add_bins(&mut self, bins: &[BinDescriptor]) -> FcovResult<()> {
        self.add_bins_with(bins, BinOptions::default())
    }

    /// Register bins with the given goal, weight and name
    ///
    /// The whole call is validated before any bin is appended: either every
    /// descriptor is registered or none is. The summed weight of all
    /// sampleable bins must fit in a `u64`.
    pub fn add_bins_with(
        &mut self,
        bins: &[BinDescriptor],
        options: BinOptions,
    ) -> FcovResult<()> {
        self.check_registration(bins, &options)?;

        if self.config.log_calls {
            tracing::info!(
                scope = %self.scope,
                bins = bins.len(),
                min_hits = options.min_hits,
                weight = options.weight,
                name = %options.name,
                "add_bins"
            );
        }

        self.bins.extend(bins.iter().map(|descriptor| Bin {
            descriptor: descriptor.clone(),
            transition_progress: 0,
            hits: 0,
            min_hits: options.min_hits,
            weight: options.weight,
            name: options.name.clone(),
        }));
        Ok(())
    }

    fn check_registration(&self, bins: &[BinDescriptor], options: &BinOptions) -> FcovResult<()> {
        let requested = self.bins.len() + bins.len();
        if requested > self.config.max_bins {
            return Err(FcovError::BinTableFull {
                scope: self.scope.clone(),
                requested,
                capacity: self.config.max_bins,
            });
        }
        if options.min_hits == 0 {
            return Err(FcovError::invalid_argument("min_hits must be at least 1"));
        }
        let name_length = options.name.chars().count();
        if name_length > self.config.max_bin_name_length {
            return Err(FcovError::BinNameTooLong {
                name: options.name.clone(),
                length: name_length,
                capacity: self.config.max_bin_name_length,
            });
        }
        let added_weight = bins
            .iter()
            .filter(|descriptor| descriptor.kind().is_sampleable())
            .try_fold(0_u64, |total, _| total.checked_add(options.weight));
        let total_weight = self
            .sampleable_bins()
            .try_fold(0_u64, |total, bin| total.checked_add(bin.weight))
            .zip(added_weight)
            .and_then(|(current, added)| current.checked_add(added));
        if total_weight.is_none() {
            return Err(FcovError::invalid_argument(format!(
                "total sampling weight of scope {} would exceed {}",
                self.scope,
                u64::MAX
            )));
        }
        for descriptor in bins {
            if descriptor.count() == 0 {
                return Err(FcovError::EmptyBin {
                    kind: descriptor.kind(),
                });
            }
            if descriptor.count() > self.config.max_bin_values {
                return Err(FcovError::TooManyBinValues {
                    bin: descriptor.to_string(),
                    count: descriptor.count(),
                    capacity: self.config.max_bin_values,
                });
            }
        }
        Ok(())
    }

    /// Generate a value that makes progress toward uncovered bins
    ///
    /// While a transition bin is being emitted every call returns its next
    /// value. Otherwise a bin is drawn with probability proportional to its
    /// weight among the bins still below their goal; once every bin is
    /// covered all sampleable bins are drawn from again at their configured
    /// weight. Ignore and illegal bins are never drawn.
    pub fn rand(&mut self) -> FcovResult<i64> {
        if let Some(value) = self.continue_transition() {
            return Ok(value);
        }

        let mut candidates: Vec<(usize, u64)> = self
            .bins
            .iter()
            .enumerate()
            .filter(|(_, bin)| bin.kind().is_sampleable())
            .map(|(index, bin)| (index, bin.sampling_weight()))
            .collect();

        if candidates.iter().all(|&(_, weight)| weight == 0) {
            // Coverage closure: keep generating from every bin
            for (index, weight) in &mut candidates {
                *weight = self.bins[*index].weight;
            }
        }

        let index = self
            .rng
            .weighted(&candidates)
            .ok_or_else(|| FcovError::NoSampleableBins {
                scope: self.scope.clone(),
            })?;
        let value = self.value_from_bin(index)?;

        if self.config.log_calls {
            tracing::debug!(scope = %self.scope, bin = index, value, "rand");
        }
        Ok(value)
    }

    fn continue_transition(&mut self) -> Option<i64> {
        let active = self.active_transition?;
        let values = self.bins[active.bin_index].values();
        let value = values[active.next_value_index];
        let next_value_index = active.next_value_index + 1;

        self.active_transition = if next_value_index < values.len() {
            Some(ActiveTransition {
                next_value_index,
                ..active
            })
        } else {
            None
        };

        if self.config.log_calls {
            tracing::debug!(
                scope = %self.scope,
                bin = active.bin_index,
                value,
                position = active.next_value_index,
                "rand (transition)"
            );
        }
        Some(value)
    }

    fn value_from_bin(&mut self, index: usize) -> FcovResult<i64> {
        let bin = &self.bins[index];
        match bin.kind() {
            BinKind::Value => match bin.values() {
                &[value] => Ok(value),
                values => self.rng.choose(values).ok_or(FcovError::EmptyBin {
                    kind: BinKind::Value,
                }),
            },
            BinKind::Range => {
                let (min, max) = bin
                    .descriptor
                    .range_bounds()
                    .ok_or(FcovError::InvalidBinKind {
                        kind: BinKind::Range,
                        index,
                    })?;
                Ok(self.rng.uniform(min, max))
            }
            BinKind::Transition => {
                let values = bin.values();
                let first = values[0];
                if values.len() > 1 {
                    self.active_transition = Some(ActiveTransition {
                        bin_index: index,
                        next_value_index: 1,
                    });
                }
                Ok(first)
            }
            kind => Err(FcovError::InvalidBinKind { kind, index }),
        }
    }

    /// Record an observed value against every bin
    ///
    /// Bins are evaluated independently, so one value can hit several bins
    /// and advance several transitions at once. Ignore and illegal bins are
    /// left untouched.
    pub fn sample_coverage(&mut self, value: i64) {
        let log_calls = self.config.log_calls;
        if log_calls {
            tracing::trace!(scope = %self.scope, value, "sample_coverage");
        }
        for (index, bin) in self.bins.iter_mut().enumerate() {
            if bin.observe(value) && log_calls {
                tracing::debug!(
                    scope = %self.scope,
                    bin = index,
                    hits = bin.hits,
                    "bin covered"
                );
            }
        }
    }

    /// Whether every sampleable bin has reached its goal
    #[must_use]
    pub fn coverage_completed(&self) -> bool {
        self.sampleable_bins().all(Bin::is_covered)
    }

    /// Coverage percentage by the given metric
    #[must_use]
    pub fn coverage(&self, metric: CoverageMetric) -> f64 {
        let (done, total) = match metric {
            CoverageMetric::Bins => self
                .sampleable_bins()
                .fold((0_u64, 0_u64), |(done, total), bin| {
                    (done + u64::from(bin.is_covered()), total + 1)
                }),
            CoverageMetric::Hits => self
                .sampleable_bins()
                .fold((0_u64, 0_u64), |(done, total), bin| {
                    (done + bin.hits.min(bin.min_hits), total + bin.min_hits)
                }),
        };
        if total == 0 {
            return 100.0; // Vacuously true
        }
        done as f64 / total as f64 * 100.0
    }

    fn sampleable_bins(&self) -> impl Iterator<Item = &Bin> {
        self.bins.iter().filter(|bin| bin.kind().is_sampleable())
    }

    /// Snapshot of the bin table for reporting
    #[must_use]
    pub fn summary(&self) -> CoverageSummary {
        CoverageSummary::from_bins(
            &self.scope,
            &self.bins,
            self.coverage(CoverageMetric::Bins),
            self.coverage(CoverageMetric::Hits),
        )
    }

    fn reporter(&self) -> Reporter {
        Reporter::new(self.config.report_width, self.config.max_bin_name_length)
    }

    /// Render the summary table
    #[must_use]
    pub fn summary_report(&self) -> String {
        self.reporter().render(&self.summary())
    }

    /// Write the summary table
    pub fn write_summary<W: Write>(&self, out: &mut W) -> FcovResult<()> {
        out.write_all(self.summary_report().as_bytes())?;
        Ok(())
    }

    /// Write the summary snapshot as pretty-printed JSON
    pub fn write_summary_json<W: Write>(&self, out: &mut W) -> FcovResult<()> {
        serde_json::to_writer_pretty(&mut *out, &self.summary())?;
        writeln!(out)?;
        Ok(())
    }

    /// Print the summary table to stdout
    pub fn print_summary(&self) -> FcovResult<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.write_summary(&mut lock)
    }
}
