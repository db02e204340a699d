//! Coverage campaign runner
//!
//! Drives a coverage point to closure: generate a value, observe it, repeat
//! until every bin reaches its goal or the iteration budget runs out.

use crate::error::CliResult;
use crate::output::ProgressReporter;
use fcov::{CoverageMetric, CoveragePoint, RandomSource};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Outcome of one campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignOutcome {
    /// `rand` / `sample_coverage` round trips performed
    pub iterations: u64,
    /// Whether every bin reached its goal
    pub completed: bool,
    /// Bin coverage percentage at the end
    pub bins_coverage: f64,
    /// Hit coverage percentage at the end
    pub hits_coverage: f64,
    /// Wall-clock duration
    pub duration: Duration,
}

/// Runs coverage campaigns with an iteration budget
#[derive(Debug)]
pub struct CampaignRunner {
    max_iterations: u64,
    reporter: ProgressReporter,
}

impl CampaignRunner {
    /// Create a runner that stops after `max_iterations` round trips
    #[must_use]
    pub fn new(max_iterations: u64, reporter: ProgressReporter) -> Self {
        Self {
            max_iterations,
            reporter,
        }
    }

    /// Loop `rand` → `sample_coverage` until closure or budget exhaustion
    pub fn run<R: RandomSource>(
        &mut self,
        point: &mut CoveragePoint<R>,
    ) -> CliResult<CampaignOutcome> {
        let start = Instant::now();
        let mut iterations = 0;

        self.reporter
            .start_progress(self.max_iterations, &format!("closing {}", point.scope()));
        while !point.coverage_completed() && iterations < self.max_iterations {
            let value = point.rand()?;
            point.sample_coverage(value);
            iterations += 1;
            self.reporter.increment(1);
        }
        self.reporter.finish();

        let outcome = CampaignOutcome {
            iterations,
            completed: point.coverage_completed(),
            bins_coverage: point.coverage(CoverageMetric::Bins),
            hits_coverage: point.coverage(CoverageMetric::Hits),
            duration: start.elapsed(),
        };
        tracing::info!(
            scope = point.scope(),
            iterations,
            completed = outcome.completed,
            "campaign finished"
        );
        Ok(outcome)
    }
}
