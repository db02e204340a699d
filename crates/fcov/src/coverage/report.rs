//! Coverage Report Generation
//!
//! A [`CoverageSummary`] is a read-only projection of a coverage point's bin
//! table. The [`Reporter`] lays it out as a fixed-width text table:
//!
//! ```text
//! =========================================================================
//! *** COVERAGE SUMMARY REPORT: opcode ***
//! =========================================================================
//! BINS                  HITS  MIN HITS  RAND WEIGHT  NAME          COVERED
//! -------------------------------------------------------------------------
//! (5)                      3         3            1  five              YES
//! (10 to 14)               0         1            1                     NO
//! -------------------------------------------------------------------------
//! Bins covered: 1/2 (50.00%)  Hits coverage: 75.00%
//! =========================================================================
//! ```
//!
//! Ignore and illegal bins are not listed.

use super::bin::BinKind;
use super::point::Bin;
use serde::Serialize;

/// Narrowest bin column the table is allowed to shrink to
pub const MIN_BIN_COLUMN_WIDTH: usize = 10;

const COLUMN_GAP: &str = "  ";
const HITS_WIDTH: usize = 8;
const MIN_HITS_WIDTH: usize = 8;
const WEIGHT_WIDTH: usize = 11;
const COVERED_WIDTH: usize = 7;

/// How coverage progress is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverageMetric {
    /// Share of sampleable bins that reached their goal
    #[default]
    Bins,
    /// Share of the summed goals achieved, each bin capped at its goal
    Hits,
}

/// One row of the summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinSummary {
    /// Registration index in the bin table
    pub index: usize,
    /// Bin kind
    pub kind: BinKind,
    /// Rendered bin contents, e.g. `(0 to 4)`
    pub description: String,
    /// Hits so far
    pub hits: u64,
    /// Coverage goal
    pub min_hits: u64,
    /// Configured sampling weight
    pub weight: u64,
    /// Display name
    pub name: String,
    /// `hits >= min_hits`
    pub covered: bool,
}

/// Snapshot of a coverage point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSummary {
    /// Scope of the coverage point
    pub scope: String,
    /// Number of sampleable bins
    pub total_bins: usize,
    /// Number of sampleable bins that reached their goal
    pub covered_bins: usize,
    /// Bin coverage percentage
    pub bins_coverage: f64,
    /// Hit coverage percentage
    pub hits_coverage: f64,
    /// Sampleable bins in registration order
    pub bins: Vec<BinSummary>,
}

impl CoverageSummary {
    pub(crate) fn from_bins(
        scope: &str,
        bins: &[Bin],
        bins_coverage: f64,
        hits_coverage: f64,
    ) -> Self {
        let rows: Vec<BinSummary> = bins
            .iter()
            .enumerate()
            .filter(|(_, bin)| bin.kind().is_sampleable())
            .map(|(index, bin)| BinSummary {
                index,
                kind: bin.kind(),
                description: bin.descriptor().to_string(),
                hits: bin.hits(),
                min_hits: bin.min_hits(),
                weight: bin.weight(),
                name: bin.name().to_string(),
                covered: bin.is_covered(),
            })
            .collect();
        Self {
            scope: scope.to_string(),
            total_bins: rows.len(),
            covered_bins: rows.iter().filter(|row| row.covered).count(),
            bins_coverage,
            hits_coverage,
            bins: rows,
        }
    }
}

/// Fixed-width text renderer for [`CoverageSummary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reporter {
    width: usize,
    name_width: usize,
}

impl Reporter {
    /// Create a reporter for a table `width` characters wide whose name
    /// column fits `name_width` characters
    #[must_use]
    pub fn new(width: usize, name_width: usize) -> Self {
        Self {
            width,
            name_width: name_width.max("NAME".len()),
        }
    }

    fn fixed_width(&self) -> usize {
        HITS_WIDTH
            + MIN_HITS_WIDTH
            + WEIGHT_WIDTH
            + self.name_width
            + COVERED_WIDTH
            + COLUMN_GAP.len() * 5
    }

    /// Width of the bin column, forced to [`MIN_BIN_COLUMN_WIDTH`] when the
    /// table is too narrow for the fixed columns
    #[must_use]
    pub fn bin_column_width(&self) -> usize {
        self.width
            .saturating_sub(self.fixed_width())
            .max(MIN_BIN_COLUMN_WIDTH)
    }

    /// Render the summary table
    #[must_use]
    pub fn render(&self, summary: &CoverageSummary) -> String {
        let available = self.width.saturating_sub(self.fixed_width());
        if available < MIN_BIN_COLUMN_WIDTH {
            tracing::warn!(
                scope = %summary.scope,
                width = self.width,
                required = self.fixed_width() + MIN_BIN_COLUMN_WIDTH,
                "report width too small, forcing minimum column spacing"
            );
        }
        let bin_width = self.bin_column_width();
        let line_width = bin_width + self.fixed_width();
        let major = "=".repeat(line_width);
        let minor = "-".repeat(line_width);

        let mut out = String::new();
        out.push_str(&major);
        out.push('\n');
        out.push_str(&format!(
            "*** COVERAGE SUMMARY REPORT: {} ***\n",
            summary.scope
        ));
        out.push_str(&major);
        out.push('\n');
        out.push_str(&self.row(
            bin_width,
            "BINS",
            "HITS",
            "MIN HITS",
            "RAND WEIGHT",
            "NAME",
            "COVERED",
        ));
        out.push_str(&minor);
        out.push('\n');

        for bin in &summary.bins {
            let mut chunks = wrap(&bin.description, bin_width).into_iter();
            let first = chunks.next().unwrap_or_default();
            out.push_str(&self.row(
                bin_width,
                &first,
                &bin.hits.to_string(),
                &bin.min_hits.to_string(),
                &bin.weight.to_string(),
                &bin.name,
                if bin.covered { "YES" } else { "NO" },
            ));
            for chunk in chunks {
                out.push_str(&chunk);
                out.push('\n');
            }
        }

        out.push_str(&minor);
        out.push('\n');
        out.push_str(&format!(
            "Bins covered: {}/{} ({:.2}%){}Hits coverage: {:.2}%\n",
            summary.covered_bins,
            summary.total_bins,
            summary.bins_coverage,
            COLUMN_GAP,
            summary.hits_coverage
        ));
        out.push_str(&major);
        out.push('\n');
        out
    }

    #[allow(clippy::too_many_arguments)]
    fn row(
        &self,
        bin_width: usize,
        bins: &str,
        hits: &str,
        min_hits: &str,
        weight: &str,
        name: &str,
        covered: &str,
    ) -> String {
        let gap = COLUMN_GAP;
        let line = format!(
            "{bins:<bin_width$}{gap}{hits:>HITS_WIDTH$}{gap}{min_hits:>MIN_HITS_WIDTH$}{gap}\
             {weight:>WEIGHT_WIDTH$}{gap}{name:<name_width$}{gap}{covered:>COVERED_WIDTH$}",
            name_width = self.name_width,
        );
        format!("{}\n", line.trim_end())
    }
}

/// Split text into lines of at most `width` characters
fn wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() || width == 0 {
        return vec![text.to_string()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text_is_single_line() {
        assert_eq!(wrap("(1, 2)", 10), vec!["(1, 2)".to_string()]);
    }

    #[test]
    fn test_wrap_splits_at_width() {
        assert_eq!(
            wrap("(1->2->3->4)", 5),
            vec!["(1->2".to_string(), "->3->".to_string(), "4)".to_string()]
        );
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap("", 5), vec![String::new()]);
    }

    #[test]
    fn test_name_column_fits_header() {
        let reporter = Reporter::new(100, 0);
        assert_eq!(reporter.name_width, 4);
    }

    #[test]
    fn test_narrow_table_forces_minimum_bin_column() {
        let reporter = Reporter::new(10, 20);
        assert_eq!(reporter.bin_column_width(), MIN_BIN_COLUMN_WIDTH);
    }

    #[test]
    fn test_bin_column_takes_remaining_width() {
        let reporter = Reporter::new(100, 20);
        let fixed = 8 + 8 + 11 + 20 + 7 + 10;
        assert_eq!(reporter.bin_column_width(), 100 - fixed);
    }
}
