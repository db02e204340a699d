//! Functional Coverage
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  FCOV COVERAGE ARCHITECTURE                                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Bin Builders → CoveragePoint::add_bins → rand / sample_coverage │
//! │                          ↓                        ↓              │
//! │                   Registered bins          CoverageSummary       │
//! │                                                   ↓              │
//! │                                               Reporter           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Value, range and transition bins are sampled and counted. Ignore and
//! illegal bins document excluded regions; they are neither drawn by `rand`
//! nor updated by `sample_coverage`, and observing an illegal value is not
//! reported.

mod bin;
mod point;
mod report;

pub use bin::{
    bin, bin_range, bin_transition, bin_values, bin_vector, ignore_bin, ignore_bin_range,
    illegal_bin, illegal_bin_range, BinDescriptor, BinKind, MAX_ENUMERATED_BINS,
    MAX_VECTOR_WIDTH,
};
pub use point::{Bin, BinOptions, CoveragePoint, DEFAULT_SCOPE};
pub use report::{BinSummary, CoverageMetric, CoverageSummary, Reporter, MIN_BIN_COLUMN_WIDTH};
