//! fcov: Functional Coverage for Constrained-Random Verification
//!
//! Declare bins over an integer value space, draw stimulus that
//! preferentially fills under-covered bins, and record observed values
//! against per-bin coverage goals.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    FCOV Architecture                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Bin        │    │ Coverage   │    │ Reporter   │            │
//! │   │ Builders   │───►│ Point      │───►│ (text /    │            │
//! │   │            │    │            │    │  JSON)     │            │
//! │   └────────────┘    └─────┬──────┘    └────────────┘            │
//! │                           │                                     │
//! │                     RandomSource                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use fcov::{bin, bin_range, bin_transition, BinOptions, CoverageConfig, CoveragePoint};
//!
//! let mut point = CoveragePoint::with_config(CoverageConfig::builder().seed(1).build()?)?;
//! point.set_scope("opcode");
//! point.add_bins_with(&bin(0), BinOptions::new().min_hits(2).name("nop"))?;
//! point.add_bins(&bin_range(1, 15, 3)?)?;
//! point.add_bins(&bin_transition(&[1, 2, 3])?)?;
//!
//! for _ in 0..1000 {
//!     let value = point.rand()?;
//!     point.sample_coverage(value);
//!     if point.coverage_completed() {
//!         break;
//!     }
//! }
//! println!("{}", point.summary_report());
//! # Ok::<(), fcov::FcovError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod coverage;
pub mod random;
mod result;

pub use config::{CoverageConfig, CoverageConfigBuilder};
pub use coverage::{
    bin, bin_range, bin_transition, bin_values, bin_vector, ignore_bin, ignore_bin_range,
    illegal_bin, illegal_bin_range, Bin, BinDescriptor, BinKind, BinOptions, BinSummary,
    CoverageMetric, CoveragePoint, CoverageSummary, Reporter,
};
pub use random::{RandomSource, Seed, SeededRandom};
pub use result::{FcovError, FcovResult};
