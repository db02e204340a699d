//! fcov CLI library
//!
//! Loads YAML coverage plans, drives them to closure and reports the
//! resulting bin tables.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
mod output;
pub mod plan;
mod runner;

pub use commands::{CheckArgs, Cli, ColorArg, Commands, RunArgs};
pub use config::{init_logging, CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use plan::{CoveragePlan, PlanBin, PlanBinKind};
pub use runner::{CampaignOutcome, CampaignRunner};
