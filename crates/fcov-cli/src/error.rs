//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Coverage plan is malformed or incomplete
    #[error("Invalid coverage plan: {message}")]
    Plan {
        /// Error message
        message: String,
    },

    /// Plan file could not be parsed
    #[error("Failed to parse coverage plan: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Coverage library error
    #[error("Coverage error: {0}")]
    Coverage(#[from] fcov::FcovError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Campaign ended before every bin reached its goal
    #[error("Coverage incomplete after {iterations} iterations ({coverage:.2}% of bins covered)")]
    Incomplete {
        /// Iterations run
        iterations: u64,
        /// Bin coverage percentage reached
        coverage: f64,
    },
}

impl CliError {
    /// Create a plan error
    #[must_use]
    pub fn plan(message: impl Into<String>) -> Self {
        Self::Plan {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_error() {
        let err = CliError::plan("range bin needs 'min'");
        assert!(err.to_string().contains("Invalid coverage plan"));
        assert!(err.to_string().contains("min"));
    }

    #[test]
    fn test_coverage_error_from() {
        let err: CliError = fcov::FcovError::InvalidRange { min: 2, max: 1 }.into();
        assert!(err.to_string().starts_with("Coverage error"));
    }

    #[test]
    fn test_incomplete_error() {
        let err = CliError::Incomplete {
            iterations: 10,
            coverage: 50.0,
        };
        assert!(err.to_string().contains("10 iterations"));
        assert!(err.to_string().contains("50.00%"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }
}
