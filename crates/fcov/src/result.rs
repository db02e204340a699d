//! Result and error types for fcov.

use crate::coverage::BinKind;
use thiserror::Error;

/// Result type for fcov operations
pub type FcovResult<T> = Result<T, FcovError>;

/// Errors that can occur while building, registering or sampling bins
#[derive(Debug, Error)]
pub enum FcovError {
    /// Registering would exceed the bin table capacity
    #[error("Bin table of '{scope}' is full: {requested} bins requested, capacity is {capacity}")]
    BinTableFull {
        /// Scope of the coverage point
        scope: String,
        /// Bins that would be in the table after registration
        requested: usize,
        /// Configured table capacity
        capacity: usize,
    },

    /// A descriptor holds more values than a bin can store
    #[error("Bin {bin} holds {count} values, capacity is {capacity}")]
    TooManyBinValues {
        /// Rendered descriptor
        bin: String,
        /// Number of values in the descriptor
        count: usize,
        /// Configured per-bin capacity
        capacity: usize,
    },

    /// Bin display name is longer than the configured capacity
    #[error("Bin name '{name}' is {length} characters, capacity is {capacity}")]
    BinNameTooLong {
        /// Offending name
        name: String,
        /// Length in characters
        length: usize,
        /// Configured name capacity
        capacity: usize,
    },

    /// Range bounds are inverted
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Lower bound
        min: i64,
        /// Upper bound
        max: i64,
    },

    /// Per-value enumeration would produce too many bins
    #[error("Enumerating {count} values exceeds the limit of {limit} bins")]
    EnumerationTooLarge {
        /// Number of values requested
        count: u128,
        /// Largest accepted enumeration
        limit: u128,
    },

    /// A value set or transition sequence has no members
    #[error("{kind} bin needs at least one value")]
    EmptyBin {
        /// Kind of the empty bin
        kind: BinKind,
    },

    /// An argument is outside its accepted domain
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// `rand` was called with no bin it can draw from
    #[error("Coverage point '{scope}' has no bins with a nonzero random weight")]
    NoSampleableBins {
        /// Scope of the coverage point
        scope: String,
    },

    /// A bin kind that cannot produce values was selected for generation
    #[error("Internal error: {kind} bin {index} selected for value generation")]
    InvalidBinKind {
        /// Kind of the selected bin
        kind: BinKind,
        /// Index of the selected bin
        index: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FcovError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_table_full_message() {
        let err = FcovError::BinTableFull {
            scope: "opcode".to_string(),
            requested: 12,
            capacity: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("opcode"));
        assert!(msg.contains("12"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_invalid_range_message() {
        let err = FcovError::InvalidRange { min: 9, max: 3 };
        assert_eq!(
            err.to_string(),
            "Invalid range: min 9 is greater than max 3"
        );
    }

    #[test]
    fn test_empty_bin_names_kind() {
        let err = FcovError::EmptyBin {
            kind: BinKind::Transition,
        };
        assert!(err.to_string().starts_with("Transition"));
    }

    #[test]
    fn test_invalid_argument_helper() {
        let err = FcovError::invalid_argument("min_hits must be at least 1");
        assert!(err.to_string().contains("Invalid argument"));
        assert!(err.to_string().contains("min_hits"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: FcovError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
