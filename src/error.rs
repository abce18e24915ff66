//! Error types.
//!
//! Benchmarks have no recovery paths: a setup error ends the configuration
//! (and, in the binary, the process). Allocation failures are not represented
//! here because the allocator aborts on its own.

use thiserror::Error;

/// Failure while building a dataset or harness for a configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("experiment '{experiment}' cannot run with an empty dataset")]
    EmptyDataset { experiment: &'static str },

    #[error("cache scrub buffer must be at least one byte")]
    EmptyScratchBuffer,

    #[error("experiment '{experiment}' has no variant named '{variant}'")]
    UnknownVariant {
        experiment: &'static str,
        variant: String,
    },
}

/// Failure while parsing command-line options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("option '{0}' expects a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for option '{option}'")]
    InvalidValue { option: String, value: String },

    #[error("unknown option: {0}")]
    UnknownOption(String),
}
