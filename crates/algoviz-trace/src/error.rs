//! Error types for algoviz-trace.

use thiserror::Error;

use crate::algorithm::AlgorithmKind;

/// Result type for trace generation.
pub type Result<T> = std::result::Result<T, TraceError>;

/// Errors raised when a trace cannot be requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// A search was requested without a target value.
    #[error("{0} requires a search target")]
    MissingTarget(AlgorithmKind),

    /// No algorithm has this identifier.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Validation failures for user-supplied arrays and targets.
///
/// These are reported at the input boundary and never reach the player or
/// the race.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A token could not be parsed as an integer.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Fewer elements than the minimum.
    #[error("Please enter at least {min} numbers (got {got})")]
    TooFewElements { min: usize, got: usize },

    /// More elements than the maximum.
    #[error("Maximum array size is {max} (got {got})")]
    TooManyElements { max: usize, got: usize },

    /// The search target is not an integer.
    #[error("Search target must be a valid number: {0}")]
    InvalidTarget(String),
}
