//! Error types for algoviz-vis.

use algoviz_trace::{AlgorithmKind, Category, InputError, TraceError};
use thiserror::Error;

/// Result type for player and race operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when configuring or controlling a player or race.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Speed outside the accepted range.
    #[error("speed {speed} is outside {min}..={max}")]
    SpeedOutOfRange { speed: u32, min: u32, max: u32 },

    /// Array size outside the accepted range.
    #[error("array size {size} is outside {min}..={max}")]
    ArraySizeOutOfRange { size: usize, min: usize, max: usize },

    /// The component is in the wrong state for the requested operation.
    #[error("invalid state: expected {expected}, got {actual}")]
    InvalidState {
        expected: &'static str,
        actual: String,
    },

    /// An algorithm was used outside its category.
    #[error("{algorithm} is not a {category} algorithm")]
    CategoryMismatch {
        algorithm: AlgorithmKind,
        category: Category,
    },

    /// A race was started with nothing selected.
    #[error("no algorithms selected")]
    NoAlgorithmsSelected,

    /// The component was torn down and accepts no further commands.
    #[error("component has been torn down")]
    TornDown,

    /// Custom input failed validation.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// Trace generation was refused.
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),
}
