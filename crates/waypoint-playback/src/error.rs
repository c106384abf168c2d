//! Error types for playback operations.

use thiserror::Error;

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Errors raised by playback operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// A result with zero steps was loaded
    #[error("result must contain at least one step")]
    EmptyResult,

    /// The speed multiplier was outside (0, 5.0]
    #[error("speed must be in (0, 5.0], got {0}")]
    InvalidSpeed(f64),

    /// A state was constructed with an out-of-range step index
    #[error("step index {index} out of range for {total} steps")]
    IndexOutOfRange { index: isize, total: usize },
}
