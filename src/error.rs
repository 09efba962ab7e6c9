//! Error types for the chaosmask library.

use thiserror::Error;

/// Errors produced by the chaosmask library.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChaosMaskError {
    /// Integration step size is zero, negative or not finite.
    #[error("Step size must be a positive finite number, got {0}")]
    InvalidStepSize(f32),
    /// A cipher operation was requested on an empty message.
    #[error("Message length must be greater than zero")]
    EmptyMessage,
    /// Seed length does not match the dimension of the selected flow.
    #[error("Seed has {found} coordinates but the flow requires {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A seed coordinate is NaN or infinite.
    #[error("Seed coordinate {index} is not finite")]
    NonFiniteSeed { index: usize },
    /// Input ran out before a whole block could be read.
    #[error("Input exhausted in block {block}: needed {needed} bytes, {available} available")]
    IncompleteBlock {
        block: usize,
        needed: usize,
        available: usize,
    },
    /// Bit position is outside the valid range of a byte.
    #[error("Bit position {0} is outside the valid range 0..8")]
    BitPositionOutOfRange(u32),
    /// The trajectory left the finite range of `f32`.
    #[error("Trajectory became non-finite at step {step}")]
    NumericDegeneracy { step: u64 },
    /// Reading from or writing to a stream failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChaosMaskError>;

impl From<std::io::Error> for ChaosMaskError {
    fn from(err: std::io::Error) -> Self {
        ChaosMaskError::Io(err.to_string())
    }
}
