//! Error types.

use crate::ConfigError;
use thiserror::Error;

/// Result type with the crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while generating or writing test vectors.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid operation or bit width.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Failure writing an output file. Never recovered: a truncated corpus is worse than none.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The OS entropy source failed while drawing a session seed.
    #[error("random number generator failure: {0}")]
    Rng(String),

    /// A single case could not be built from the drawn randomness.
    #[error("failed to construct {category} case {index}: {reason}")]
    Construction {
        /// Category (or `random`) the case belongs to.
        category: &'static str,
        /// Case index within its category.
        index: usize,
        /// What went wrong.
        reason: String,
    },

    /// A case failed on every attempt; the category cannot reach its target count.
    #[error("{category} case {index} failed after {attempts} attempts")]
    CaseExhausted {
        /// Category (or `random`) the case belongs to.
        category: &'static str,
        /// Case index within its category.
        index: usize,
        /// Attempts made.
        attempts: u32,
    },

    /// A matrix worker thread panicked.
    #[error("worker thread panicked while generating {0}")]
    WorkerPanicked(String),
}
