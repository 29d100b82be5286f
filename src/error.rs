//! Error types for the segmentation engine.

use thiserror::Error;

/// Errors raised by configuration validation and the service boundary.
///
/// Strategies themselves are total: given a valid configuration they
/// terminate with a well-formed chunk sequence for any input, including
/// the empty document (which yields an empty sequence, not an error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkingError {
    /// `overlap >= size` would prevent forward progress.
    #[error("overlap ({overlap}) must be smaller than chunk size ({size})")]
    OverlapTooLarge { size: usize, overlap: usize },

    /// A size, window, stride, or count parameter was zero.
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    /// The lower character bound exceeds the upper one.
    #[error("min_chars ({min_chars}) must not exceed max_chars ({max_chars})")]
    MinAboveMax { min_chars: usize, max_chars: usize },

    /// Input exceeded the configured service limit. Raised only at the
    /// API boundary, never by the engine itself.
    #[error("document has {chars} chars, exceeding the limit of {limit}")]
    DocumentTooLarge { chars: usize, limit: usize },
}
