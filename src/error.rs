//! Error types for the HNSW core.
//!
//! Every failure this crate can report is some form of invalid argument;
//! the variants exist so messages stay precise at each call site.

/// Error type for index, request, and vector operations.
#[derive(Debug, thiserror::Error)]
pub enum HnswError {
    /// Invalid input (bad construction parameters, zero `top_k`, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two vectors of different dimension met in a metric or index operation.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Insert of an id already present in the index.
    #[error("vector with id {0} already exists")]
    DuplicateId(u64),
}

/// Result type alias for HNSW operations.
pub type Result<T> = std::result::Result<T, HnswError>;

impl HnswError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a dimension-mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}
