//! Error types for bitblob-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bitblob_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Labeled components do not cover the foreground exactly
    #[error("component partition mismatch: {expected} foreground pixels, components cover {actual}")]
    PartitionMismatch { expected: u64, actual: u64 },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
