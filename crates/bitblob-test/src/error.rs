//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// A pattern could not be turned into a bitmap
    #[error("invalid pattern at row {row}: {message}")]
    InvalidPattern { row: usize, message: String },

    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Bitmap comparison failed
    #[error("bitmap comparison failed at index {index}")]
    BitmapMismatch { index: usize },

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bitblob_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
