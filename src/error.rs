//! Error types for forkbench
//!
//! Failures fall into three groups:
//! - precondition errors, raised before any work is scheduled
//! - leaf computation errors, raised inside a fork-join task and propagated
//!   through every pending join
//! - consistency errors, raised by the benchmark harness when the parallel
//!   result disagrees with the sequential oracle

use thiserror::Error;

/// Result type alias for forkbench operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Inner dimensions of a matrix product do not agree
    #[error("invalid dimensions: cannot multiply {a_rows}x{a_cols} by {b_rows}x{b_cols}")]
    DimensionMismatch {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },

    /// Input rows of differing lengths
    #[error("malformed matrix: row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A single leaf of a fork-join computation failed
    #[error("leaf {index} failed: {message}")]
    Leaf { index: usize, message: String },

    /// Sequential and parallel results differ
    #[error("{workload}: sequential and parallel results do not match")]
    Consistency { workload: String },

    /// Resource fetch failed (absorbed to zero by the download leaf)
    #[error("fetch of {url} failed: {message}")]
    Fetch { url: String, message: String },

    /// Worker pool could not be started
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// Invalid configuration value
    #[error("configuration error: {key}: {message}")]
    Config { key: String, message: String },
}

impl Error {
    pub fn leaf(index: usize, message: impl Into<String>) -> Self {
        Error::Leaf {
            index,
            message: message.into(),
        }
    }

    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Precondition failures are detected before any task is scheduled
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::DimensionMismatch { .. } | Error::RaggedMatrix { .. }
        )
    }
}
