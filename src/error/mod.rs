//! Error handling for the job-posting pipeline.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors raised by the pipeline stages and the title aggregator
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Error opening, reading or writing a file
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error decoding or encoding Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error from an Arrow compute kernel
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error parsing or writing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A column required by the operation is missing
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    /// A column has a type the operation cannot work with
    #[error("Invalid data type for column {column}: expected {expected}")]
    InvalidDataType { column: String, expected: String },

    /// None of the configured source files could be loaded
    #[error("No source files found ({attempted} configured)")]
    NoSources { attempted: usize },

    /// A value could not be converted between types
    #[error("Type conversion error: {0}")]
    Conversion(String),
}

impl PipelineError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn column_not_found(column: &str) -> Self {
        Self::ColumnNotFound {
            column: column.to_string(),
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
