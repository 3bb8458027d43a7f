//! Input/output utilities
//!
//! Reading and writing Parquet and JSON files, plus output directory setup.

pub mod json;
pub mod parquet;

use std::path::Path;

use crate::error::{PipelineError, Result};

pub use self::json::{read_json, write_json_pretty};
pub use self::parquet::{DEFAULT_BATCH_SIZE, read_parquet, read_parquet_table, write_parquet};

/// Create a directory and its parents if missing
pub fn ensure_directory(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))
}
