//! JSON file helpers.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PipelineError, Result};
use crate::utils::logging::log_operation_start;

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Serialize a value as indented JSON, replacing any existing file
pub fn write_json_pretty<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    log_operation_start("Writing JSON file", path);
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(|e| PipelineError::io(path, e))?;
    Ok(())
}
