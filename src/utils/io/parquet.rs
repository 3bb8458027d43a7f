//! Parquet file operations
//!
//! Reading whole Parquet files into Arrow record batches and writing a table
//! back out as a single Snappy-compressed file.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::{PipelineError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Read a Parquet file into Arrow record batches
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid Parquet
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>> {
    read_with_schema(path).map(|(_, batches)| batches)
}

/// Read a Parquet file into a single record batch
///
/// An empty file yields an empty batch with the file's schema.
pub fn read_parquet_table(path: &Path) -> Result<RecordBatch> {
    let (schema, batches) = read_with_schema(path)?;
    Ok(concat_batches(&schema, &batches)?)
}

fn read_with_schema(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let start = Instant::now();
    log_operation_start("Reading parquet file", path);

    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.with_batch_size(DEFAULT_BATCH_SIZE).build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_operation_complete("read", path, rows, Some(start.elapsed()));
    Ok((schema, batches))
}

/// Write a record batch to a Parquet file, replacing any existing file
pub fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing parquet file", path);

    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    log_operation_complete("wrote", path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}
