//! Exporting the enriched table
//!
//! Writes the full table as Parquet, a dataset summary as JSON, and a sample
//! of leading rows restricted to the web front end's columns.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use arrow::array::{Array, AsArray};
use arrow::datatypes::{Int32Type, TimestampMicrosecondType};
use arrow::json::writer::{JsonArray, WriterBuilder};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::schema::adapt::{
    DateFormatConfig, coerce_to_timestamp, format_iso, micros_to_datetime, timestamp_type,
};
use crate::schema::columns::{ORGANIZATION_NAME, POSITION_OPEN_DATE, SAMPLE_COLUMNS, STATUS_SIMPLIFIED, YEAR};
use crate::utils::arrow::{select_existing_columns, value_counts};
use crate::utils::io::{ensure_directory, write_json_pretty, write_parquet};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Earliest and latest open date as ISO 8601 strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Frequency table serialized as a JSON object in count order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueCounts(pub Vec<(String, usize)>);

impl ValueCounts {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<usize> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, c)| *c)
    }
}

impl Serialize for ValueCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Dataset summary consumed by the web front end
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub date_range: DateRange,
    pub years: Vec<i32>,
    pub departments: ValueCounts,
    pub status_counts: ValueCounts,
    /// Local time the summary was generated
    pub last_updated: String,
}

/// Paths written by [`export`]
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub parquet: PathBuf,
    pub summary: PathBuf,
    pub sample: PathBuf,
}

/// Write all three outputs into the configured output directory
pub fn export(batch: &RecordBatch, config: &PipelineConfig) -> Result<(ExportPaths, DatasetSummary)> {
    log::info!("Saving processed data...");
    ensure_directory(&config.output_dir)?;

    let paths = ExportPaths {
        parquet: config.combined_path(),
        summary: config.summary_path(),
        sample: config.sample_path(),
    };

    write_parquet(batch, &paths.parquet)?;

    let summary = build_summary(batch)?;
    write_json_pretty(&summary, &paths.summary)?;

    write_sample(batch, &paths.sample, config.sample_size)?;

    Ok((paths, summary))
}

/// Compute the dataset summary
///
/// Columns the table lacks contribute empty values: no open date gives a null
/// date range, no `year` an empty year list, and so on.
pub fn build_summary(batch: &RecordBatch) -> Result<DatasetSummary> {
    Ok(DatasetSummary {
        total_records: batch.num_rows(),
        date_range: open_date_range(batch)?,
        years: distinct_years(batch),
        departments: counts_of(batch, ORGANIZATION_NAME)?,
        status_counts: counts_of(batch, STATUS_SIMPLIFIED)?,
        last_updated: format_iso(&chrono::Local::now().naive_local()),
    })
}

fn open_date_range(batch: &RecordBatch) -> Result<DateRange> {
    let Some(open_dates) = batch.column_by_name(POSITION_OPEN_DATE) else {
        return Ok(DateRange { start: None, end: None });
    };
    let open_dates = if open_dates.data_type() == &timestamp_type() {
        open_dates.clone()
    } else {
        coerce_to_timestamp(open_dates, POSITION_OPEN_DATE, &DateFormatConfig::default())?
    };
    let values = open_dates.as_primitive::<TimestampMicrosecondType>();

    let iso = |micros: Option<i64>| micros.and_then(micros_to_datetime).map(|dt| format_iso(&dt));
    Ok(DateRange {
        start: iso(arrow::compute::min(values)),
        end: iso(arrow::compute::max(values)),
    })
}

fn distinct_years(batch: &RecordBatch) -> Vec<i32> {
    let Some(years) = batch.column_by_name(YEAR) else {
        return Vec::new();
    };
    if years.data_type() != &arrow::datatypes::DataType::Int32 {
        log_warning("Column 'year' is not Int32; leaving years empty", None);
        return Vec::new();
    }
    let mut distinct: Vec<i32> = years.as_primitive::<Int32Type>().iter().flatten().collect();
    distinct.sort_unstable();
    distinct.dedup();
    distinct
}

fn counts_of(batch: &RecordBatch, column: &str) -> Result<ValueCounts> {
    match batch.column_by_name(column) {
        Some(values) => Ok(ValueCounts(value_counts(values)?)),
        None => {
            log_warning(&format!("Column '{column}' not found; its counts are empty"), None);
            Ok(ValueCounts::default())
        }
    }
}

/// Write the first `limit` rows, restricted to the sample columns, as a JSON array
///
/// Sample columns missing from the table are left out. Nulls are written
/// explicitly and timestamps as ISO 8601 text.
pub fn write_sample(batch: &RecordBatch, path: &Path, limit: usize) -> Result<()> {
    log_operation_start("Writing sample data", path);
    let head = batch.slice(0, limit.min(batch.num_rows()));
    let sample = select_existing_columns(&head, &SAMPLE_COLUMNS)?;

    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut writer = WriterBuilder::new()
        .with_explicit_nulls(true)
        .build::<_, JsonArray>(BufWriter::new(file));
    writer.write(&sample)?;
    writer.finish()?;
    writer
        .into_inner()
        .flush()
        .map_err(|e| PipelineError::io(path, e))?;

    log_operation_complete("wrote", path, sample.num_rows(), None);
    Ok(())
}
