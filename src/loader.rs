//! Source file loading
//!
//! Reads the configured Parquet exports in order and concatenates them into a
//! single working table whose schema is the union of all source columns. Date
//! columns are coerced to timestamps per source before the union, so exports
//! storing dates as text and as timestamps combine without losing values.

use std::path::{Path, PathBuf};

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;

use crate::error::{PipelineError, Result};
use crate::pipeline::dedup::coerce_date_columns;
use crate::schema::adapt::DateFormatConfig;
use crate::schema::{SchemaCompatibilityReport, adapt_record_batch, union_schemas};
use crate::utils::io::read_parquet_table;
use crate::utils::logging::{create_file_progress_bar, finish_progress_bar, log_warning};

/// A source file that was loaded
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub path: PathBuf,
    pub rows: usize,
}

/// What the loader read and skipped
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Loaded files, in load order
    pub loaded: Vec<LoadedSource>,
    /// Configured files that did not exist
    pub skipped: Vec<PathBuf>,
    /// Type disagreements resolved while merging schemas
    pub schema_report: SchemaCompatibilityReport,
}

impl LoadReport {
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.loaded.iter().map(|s| s.rows).sum()
    }
}

/// Load and concatenate source files in listed order
///
/// Missing files are skipped with a warning. Files that exist but cannot be
/// read are errors.
///
/// # Errors
/// Returns `NoSources` when none of the paths exist.
pub fn load_sources(paths: &[PathBuf]) -> Result<(RecordBatch, LoadReport)> {
    log::info!("Loading {} configured source files", paths.len());
    let mut report = LoadReport::default();
    let date_formats = DateFormatConfig::default();
    let mut tables: Vec<(PathBuf, RecordBatch)> = Vec::with_capacity(paths.len());

    let pb = create_file_progress_bar(paths.len() as u64, Some("loading sources"));
    for path in paths {
        pb.inc(1);
        if !path.is_file() {
            log_warning("Source file not found, skipping", Some(path));
            report.skipped.push(path.clone());
            continue;
        }

        let table = coerce_date_columns(&read_parquet_table(path)?, &date_formats)?;
        log::info!("  Loaded {}: {} records", display_name(path), table.num_rows());
        report.loaded.push(LoadedSource {
            path: path.clone(),
            rows: table.num_rows(),
        });
        tables.push((path.clone(), table));
    }
    finish_progress_bar(&pb, Some("sources loaded"));

    if tables.is_empty() {
        return Err(PipelineError::NoSources {
            attempted: paths.len(),
        });
    }

    let schemas: Vec<_> = tables
        .iter()
        .map(|(path, table)| (path.display().to_string(), table.schema()))
        .collect();
    let (union, schema_report) = union_schemas(&schemas);
    for issue in &schema_report.issues {
        log_warning(&issue.description(), None);
    }
    report.schema_report = schema_report;

    let adapted = tables
        .iter()
        .map(|(_, table)| adapt_record_batch(table, &union))
        .collect::<Result<Vec<_>>>()?;
    let combined = concat_batches(&union, &adapted)?;

    log::info!(
        "Combined {} files into {} records",
        report.loaded.len(),
        combined.num_rows()
    );
    Ok((combined, report))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
