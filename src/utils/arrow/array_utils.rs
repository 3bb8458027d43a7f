//! Utilities for working with Arrow arrays and record batches.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;

use rustc_hash::FxHashMap;

use crate::error::{PipelineError, Result};
use crate::schema::adapt::to_string_array;
use crate::utils::logging::log_warning;

/// Get a column by name, logging a warning when it is absent
///
/// `purpose` names the feature that needs the column and ends up in the
/// warning, so skipped derivations are visible in the log.
#[must_use]
pub fn get_column(batch: &RecordBatch, column_name: &str, purpose: &str) -> Option<ArrayRef> {
    let column = batch.column_by_name(column_name).cloned();
    if column.is_none() {
        log_warning(
            &format!("Column '{column_name}' not found; skipping {purpose}"),
            None,
        );
    }
    column
}

/// Get a column by name, failing when it is absent
pub fn require_column(batch: &RecordBatch, column_name: &str) -> Result<ArrayRef> {
    batch
        .column_by_name(column_name)
        .cloned()
        .ok_or_else(|| PipelineError::column_not_found(column_name))
}

/// Return a batch with `column_name` set to `array`
///
/// An existing column of that name is replaced in place; otherwise the column
/// is appended. The new field is nullable.
pub fn with_column(batch: &RecordBatch, column_name: &str, array: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let field = Arc::new(Field::new(column_name, array.data_type().clone(), true));

    let mut fields: Vec<_> = schema.fields().iter().cloned().collect();
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();

    match schema.index_of(column_name) {
        Ok(idx) => {
            fields[idx] = field;
            columns[idx] = array;
        }
        Err(_) => {
            fields.push(field);
            columns.push(array);
        }
    }

    Ok(RecordBatch::try_new(
        Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone())),
        columns,
    )?)
}

/// Restrict a batch to the listed columns that exist, in list order
pub fn select_existing_columns(batch: &RecordBatch, column_names: &[&str]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let indices: Vec<usize> = column_names
        .iter()
        .filter_map(|name| schema.index_of(name).ok())
        .collect();
    Ok(batch.project(&indices)?)
}

/// Frequency of each non-null value, rendered as text
///
/// Ordered by count descending; equal counts keep first-appearance order.
pub fn value_counts(array: &ArrayRef) -> Result<Vec<(String, usize)>> {
    let strings = to_string_array(array)?;
    let mut counts: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
    for (row, value) in strings.iter().enumerate() {
        if let Some(value) = value {
            counts.entry(value).or_insert((0, row)).0 += 1;
        }
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));
    Ok(counts
        .into_iter()
        .map(|(value, (count, _))| (value.to_string(), count))
        .collect())
}
