//! Deduplication by control number
//!
//! Collapses multiple stored versions of a posting to the most recently
//! updated one. Rows are stable-sorted by `lastUpdatedDate` descending with
//! nulls last, then the first row of each control number is kept, so equal or
//! missing timestamps fall back to load order.

use std::cmp::Ordering;

use arrow::array::{Array, AsArray, UInt32Array};
use arrow::compute::take_record_batch;
use arrow::datatypes::TimestampMicrosecondType;
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::schema::adapt::{
    DateFormatConfig, coerce_to_timestamp, create_null_array, timestamp_type, to_string_array,
};
use crate::schema::columns::{CONTROL_NUMBER, DATE_COLUMNS, LAST_UPDATED_DATE};
use crate::utils::arrow::{require_column, with_column};
use crate::utils::logging::log_warning;

/// Row counts around a deduplication pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
    pub before: usize,
    pub after: usize,
    pub removed: usize,
}

/// Coerce the open, end and last-updated columns to timestamps
///
/// Unparseable values become null and the row is kept. A column of a type
/// with no date interpretation is replaced by nulls with a warning.
pub fn coerce_date_columns(batch: &RecordBatch, config: &DateFormatConfig) -> Result<RecordBatch> {
    let mut batch = batch.clone();
    for column in DATE_COLUMNS {
        let Some(array) = batch.column_by_name(column).cloned() else {
            continue;
        };
        let coerced = coerce_to_timestamp(&array, column, config).unwrap_or_else(|e| {
            log_warning(&format!("{e}; treating all values as null"), None);
            create_null_array(&timestamp_type(), array.len())
        });
        let parsed = coerced.len() - coerced.null_count();
        let original = array.len() - array.null_count();
        if parsed < original {
            log::debug!(
                "{} of {} non-null values in '{column}' could not be parsed as dates",
                original - parsed,
                original
            );
        }
        batch = with_column(&batch, column, coerced)?;
    }
    Ok(batch)
}

/// Keep one row per control number, preferring the latest `lastUpdatedDate`
///
/// Date columns are coerced first. Output rows are in recency order. Rows
/// with a null control number share a single key.
///
/// # Errors
/// Returns `ColumnNotFound` when the control number column is absent.
pub fn deduplicate(batch: &RecordBatch, config: &DateFormatConfig) -> Result<(RecordBatch, DedupStats)> {
    log::info!("Deduplicating data...");
    let batch = coerce_date_columns(batch, config)?;
    let ids = to_string_array(&require_column(&batch, CONTROL_NUMBER)?)?;

    let mut order: Vec<u32> = (0..batch.num_rows() as u32).collect();
    match batch.column_by_name(LAST_UPDATED_DATE) {
        Some(updated) => {
            let updated: Vec<Option<i64>> = updated
                .as_primitive::<TimestampMicrosecondType>()
                .iter()
                .collect();
            // sort_by is stable: ties keep load order
            order.sort_by(|&a, &b| recency_order(updated[a as usize], updated[b as usize]));
        }
        None => log_warning(
            &format!("Column '{LAST_UPDATED_DATE}' not found; keeping first row in load order"),
            None,
        ),
    }

    let mut seen: FxHashSet<Option<&str>> = FxHashSet::default();
    let keep: Vec<u32> = order
        .into_iter()
        .filter(|&row| {
            let row = row as usize;
            seen.insert(ids.is_valid(row).then(|| ids.value(row)))
        })
        .collect();

    let deduped = take_record_batch(&batch, &UInt32Array::from(keep))?;
    let stats = DedupStats {
        before: batch.num_rows(),
        after: deduped.num_rows(),
        removed: batch.num_rows() - deduped.num_rows(),
    };

    log::info!("Records after deduplication: {}", stats.after);
    log::info!("Duplicates removed: {}", stats.removed);
    Ok((deduped, stats))
}

/// Descending by timestamp, nulls last
fn recency_order(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
