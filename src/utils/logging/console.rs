//! Console output for the end-of-run reports.

use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashSet;

use crate::pipeline::export::DatasetSummary;
use crate::schema::adapt::to_string_array;
use crate::schema::columns::{ORGANIZATION_NAME, POSITION_TITLE};

/// Print the basic statistics of a processed table
pub fn print_pipeline_summary(batch: &RecordBatch, summary: &DatasetSummary) {
    let names: Vec<&str> = batch
        .schema_ref()
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();

    println!();
    println!("Key columns in the dataset:");
    println!("  {}...", names.iter().take(10).copied().collect::<Vec<_>>().join(", "));
    println!("Total columns: {}", names.len());
    println!();
    println!("Basic statistics:");
    println!("  Total unique jobs: {}", summary.total_records);
    println!(
        "  Date range: {} to {}",
        summary.date_range.start.as_deref().unwrap_or("n/a"),
        summary.date_range.end.as_deref().unwrap_or("n/a")
    );
    println!(
        "  Unique departments: {}",
        count_distinct(batch, ORGANIZATION_NAME)
    );
    println!("  Unique job titles: {}", count_distinct(batch, POSITION_TITLE));
}

/// Number of distinct non-null values in a column, 0 when absent
#[must_use]
pub fn count_distinct(batch: &RecordBatch, column: &str) -> usize {
    let Some(array) = batch.column_by_name(column) else {
        return 0;
    };
    let Ok(strings) = to_string_array(array) else {
        return 0;
    };
    strings.iter().flatten().collect::<FxHashSet<_>>().len()
}
