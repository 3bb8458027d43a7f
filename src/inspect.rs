//! Column inspection of raw exports
//!
//! Reports the columns a Parquet export actually carries, previews the key
//! columns, and looks for columns that might already hold occupational series
//! names. Used to check a new export before it goes through the pipeline.

use std::fmt;

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::error::Result;
use crate::schema::adapt::to_string_array;
use crate::schema::columns::{CATEGORICAL_COLUMNS, JOB_CATEGORIES, KEY_COLUMNS, NESTED_COLUMNS};
use crate::utils::arrow::{select_existing_columns, value_counts};

/// Rows shown in the key column preview
pub const PREVIEW_ROWS: usize = 5;
/// Values shown per categorical column
pub const TOP_VALUES: usize = 5;
/// Maximum characters of a nested value sample
pub const SAMPLE_CHARS: usize = 200;
/// Leading non-null values checked for the "<code> - <name>" pattern
pub const PATTERN_SAMPLE_SIZE: usize = 3;

/// What an export contains
#[derive(Debug, Clone, Default)]
pub struct ColumnReport {
    pub total_rows: usize,
    /// Every column with its type, sorted by name
    pub columns: Vec<(String, DataType)>,
    /// Key columns present in the export, in preview order
    pub key_columns: Vec<String>,
    /// Rendered leading rows of the key columns
    pub key_preview: Vec<Vec<String>>,
    /// Top values of each categorical column present
    pub categorical: Vec<(String, Vec<(String, usize)>)>,
    /// First non-null value of each nested column present, truncated
    pub nested_samples: Vec<(String, Option<String>)>,
}

/// Inspect a table
pub fn inspect_batch(batch: &RecordBatch) -> Result<ColumnReport> {
    let schema = batch.schema();
    let columns = schema
        .fields()
        .iter()
        .map(|f| (f.name().clone(), f.data_type().clone()))
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .collect();

    let keys = select_existing_columns(batch, &KEY_COLUMNS)?;
    let key_columns = keys
        .schema_ref()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let head = keys.slice(0, PREVIEW_ROWS.min(keys.num_rows()));
    let rendered = head
        .columns()
        .iter()
        .map(to_string_array)
        .collect::<Result<Vec<_>>>()?;
    let key_preview = (0..head.num_rows())
        .map(|row| {
            rendered
                .iter()
                .map(|col| {
                    if col.is_valid(row) {
                        col.value(row).to_string()
                    } else {
                        "null".to_string()
                    }
                })
                .collect()
        })
        .collect();

    let mut categorical = Vec::new();
    for name in CATEGORICAL_COLUMNS {
        if let Some(values) = batch.column_by_name(name) {
            let top = value_counts(values)?.into_iter().take(TOP_VALUES).collect();
            categorical.push((name.to_string(), top));
        }
    }

    let mut nested_samples = Vec::new();
    for name in NESTED_COLUMNS {
        if let Some(values) = batch.column_by_name(name) {
            nested_samples.push((name.to_string(), first_rendered(values)?));
        }
    }

    Ok(ColumnReport {
        total_rows: batch.num_rows(),
        columns,
        key_columns,
        key_preview,
        categorical,
        nested_samples,
    })
}

fn first_rendered(array: &ArrayRef) -> Result<Option<String>> {
    let Some(row) = (0..array.len()).find(|&row| array.is_valid(row)) else {
        return Ok(None);
    };
    let rendered = to_string_array(&array.slice(row, 1))?;
    Ok(Some(rendered.value(0).chars().take(SAMPLE_CHARS).collect()))
}

impl fmt::Display for ColumnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "Total columns: {}", self.columns.len())?;
        writeln!(f, "Total rows: {}", self.total_rows)?;
        writeln!(f)?;
        writeln!(f, "All available columns:")?;
        writeln!(f, "{rule}")?;
        for (i, (name, data_type)) in self.columns.iter().enumerate() {
            writeln!(f, "{:3}. {name} ({data_type})", i + 1)?;
        }

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "First rows of key columns:")?;
        if self.key_columns.is_empty() {
            writeln!(f, "  (none present)")?;
        } else {
            writeln!(f, "  {}", self.key_columns.join(" | "))?;
            for row in &self.key_preview {
                writeln!(f, "  {}", row.join(" | "))?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Sample values for key categorical columns:")?;
        for (name, top) in &self.categorical {
            writeln!(f)?;
            writeln!(f, "{name}:")?;
            for (value, count) in top {
                writeln!(f, "  {value:<40} {count}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Nested columns (first non-null value):")?;
        for (name, sample) in &self.nested_samples {
            writeln!(f)?;
            writeln!(f, "{name}:")?;
            match sample {
                Some(sample) => writeln!(f, "  Sample: {sample}...")?,
                None => writeln!(f, "  (all null)")?,
            }
        }
        Ok(())
    }
}

/// Columns that may already carry occupational series information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesColumnReport {
    /// Columns whose name mentions "occup" or "series"
    pub named_columns: Vec<String>,
    /// String columns holding values like "0301 - Administration", with the
    /// first matching value
    pub code_name_columns: Vec<(String, String)>,
    /// First non-null job category among the leading rows
    pub category_sample: Option<CategorySample>,
}

/// A job category value and, when it is JSON text, the keys of its first item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySample {
    pub row: usize,
    pub raw: String,
    /// `None` when the value is not a JSON array of objects
    pub item_keys: Option<Vec<String>>,
}

/// Look for occupational series columns by name and by value pattern
pub fn find_series_columns(batch: &RecordBatch) -> SeriesColumnReport {
    let schema = batch.schema();
    let named_columns = schema
        .fields()
        .iter()
        .map(|f| f.name())
        .filter(|name| {
            let lower = name.to_lowercase();
            lower.contains("occup") || lower.contains("series")
        })
        .cloned()
        .collect();

    let code_name_columns = schema
        .fields()
        .iter()
        .zip(batch.columns())
        .filter_map(|(field, array)| {
            let strings = match field.data_type() {
                DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
                    to_string_array(array).ok()?
                }
                _ => return None,
            };
            strings
                .iter()
                .flatten()
                .take(PATTERN_SAMPLE_SIZE)
                .find(|value| looks_like_code_and_name(value))
                .map(|value| (field.name().clone(), value.to_string()))
        })
        .collect();

    SeriesColumnReport {
        named_columns,
        code_name_columns,
        category_sample: batch.column_by_name(JOB_CATEGORIES).and_then(sample_categories),
    }
}

fn sample_categories(array: &ArrayRef) -> Option<CategorySample> {
    let leading = array.slice(0, PREVIEW_ROWS.min(array.len()));
    let rendered = to_string_array(&leading).ok()?;
    let row = (0..rendered.len()).find(|&row| rendered.is_valid(row))?;
    let raw = rendered.value(row).to_string();
    Some(CategorySample {
        row,
        item_keys: first_item_keys(&raw),
        raw,
    })
}

/// Keys of the first object in a JSON array
fn first_item_keys(text: &str) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let first = value.as_array()?.first()?.as_object()?;
    Some(first.keys().cloned().collect())
}

/// Whether a value reads like "0301 - Administration"
#[must_use]
pub fn looks_like_code_and_name(value: &str) -> bool {
    value.contains(" - ") && value.chars().any(|c| c.is_ascii_digit())
}

impl fmt::Display for SeriesColumnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Columns with 'occup' or 'series': [{}]",
            self.named_columns.join(", ")
        )?;
        if self.code_name_columns.is_empty() {
            writeln!(f, "No column holds series codes with names")?;
        }
        for (column, value) in &self.code_name_columns {
            writeln!(f, "  Found potential series with name in '{column}': {value}")?;
        }
        if let Some(sample) = &self.category_sample {
            writeln!(f, "Sample {JOB_CATEGORIES} value (row {}):", sample.row)?;
            writeln!(f, "  Raw value: {}", sample.raw)?;
            if let Some(keys) = &sample.item_keys {
                writeln!(f, "  Fields in first item: [{}]", keys.join(", "))?;
            }
        }
        Ok(())
    }
}
