//! Schema handling for the job-posting exports.
//!
//! Sources exported at different times do not share a fixed schema: columns
//! come and go, and the same column can arrive with a different physical type.
//! The loader merges them by column union; this module computes that union and
//! adapts each batch to it.

pub mod adapt;
pub mod columns;

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::logging::log_warning;

pub use adapt::DateFormatConfig;

/// A report of type disagreements found while merging source schemas
#[derive(Debug, Default)]
pub struct SchemaCompatibilityReport {
    /// Whether every shared column had the same type in all sources
    pub compatible: bool,
    /// Columns whose type differs from the first source that carried them
    pub issues: Vec<SchemaIssue>,
}

/// A schema compatibility issue
#[derive(Debug, Clone)]
pub struct SchemaIssue {
    /// The source that disagrees with the union
    pub source: String,
    /// The column with differing types
    pub field_name: String,
    /// Type in the disagreeing source
    pub source_type: DataType,
    /// Type the union settled on
    pub target_type: DataType,
}

impl SchemaIssue {
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "Column '{}' in {} is {}, union uses {}",
            self.field_name, self.source, self.source_type, self.target_type
        )
    }
}

/// Build the union of several source schemas
///
/// Columns keep first-seen order and the first non-null type seen for them.
/// A column whose sources disagree on the type is widened to `Utf8`, so no
/// source loses values to a narrowing cast. Every field of the union is
/// nullable, since a source lacking a column contributes nulls for it.
#[must_use]
pub fn union_schemas(sources: &[(String, SchemaRef)]) -> (SchemaRef, SchemaCompatibilityReport) {
    let mut fields: Vec<Field> = Vec::new();
    let mut issues = Vec::new();

    for (source, schema) in sources {
        for field in schema.fields() {
            match fields.iter_mut().find(|f| f.name() == field.name()) {
                None => fields.push(field.as_ref().clone().with_nullable(true)),
                Some(existing) if existing.data_type() == &DataType::Null => {
                    *existing = field.as_ref().clone().with_nullable(true);
                }
                Some(existing) => {
                    if existing.data_type() != field.data_type()
                        && field.data_type() != &DataType::Null
                    {
                        *existing = Field::new(existing.name(), DataType::Utf8, true);
                        issues.push(SchemaIssue {
                            source: source.clone(),
                            field_name: field.name().clone(),
                            source_type: field.data_type().clone(),
                            target_type: DataType::Utf8,
                        });
                    }
                }
            }
        }
    }

    let report = SchemaCompatibilityReport {
        compatible: issues.is_empty(),
        issues,
    };
    (Arc::new(Schema::new(fields)), report)
}

/// Convert a record batch to match the union schema
///
/// Missing columns become nulls. Columns widened to `Utf8` are rendered as
/// text, nested values included. Other type differences are cast; when no
/// cast exists the column is replaced by nulls and a warning is logged.
pub fn adapt_record_batch(batch: &RecordBatch, target_schema: &SchemaRef) -> Result<RecordBatch> {
    let source_schema = batch.schema();
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(target_schema.fields().len());

    for target_field in target_schema.fields() {
        let target_type = target_field.data_type();
        let column = match source_schema.index_of(target_field.name()) {
            Ok(idx) => {
                let source = batch.column(idx);
                let converted = if target_type == &DataType::Utf8 && source.data_type() != target_type {
                    adapt::to_string_array(source).map(|s| Arc::new(s) as ArrayRef)
                } else {
                    adapt::convert_array(source, target_type)
                };
                converted.unwrap_or_else(|e| {
                    log_warning(
                        &format!(
                            "Column '{}' could not be converted ({e}); filling with nulls",
                            target_field.name()
                        ),
                        None,
                    );
                    adapt::create_null_array(target_type, batch.num_rows())
                })
            }
            Err(_) => adapt::create_null_array(target_type, batch.num_rows()),
        };
        columns.push(column);
    }

    Ok(RecordBatch::try_new(target_schema.clone(), columns)?)
}
