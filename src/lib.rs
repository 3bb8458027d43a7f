//! Batch processing of job-posting Parquet exports.
//!
//! Combines several exports into one deduplicated, enriched table and writes
//! the Parquet and JSON files a web front end reads. Also aggregates postings
//! per job title and inspects the columns of raw exports.

pub mod classify;
pub mod config;
pub mod error;
pub mod inspect;
pub mod loader;
pub mod lookup;
pub mod pipeline;
pub mod schema;
pub mod titles;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{InspectConfig, PipelineConfig, TitleAggregationConfig};
pub use error::{PipelineError, Result};
pub use loader::{LoadReport, load_sources};
pub use lookup::SeriesLookup;
pub use pipeline::{DatasetSummary, DedupStats, PipelineReport, run_pipeline};
pub use schema::{SchemaCompatibilityReport, SchemaIssue};
pub use titles::{TitleSummary, aggregate_titles, run_title_aggregation};

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;
