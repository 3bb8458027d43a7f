//! Configuration for the pipeline, the title aggregator and the column inspector.
//!
//! Every stage receives its paths and limits through these structs rather than
//! reading globals. The `Default` impls reproduce the standard data layout:
//!
//! ```text
//! data/
//!   raw/                         source Parquet exports
//!   occupational_series_clean.json
//!   processed/                   pipeline outputs
//! ```

use std::path::{Path, PathBuf};

/// File names of the raw exports, in load order
pub const DEFAULT_SOURCE_FILES: [&str; 4] = [
    "historical_jobs_2024.parquet",
    "current_jobs_2024.parquet",
    "historical_jobs_2025.parquet",
    "current_jobs_2025.parquet",
];

pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

pub const COMBINED_FILE_NAME: &str = "usajobs_combined_2024_2025.parquet";
pub const SUMMARY_FILE_NAME: &str = "data_summary.json";
pub const SAMPLE_FILE_NAME: &str = "sample_data.json";
pub const TITLES_FILE_NAME: &str = "job_titles_2024.json";
pub const SERIES_LOOKUP_FILE_NAME: &str = "occupational_series_clean.json";

/// Configuration for the combine/deduplicate/enrich/export pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source Parquet files, loaded and concatenated in this order
    pub source_paths: Vec<PathBuf>,
    /// JSON file mapping occupational series codes to titles
    pub lookup_path: PathBuf,
    /// Directory receiving the combined Parquet file and the JSON extracts
    pub output_dir: PathBuf,
    /// Number of leading rows written to the sample extract
    pub sample_size: usize,
}

impl PipelineConfig {
    /// Standard layout rooted at `data_dir`
    #[must_use]
    pub fn with_data_dir(data_dir: &Path) -> Self {
        let raw_dir = data_dir.join("raw");
        Self {
            source_paths: DEFAULT_SOURCE_FILES
                .iter()
                .map(|name| raw_dir.join(name))
                .collect(),
            lookup_path: data_dir.join(SERIES_LOOKUP_FILE_NAME),
            output_dir: data_dir.join("processed"),
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    #[must_use]
    pub fn combined_path(&self) -> PathBuf {
        self.output_dir.join(COMBINED_FILE_NAME)
    }

    #[must_use]
    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE_NAME)
    }

    #[must_use]
    pub fn sample_path(&self) -> PathBuf {
        self.output_dir.join(SAMPLE_FILE_NAME)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_data_dir(Path::new("data"))
    }
}

/// Configuration for the per-title aggregation
#[derive(Debug, Clone)]
pub struct TitleAggregationConfig {
    /// Combined Parquet file produced by the pipeline
    pub input_path: PathBuf,
    /// Destination of the ranked title JSON
    pub output_path: PathBuf,
    /// Keep only rows whose `year` equals this value
    pub target_year: Option<i32>,
    /// Keep only rows whose category text contains this series code
    pub target_series: Option<String>,
    /// Category columns tried in order for the series filter
    pub category_columns: Vec<String>,
}

impl TitleAggregationConfig {
    #[must_use]
    pub fn with_data_dir(data_dir: &Path) -> Self {
        let processed = data_dir.join("processed");
        Self {
            input_path: processed.join(COMBINED_FILE_NAME),
            output_path: processed.join(TITLES_FILE_NAME),
            target_year: Some(2024),
            target_series: Some("2210".to_string()),
            category_columns: crate::schema::columns::CATEGORY_COLUMNS
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    }
}

impl Default for TitleAggregationConfig {
    fn default() -> Self {
        Self::with_data_dir(Path::new("data"))
    }
}

/// Configuration for the column inspector
#[derive(Debug, Clone)]
pub struct InspectConfig {
    /// Raw export to inspect
    pub sample_file: PathBuf,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            sample_file: Path::new("data")
                .join("raw")
                .join(DEFAULT_SOURCE_FILES[0]),
        }
    }
}
