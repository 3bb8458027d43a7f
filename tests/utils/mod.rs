use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use jobs_pipeline::PipelineConfig;
use jobs_pipeline::schema::adapt::to_string_array;
use jobs_pipeline::utils::io::write_parquet;

/// One job posting row; every column is written as text
#[derive(Debug, Clone, Copy, Default)]
pub struct Posting {
    pub control_number: Option<&'static str>,
    pub title: Option<&'static str>,
    pub organization: Option<&'static str>,
    pub agency: Option<&'static str>,
    pub department: Option<&'static str>,
    pub open_date: Option<&'static str>,
    pub last_updated: Option<&'static str>,
    pub status: Option<&'static str>,
    pub series: Option<&'static str>,
    pub categories: Option<&'static str>,
}

impl Posting {
    #[must_use]
    pub fn new(control_number: &'static str, title: &'static str) -> Self {
        Self {
            control_number: Some(control_number),
            title: Some(title),
            ..Self::default()
        }
    }
}

type Getter = fn(&Posting) -> Option<&'static str>;

/// Build a batch shaped like a raw export
#[must_use]
pub fn postings_batch(rows: &[Posting]) -> RecordBatch {
    let columns: [(&str, Getter); 10] = [
        ("usajobsControlNumber", |p| p.control_number),
        ("positionTitle", |p| p.title),
        ("organizationName", |p| p.organization),
        ("hiringAgencyName", |p| p.agency),
        ("hiringDepartmentName", |p| p.department),
        ("positionOpenDate", |p| p.open_date),
        ("lastUpdatedDate", |p| p.last_updated),
        ("positionOpeningStatus", |p| p.status),
        ("occupationalSeries", |p| p.series),
        ("JobCategories", |p| p.categories),
    ];

    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|(_, get)| Arc::new(rows.iter().map(get).collect::<StringArray>()) as ArrayRef)
        .collect();

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
}

/// Write a fixture Parquet file under `dir/raw`
pub fn write_source(dir: &Path, name: &str, batch: &RecordBatch) -> PathBuf {
    let raw = dir.join("raw");
    std::fs::create_dir_all(&raw).unwrap();
    let path = raw.join(name);
    write_parquet(batch, &path).unwrap();
    path
}

/// Write a series lookup file with string and integer codes
pub fn write_lookup(dir: &Path) -> PathBuf {
    let path = dir.join("occupational_series_clean.json");
    std::fs::write(
        &path,
        r#"[
            {"code": "2210", "title": "Information Technology Management"},
            {"code": 301, "title": "Miscellaneous Administration And Program"}
        ]"#,
    )
    .unwrap();
    path
}

/// Pipeline configuration rooted at a temporary data directory
#[must_use]
pub fn test_config(dir: &Path, source_paths: Vec<PathBuf>) -> PipelineConfig {
    PipelineConfig {
        source_paths,
        ..PipelineConfig::with_data_dir(dir)
    }
}

/// A column rendered as optional strings
#[must_use]
pub fn strings(batch: &RecordBatch, column: &str) -> Vec<Option<String>> {
    let array = batch
        .column_by_name(column)
        .unwrap_or_else(|| panic!("missing column {column}"));
    let rendered = to_string_array(array).unwrap();
    (0..rendered.len())
        .map(|i| rendered.is_valid(i).then(|| rendered.value(i).to_string()))
        .collect()
}

/// Index of the row whose control number is `id`
#[must_use]
pub fn row_of(batch: &RecordBatch, id: &str) -> usize {
    strings(batch, "usajobsControlNumber")
        .iter()
        .position(|v| v.as_deref() == Some(id))
        .unwrap_or_else(|| panic!("no row for {id}"))
}
