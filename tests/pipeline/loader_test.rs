use std::sync::Arc;

use arrow::array::{Array, AsArray, Int64Array, StringArray, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Int32Type, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use jobs_pipeline::{PipelineError, load_sources, run_pipeline};

use crate::utils::{Posting, postings_batch, row_of, strings, test_config, write_source};

fn micros(y: i32, m: u32, d: u32) -> i64 {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_micros()
}

#[test]
fn test_missing_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let present = write_source(
        dir.path(),
        "current_jobs_2024.parquet",
        &postings_batch(&[Posting::new("A1", "Nurse"), Posting::new("B2", "Clerk")]),
    );
    let missing = dir.path().join("raw").join("historical_jobs_2024.parquet");

    let (combined, report) = load_sources(&[missing.clone(), present.clone()]).unwrap();
    assert_eq!(combined.num_rows(), 2);
    assert_eq!(report.skipped, vec![missing]);
    assert_eq!(report.loaded.len(), 1);
    assert_eq!(report.loaded[0].path, present);
    assert!(report.schema_report.compatible);
}

#[test]
fn test_no_sources_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(
        dir.path(),
        vec![dir.path().join("a.parquet"), dir.path().join("b.parquet")],
    );

    let result = run_pipeline(&config);
    assert!(matches!(result, Err(PipelineError::NoSources { attempted: 2 })));
    assert!(!config.combined_path().exists());
}

#[test]
fn test_sources_are_unioned_in_load_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_source(
        dir.path(),
        "first.parquet",
        &postings_batch(&[Posting::new("A1", "Nurse")]),
    );

    // Later export: control number stored as an integer, plus a grade column
    let later = RecordBatch::try_new(
        Arc::new(Schema::new(vec![
            Field::new("usajobsControlNumber", DataType::Int64, true),
            Field::new("positionTitle", DataType::Utf8, true),
            Field::new("MinimumGradeLevel", DataType::Utf8, true),
        ])),
        vec![
            Arc::new(Int64Array::from(vec![700_100])),
            Arc::new(StringArray::from(vec!["Engineer"])),
            Arc::new(StringArray::from(vec!["12"])),
        ],
    )
    .unwrap();
    let second = write_source(dir.path(), "second.parquet", &later);

    let (combined, report) = load_sources(&[first, second]).unwrap();
    assert_eq!(combined.num_rows(), 2);
    assert!(!report.schema_report.compatible);
    assert_eq!(report.schema_report.issues[0].field_name, "usajobsControlNumber");

    assert_eq!(
        strings(&combined, "usajobsControlNumber"),
        vec![Some("A1".to_string()), Some("700100".to_string())]
    );
    assert_eq!(
        strings(&combined, "MinimumGradeLevel"),
        vec![None, Some("12".to_string())]
    );
    let last = combined.schema().fields().len() - 1;
    assert_eq!(combined.schema().field(last).name(), "MinimumGradeLevel");
}

#[test]
fn test_text_dates_survive_timestamp_sources() {
    let dir = tempfile::tempdir().unwrap();
    let stamp = DataType::Timestamp(TimeUnit::Microsecond, None);
    let typed = RecordBatch::try_new(
        Arc::new(Schema::new(vec![
            Field::new("usajobsControlNumber", DataType::Utf8, true),
            Field::new("positionTitle", DataType::Utf8, true),
            Field::new("positionOpenDate", stamp.clone(), true),
            Field::new("lastUpdatedDate", stamp, true),
        ])),
        vec![
            Arc::new(StringArray::from(vec!["A1", "C3"])),
            Arc::new(StringArray::from(vec!["Old title", "Clerk"])),
            Arc::new(TimestampMicrosecondArray::from(vec![
                micros(2024, 1, 2),
                micros(2024, 3, 4),
            ])),
            Arc::new(TimestampMicrosecondArray::from(vec![
                micros(2024, 1, 2),
                micros(2024, 3, 4),
            ])),
        ],
    )
    .unwrap();
    let textual = postings_batch(&[
        Posting {
            open_date: Some("01/02/2024"),
            last_updated: Some("06/01/2024"),
            ..Posting::new("A1", "New title")
        },
        Posting {
            open_date: Some("07/01/2024"),
            last_updated: Some("07/01/2024"),
            ..Posting::new("B2", "Nurse")
        },
    ]);
    let sources = vec![
        write_source(dir.path(), "typed.parquet", &typed),
        write_source(dir.path(), "textual.parquet", &textual),
    ];

    let report = run_pipeline(&test_config(dir.path(), sources)).unwrap();
    let table = &report.table;
    assert_eq!(table.num_rows(), 3);

    let years = table.column_by_name("year").unwrap().as_primitive::<Int32Type>();
    let b2 = row_of(table, "B2");
    assert!(years.is_valid(b2));
    assert_eq!(years.value(b2), 2024);
    assert_eq!(strings(table, "year_month")[b2].as_deref(), Some("2024-07"));

    // the text-dated copy of A1 is the more recent one
    let a1 = row_of(table, "A1");
    assert_eq!(strings(table, "positionTitle")[a1].as_deref(), Some("New title"));
}

#[test]
fn test_mixed_id_types_keep_distinct_postings() {
    let dir = tempfile::tempdir().unwrap();
    let numeric = RecordBatch::try_new(
        Arc::new(Schema::new(vec![
            Field::new("usajobsControlNumber", DataType::Int64, true),
            Field::new("positionTitle", DataType::Utf8, true),
        ])),
        vec![
            Arc::new(Int64Array::from(vec![1001])),
            Arc::new(StringArray::from(vec!["Nurse"])),
        ],
    )
    .unwrap();
    let textual = postings_batch(&[Posting::new("X-1", "Clerk"), Posting::new("X-2", "Guard")]);
    let sources = vec![
        write_source(dir.path(), "numeric.parquet", &numeric),
        write_source(dir.path(), "textual.parquet", &textual),
    ];

    let (combined, report) = load_sources(&sources).unwrap();
    assert_eq!(
        report.schema_report.issues[0].target_type,
        DataType::Utf8
    );
    assert_eq!(
        strings(&combined, "usajobsControlNumber"),
        vec![
            Some("1001".to_string()),
            Some("X-1".to_string()),
            Some("X-2".to_string())
        ]
    );

    let report = run_pipeline(&test_config(dir.path(), sources)).unwrap();
    assert_eq!(report.dedup.removed, 0);
}
