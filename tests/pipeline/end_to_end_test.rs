use arrow::array::{Array, AsArray};
use arrow::datatypes::Int32Type;
use jobs_pipeline::run_pipeline;
use rustc_hash::FxHashSet;

use crate::utils::{Posting, postings_batch, row_of, strings, test_config, write_lookup, write_source};

fn historical() -> Vec<Posting> {
    vec![
        Posting {
            organization: Some("Veterans Affairs"),
            open_date: Some("2024-03-01"),
            last_updated: Some("2024-03-01T09:00:00"),
            status: Some("Open"),
            series: Some("2210"),
            ..Posting::new("A1", "IT Specialist")
        },
        Posting {
            organization: Some("Defense"),
            open_date: None,
            last_updated: Some("2024-02-01"),
            series: Some("9999"),
            ..Posting::new("B2", "Nurse")
        },
    ]
}

fn current() -> Vec<Posting> {
    vec![
        Posting {
            organization: Some("Veterans Affairs"),
            open_date: Some("2024-03-01"),
            last_updated: Some("2024-05-15T12:30:00"),
            status: Some("Closed"),
            series: Some("2210"),
            ..Posting::new("A1", "IT Specialist (INFOSEC)")
        },
        Posting {
            organization: Some("Interior"),
            open_date: Some("2025-01-10"),
            last_updated: Some("2025-01-10"),
            status: Some("Open"),
            ..Posting::new("C3", "Park Ranger")
        },
    ]
}

#[test]
fn test_latest_version_of_each_posting_is_exported() {
    let dir = tempfile::tempdir().unwrap();
    let sources = vec![
        write_source(dir.path(), "historical_jobs_2024.parquet", &postings_batch(&historical())),
        write_source(dir.path(), "current_jobs_2024.parquet", &postings_batch(&current())),
    ];
    write_lookup(dir.path());
    let config = test_config(dir.path(), sources);

    let report = run_pipeline(&config).unwrap();
    assert_eq!(report.load.total_rows(), 4);
    assert_eq!(report.dedup.removed, 1);

    let table = &report.table;
    assert_eq!(table.num_rows(), 3);

    let ids = strings(table, "usajobsControlNumber");
    let distinct: FxHashSet<_> = ids.iter().collect();
    assert_eq!(distinct.len(), ids.len());

    let a1 = row_of(table, "A1");
    assert_eq!(
        strings(table, "positionTitle")[a1].as_deref(),
        Some("IT Specialist (INFOSEC)")
    );
    assert_eq!(strings(table, "status_simplified")[a1].as_deref(), Some("Closed"));

    assert!(report.paths.parquet.is_file());
    assert!(report.paths.summary.is_file());
    assert!(report.paths.sample.is_file());
}

#[test]
fn test_derived_columns() {
    let dir = tempfile::tempdir().unwrap();
    let sources = vec![
        write_source(dir.path(), "historical_jobs_2024.parquet", &postings_batch(&historical())),
        write_source(dir.path(), "current_jobs_2024.parquet", &postings_batch(&current())),
    ];
    write_lookup(dir.path());
    let report = run_pipeline(&test_config(dir.path(), sources)).unwrap();
    let table = &report.table;

    let series_names = strings(table, "occupationalSeriesName");
    assert_eq!(
        series_names[row_of(table, "A1")].as_deref(),
        Some("Information Technology Management")
    );
    assert_eq!(series_names[row_of(table, "B2")].as_deref(), Some("Unknown Series"));
    assert_eq!(series_names[row_of(table, "C3")].as_deref(), Some("Unknown Series"));

    // B2 has no open date: kept, with null calendar fields
    let years = table.column_by_name("year").unwrap().as_primitive::<Int32Type>();
    let b2 = row_of(table, "B2");
    assert!(years.is_null(b2));
    assert_eq!(strings(table, "year_month")[b2], None);
    assert_eq!(strings(table, "status_simplified")[b2].as_deref(), Some("Unknown"));

    let c3 = row_of(table, "C3");
    assert_eq!(years.value(c3), 2025);
    assert_eq!(strings(table, "year_month")[c3].as_deref(), Some("2025-01"));

    // no positionSchedule column in the sources
    assert!(table.column_by_name("appointment_type").is_none());
}

#[test]
fn test_exported_files() {
    let dir = tempfile::tempdir().unwrap();
    let sources = vec![
        write_source(dir.path(), "historical_jobs_2024.parquet", &postings_batch(&historical())),
        write_source(dir.path(), "current_jobs_2024.parquet", &postings_batch(&current())),
    ];
    write_lookup(dir.path());
    let mut config = test_config(dir.path(), sources);
    config.sample_size = 2;
    let report = run_pipeline(&config).unwrap();

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report.paths.summary).unwrap()).unwrap();
    assert_eq!(summary["total_records"], 3);
    assert_eq!(summary["years"], serde_json::json!([2024, 2025]));
    assert_eq!(summary["departments"]["Veterans Affairs"], 1);
    assert_eq!(summary["status_counts"]["Unknown"], 1);
    assert!(
        summary["date_range"]["start"]
            .as_str()
            .unwrap()
            .starts_with("2024-03-01")
    );
    assert!(summary["last_updated"].is_string());

    let sample: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&report.paths.sample).unwrap()).unwrap();
    assert_eq!(sample.len(), 2);
    assert!(sample[0].get("occupationalSeriesName").is_some());
    assert!(sample[0].get("JobCategories").is_none());

    let reread = jobs_pipeline::utils::io::read_parquet_table(&report.paths.parquet).unwrap();
    assert_eq!(reread.num_rows(), 3);
    let columns = |schema: &arrow::datatypes::Schema| {
        schema
            .fields()
            .iter()
            .map(|f| (f.name().clone(), f.data_type().clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(columns(&reread.schema()), columns(&report.table.schema()));
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let sources = vec![
        write_source(dir.path(), "historical_jobs_2024.parquet", &postings_batch(&historical())),
        write_source(dir.path(), "current_jobs_2024.parquet", &postings_batch(&current())),
    ];
    write_lookup(dir.path());
    let config = test_config(dir.path(), sources);

    let first = run_pipeline(&config).unwrap();
    let second = run_pipeline(&config).unwrap();

    assert_eq!(first.table.num_rows(), second.table.num_rows());
    assert_eq!(first.summary.years, second.summary.years);
    assert_eq!(first.summary.departments, second.summary.departments);
    assert_eq!(first.summary.status_counts, second.summary.status_counts);
    assert_eq!(first.summary.date_range, second.summary.date_range);
}

#[test]
fn test_missing_lookup_leaves_series_unmapped() {
    let dir = tempfile::tempdir().unwrap();
    let sources = vec![write_source(
        dir.path(),
        "historical_jobs_2024.parquet",
        &postings_batch(&historical()),
    )];
    let report = run_pipeline(&test_config(dir.path(), sources)).unwrap();

    assert!(
        strings(&report.table, "occupationalSeriesName")
            .iter()
            .all(|name| name.as_deref() == Some("Unknown Series"))
    );
}
