use jobs_pipeline::{TitleAggregationConfig, TitleSummary, run_pipeline, run_title_aggregation};

use crate::utils::{Posting, postings_batch, test_config, write_source};

const IT_CATEGORY: &str = r#"[{"name": "Information Technology Management", "code": "2210"}]"#;
const ADMIN_CATEGORY: &str = r#"[{"name": "Miscellaneous Administration", "code": "0301"}]"#;

fn posting(id: &'static str, title: &'static str, open: &'static str, category: &'static str) -> Posting {
    Posting {
        open_date: Some(open),
        categories: Some(category),
        agency: Some("Department of Veterans Affairs"),
        department: Some("Veterans Affairs"),
        ..Posting::new(id, title)
    }
}

#[test]
fn test_titles_from_pipeline_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(
        dir.path(),
        "current_jobs_2024.parquet",
        &postings_batch(&[
            posting("1", "Engineer", "2024-02-01", IT_CATEGORY),
            posting("2", "engineer", "2024-05-01", IT_CATEGORY),
            Posting {
                agency: None,
                department: None,
                ..posting("3", "Manager", "2024-06-01", IT_CATEGORY)
            },
            posting("4", "Engineer", "2025-01-01", IT_CATEGORY),
            posting("5", "Clerk", "2024-03-01", ADMIN_CATEGORY),
        ]),
    );
    run_pipeline(&test_config(dir.path(), vec![source])).unwrap();

    let config = TitleAggregationConfig::with_data_dir(dir.path());
    let summaries = run_title_aggregation(&config).unwrap();
    assert_eq!(
        summaries,
        vec![
            TitleSummary {
                job_title: "Engineer".to_string(),
                announcement_count: 2,
                agency: "Department of Veterans Affairs".to_string(),
                department: "Veterans Affairs".to_string(),
            },
            TitleSummary {
                job_title: "Manager".to_string(),
                announcement_count: 1,
                agency: "Unknown".to_string(),
                department: "Unknown".to_string(),
            },
        ]
    );

    let written = std::fs::read_to_string(&config.output_path).unwrap();
    let parsed: Vec<TitleSummary> = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed, summaries);

    let first_object: serde_json::Value = serde_json::from_str(&written).unwrap();
    let keys: Vec<&str> = first_object[0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["job_title", "announcement_count", "agency", "department"]);
}

#[test]
fn test_filters_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(
        dir.path(),
        "current_jobs_2024.parquet",
        &postings_batch(&[
            posting("1", "Engineer", "2024-02-01", IT_CATEGORY),
            posting("4", "Engineer", "2025-01-01", IT_CATEGORY),
            posting("5", "Clerk", "2024-03-01", ADMIN_CATEGORY),
        ]),
    );
    run_pipeline(&test_config(dir.path(), vec![source])).unwrap();

    let config = TitleAggregationConfig {
        target_year: None,
        target_series: None,
        ..TitleAggregationConfig::with_data_dir(dir.path())
    };
    let summaries = run_title_aggregation(&config).unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].job_title, "Engineer");
    assert_eq!(summaries[0].announcement_count, 2);
    assert_eq!(summaries[1].job_title, "Clerk");
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = TitleAggregationConfig::with_data_dir(dir.path());
    assert!(run_title_aggregation(&config).is_err());
}
