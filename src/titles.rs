//! Per-title aggregation of the combined dataset
//!
//! Filters the exported table to a target year and occupational series, groups
//! postings by case-insensitive title, and ranks the groups by announcement
//! count. The series filter is a substring match on the rendered category
//! text, so a code can also match inside a longer number.

use std::sync::Arc;

use arrow::array::{Array, AsArray, BooleanArray, StringArray};
use arrow::compute::filter_record_batch;
use arrow::datatypes::{DataType, Int64Type};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::classify::is_it_title;
use crate::config::TitleAggregationConfig;
use crate::error::Result;
use crate::schema::adapt::{convert_array, to_string_array};
use crate::schema::columns::{HIRING_AGENCY_NAME, HIRING_DEPARTMENT_NAME, POSITION_TITLE, UNKNOWN, YEAR};
use crate::utils::arrow::get_column;
use crate::utils::io::{ensure_directory, read_parquet_table, write_json_pretty};
use crate::utils::logging::log_warning;

/// One ranked title group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSummary {
    /// Most frequent original casing of the title
    pub job_title: String,
    pub announcement_count: usize,
    /// Most frequent hiring agency, "Unknown" when none is recorded.
    /// Ties go to the alphabetically first name.
    pub agency: String,
    /// Most frequent hiring department, "Unknown" when none is recorded
    pub department: String,
}

/// Read the combined table, aggregate, and write the ranked JSON
pub fn run_title_aggregation(config: &TitleAggregationConfig) -> Result<Vec<TitleSummary>> {
    let batch = read_parquet_table(&config.input_path)?;
    log::info!(
        "Available columns: {}",
        batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let summaries = aggregate_titles(&batch, config)?;
    if let Some(parent) = config.output_path.parent() {
        ensure_directory(parent)?;
    }
    write_json_pretty(&summaries, &config.output_path)?;

    log::info!("Processed {} unique job titles", summaries.len());
    for summary in summaries.iter().take(10) {
        log::info!(
            "  {:>5}  {}{}  ({} / {})",
            summary.announcement_count,
            summary.job_title,
            if is_it_title(&summary.job_title) { " [IT]" } else { "" },
            summary.agency,
            summary.department
        );
    }
    Ok(summaries)
}

/// Apply the configured filters, then group and rank titles
pub fn aggregate_titles(
    batch: &RecordBatch,
    config: &TitleAggregationConfig,
) -> Result<Vec<TitleSummary>> {
    let mut batch = batch.clone();
    if let Some(year) = config.target_year {
        batch = filter_by_year(&batch, year)?;
    }
    if let Some(series) = &config.target_series {
        let columns: Vec<&str> = config.category_columns.iter().map(String::as_str).collect();
        batch = filter_by_series(&batch, series, &columns)?;
    }
    group_titles(&batch)
}

/// Keep rows whose `year` equals `year`; all rows when the column is absent
pub fn filter_by_year(batch: &RecordBatch, year: i32) -> Result<RecordBatch> {
    let Some(years) = get_column(batch, YEAR, "year filter, using all data") else {
        return Ok(batch.clone());
    };
    let years = convert_array(&years, &DataType::Int64)?;
    let mask: BooleanArray = years
        .as_primitive::<Int64Type>()
        .iter()
        .map(|y| y.map(|y| y == i64::from(year)))
        .collect();

    let filtered = filter_record_batch(batch, &mask)?;
    log::info!("Found {} records for {year}", filtered.num_rows());
    Ok(filtered)
}

/// Keep rows whose category text contains `series`
///
/// Uses the first of `columns` present in the batch. When none is present
/// the batch is returned unfiltered. Null category values never match.
pub fn filter_by_series(batch: &RecordBatch, series: &str, columns: &[&str]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let Some(column) = columns.iter().find(|c| schema.index_of(c).is_ok()) else {
        log_warning(
            &format!(
                "None of the category columns [{}] found; skipping series {series} filter",
                columns.join(", ")
            ),
            None,
        );
        return Ok(batch.clone());
    };

    let categories = to_string_array(&Arc::clone(batch.column(schema.index_of(column)?)))?;
    let mask: BooleanArray = categories
        .iter()
        .map(|c| Some(c.is_some_and(|c| c.contains(series))))
        .collect();

    let filtered = filter_record_batch(batch, &mask)?;
    log::info!(
        "Found {} records for {series} series in column {column}",
        filtered.num_rows()
    );
    Ok(filtered)
}

/// Counts of string values in first-appearance order
#[derive(Debug, Default)]
struct Tally<'a> {
    counts: Vec<(&'a str, usize)>,
    index: FxHashMap<&'a str, usize>,
}

impl<'a> Tally<'a> {
    fn add(&mut self, value: &'a str) {
        match self.index.get(value) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(value, self.counts.len());
                self.counts.push((value, 1));
            }
        }
    }

    /// Most frequent value; the earliest seen wins ties
    fn mode(&self) -> Option<&'a str> {
        let mut best: Option<(&'a str, usize)> = None;
        for &(value, count) in &self.counts {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
    }

    /// Most frequent value; the lexicographically smallest wins ties
    fn smallest_mode(&self) -> Option<&'a str> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|&(value, _)| value)
    }
}

#[derive(Debug, Default)]
struct TitleGroup<'a> {
    count: usize,
    titles: Tally<'a>,
    agencies: Tally<'a>,
    departments: Tally<'a>,
}

/// Group rows by upper-cased title and rank by count
///
/// Rows with a null title are dropped. Ties in count are ordered by the
/// upper-cased title.
pub fn group_titles(batch: &RecordBatch) -> Result<Vec<TitleSummary>> {
    let Some(titles) = get_column(batch, POSITION_TITLE, "title aggregation") else {
        return Ok(Vec::new());
    };
    let titles = to_string_array(&titles)?;
    let agencies = optional_strings(batch, HIRING_AGENCY_NAME)?;
    let departments = optional_strings(batch, HIRING_DEPARTMENT_NAME)?;

    let mut groups: FxHashMap<String, TitleGroup<'_>> = FxHashMap::default();
    for (row, title) in titles.iter().enumerate() {
        let Some(title) = title else { continue };
        let group = groups.entry(title.to_uppercase()).or_default();
        group.count += 1;
        group.titles.add(title);
        if let Some(agency) = value_at(agencies.as_ref(), row) {
            group.agencies.add(agency);
        }
        if let Some(department) = value_at(departments.as_ref(), row) {
            group.departments.add(department);
        }
    }

    let mut ranked: Vec<(String, TitleSummary)> = groups
        .into_iter()
        .map(|(normalized, group)| {
            let summary = TitleSummary {
                job_title: group.titles.mode().unwrap_or(&normalized).to_string(),
                announcement_count: group.count,
                agency: group.agencies.smallest_mode().unwrap_or(UNKNOWN).to_string(),
                department: group.departments.smallest_mode().unwrap_or(UNKNOWN).to_string(),
            };
            (normalized, summary)
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.1.announcement_count
            .cmp(&a.1.announcement_count)
            .then_with(|| a.0.cmp(&b.0))
    });

    Ok(ranked.into_iter().map(|(_, summary)| summary).collect())
}

fn optional_strings(batch: &RecordBatch, column: &str) -> Result<Option<StringArray>> {
    batch
        .column_by_name(column)
        .map(to_string_array)
        .transpose()
}

fn value_at(array: Option<&StringArray>, row: usize) -> Option<&str> {
    array.filter(|a| a.is_valid(row)).map(|a| a.value(row))
}
