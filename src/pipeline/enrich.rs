//! Derived columns
//!
//! Adds calendar fields from the open date, simplified status and schedule
//! labels, and the occupational series title. Each derivation needs its source
//! column; when that column is absent the derivation is skipped with a warning
//! and the derived column is not created.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Int32Array, StringArray};
use arrow::datatypes::TimestampMicrosecondType;
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDateTime};

use crate::error::Result;
use crate::lookup::SeriesLookup;
use crate::schema::adapt::{
    DateFormatConfig, coerce_to_timestamp, micros_to_datetime, timestamp_type, to_string_array,
};
use crate::schema::columns::{
    APPOINTMENT_TYPE, MONTH, OCCUPATIONAL_SERIES, OCCUPATIONAL_SERIES_NAME, POSITION_OPEN_DATE,
    POSITION_OPENING_STATUS, POSITION_SCHEDULE, STATUS_SIMPLIFIED, UNKNOWN, UNKNOWN_SERIES, WEEK,
    YEAR, YEAR_MONTH,
};
use crate::utils::arrow::{get_column, with_column};

/// Add every derived column the batch has source columns for
pub fn enrich(batch: &RecordBatch, lookup: &SeriesLookup) -> Result<RecordBatch> {
    log::info!("Adding derived columns...");
    let mut batch = add_calendar_columns(batch)?;
    batch = add_filled_label(&batch, POSITION_OPENING_STATUS, STATUS_SIMPLIFIED)?;
    batch = add_filled_label(&batch, POSITION_SCHEDULE, APPOINTMENT_TYPE)?;
    add_series_names(&batch, lookup)
}

/// Add `year`, `month`, `week` and `year_month` from the open date
///
/// `week` is the ISO week number. Null open dates give null derived values.
pub fn add_calendar_columns(batch: &RecordBatch) -> Result<RecordBatch> {
    let Some(open_dates) = get_column(batch, POSITION_OPEN_DATE, "calendar columns") else {
        return Ok(batch.clone());
    };
    let open_dates = if open_dates.data_type() == &timestamp_type() {
        open_dates
    } else {
        coerce_to_timestamp(&open_dates, POSITION_OPEN_DATE, &DateFormatConfig::default())?
    };

    let dates: Vec<Option<NaiveDateTime>> = open_dates
        .as_primitive::<TimestampMicrosecondType>()
        .iter()
        .map(|v| v.and_then(micros_to_datetime))
        .collect();

    let years: Int32Array = dates.iter().map(|d| d.map(|d| d.year())).collect();
    let months: Int32Array = dates.iter().map(|d| d.map(|d| d.month() as i32)).collect();
    let weeks: Int32Array = dates
        .iter()
        .map(|d| d.map(|d| d.iso_week().week() as i32))
        .collect();
    let year_months: StringArray = dates
        .iter()
        .map(|d| d.map(|d| format!("{:04}-{:02}", d.year(), d.month())))
        .collect();

    let mut batch = with_column(batch, YEAR, Arc::new(years))?;
    batch = with_column(&batch, MONTH, Arc::new(months))?;
    batch = with_column(&batch, WEEK, Arc::new(weeks))?;
    with_column(&batch, YEAR_MONTH, Arc::new(year_months))
}

/// Copy `source` into `target` as strings with nulls replaced by "Unknown"
pub fn add_filled_label(batch: &RecordBatch, source: &str, target: &str) -> Result<RecordBatch> {
    let Some(values) = get_column(batch, source, target) else {
        return Ok(batch.clone());
    };
    let filled: StringArray = to_string_array(&values)?
        .iter()
        .map(|v| Some(v.unwrap_or(UNKNOWN)))
        .collect();
    with_column(batch, target, Arc::new(filled) as ArrayRef)
}

/// Add `occupationalSeriesName` by looking up `occupationalSeries`
pub fn add_series_names(batch: &RecordBatch, lookup: &SeriesLookup) -> Result<RecordBatch> {
    let Some(codes) = get_column(batch, OCCUPATIONAL_SERIES, "occupational series names") else {
        return Ok(batch.clone());
    };
    let names: StringArray = to_string_array(&codes)?
        .iter()
        .map(|code| Some(lookup.resolve(code)))
        .collect();

    let mapped = names.iter().flatten().filter(|n| *n != UNKNOWN_SERIES).count();
    log::info!("  Mapped {mapped} of {} occupational series codes", names.len());
    with_column(batch, OCCUPATIONAL_SERIES_NAME, Arc::new(names))
}
