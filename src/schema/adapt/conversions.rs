//! Module for converting between different array types.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, StringArray, TimestampMicrosecondArray, new_null_array,
};
use arrow::compute::kernels::cast;
use arrow::datatypes::{DataType, Int32Type, Int64Type, TimeUnit};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use chrono::{DateTime, NaiveDateTime};

use crate::error::{PipelineError, Result};
use crate::schema::adapt::date_utils::parse_datetime_string;
use crate::schema::adapt::types::DateFormatConfig;

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// The temporal type every date column is coerced to
#[must_use]
pub fn timestamp_type() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, None)
}

/// Coerce a date-like column to `Timestamp(Microsecond, None)`
///
/// | source type | policy |
/// |---|---|
/// | `Timestamp(unit, tz)` | rescaled; zoned values keep their UTC instant |
/// | `Date32`, `Date64` | midnight of that day |
/// | `Utf8`, `LargeUtf8`, `Utf8View` | parsed, unparseable values become null |
/// | `Null` | all null |
///
/// # Errors
/// Returns `InvalidDataType` for any other source type.
pub fn coerce_to_timestamp(
    array: &ArrayRef,
    column: &str,
    config: &DateFormatConfig,
) -> Result<ArrayRef> {
    let micros: Vec<Option<i64>> = match array.data_type() {
        DataType::Timestamp(TimeUnit::Microsecond, None) => return Ok(array.clone()),
        DataType::Timestamp(unit, _) => {
            let raw = cast::cast(array, &DataType::Int64)?;
            raw.as_primitive::<Int64Type>()
                .iter()
                .map(|v| v.and_then(|v| rescale_to_micros(v, *unit)))
                .collect()
        }
        DataType::Date32 => {
            let raw = cast::cast(array, &DataType::Int32)?;
            raw.as_primitive::<Int32Type>()
                .iter()
                .map(|days| days.and_then(|d| i64::from(d).checked_mul(MICROS_PER_DAY)))
                .collect()
        }
        DataType::Date64 => {
            let raw = cast::cast(array, &DataType::Int64)?;
            raw.as_primitive::<Int64Type>()
                .iter()
                .map(|ms| ms.and_then(|ms| ms.checked_mul(1_000)))
                .collect()
        }
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let strings = cast::cast(array, &DataType::Utf8)?;
            strings
                .as_string::<i32>()
                .iter()
                .map(|s| {
                    s.and_then(|s| parse_datetime_string(s, config))
                        .map(|dt| dt.and_utc().timestamp_micros())
                })
                .collect()
        }
        DataType::Null => vec![None; array.len()],
        other => {
            return Err(PipelineError::InvalidDataType {
                column: column.to_string(),
                expected: format!("a date, timestamp or string type, found {other}"),
            });
        }
    };

    Ok(Arc::new(TimestampMicrosecondArray::from(micros)) as ArrayRef)
}

fn rescale_to_micros(value: i64, unit: TimeUnit) -> Option<i64> {
    match unit {
        TimeUnit::Second => value.checked_mul(1_000_000),
        TimeUnit::Millisecond => value.checked_mul(1_000),
        TimeUnit::Microsecond => Some(value),
        TimeUnit::Nanosecond => Some(value.div_euclid(1_000)),
    }
}

/// Convert microseconds since the epoch to a naive UTC date-time
#[must_use]
pub fn micros_to_datetime(micros: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_micros(micros).map(|dt| dt.naive_utc())
}

/// Create a null array of the specified type and length
#[must_use]
pub fn create_null_array(data_type: &DataType, length: usize) -> ArrayRef {
    new_null_array(data_type, length)
}

/// Cast an array to `target`, turning unconvertible values into nulls
///
/// # Errors
/// Returns `Conversion` when Arrow has no cast between the two types.
pub fn convert_array(array: &ArrayRef, target: &DataType) -> Result<ArrayRef> {
    let source = array.data_type();
    if source == target {
        return Ok(array.clone());
    }
    if !cast::can_cast_types(source, target) {
        return Err(PipelineError::Conversion(format!(
            "no cast from {source} to {target}"
        )));
    }
    cast::cast(array, target).map_err(|e| {
        PipelineError::Conversion(format!("failed to convert from {source} to {target}: {e}"))
    })
}

/// Render any array as strings, keeping nulls
///
/// Scalar types go through Arrow's cast. Types without a string cast (lists,
/// structs, maps) are rendered with Arrow's display formatter, so nested
/// values become their textual form.
pub fn to_string_array(array: &ArrayRef) -> Result<StringArray> {
    if cast::can_cast_types(array.data_type(), &DataType::Utf8) {
        let strings = cast::cast(array, &DataType::Utf8)?;
        return Ok(strings.as_string::<i32>().clone());
    }

    let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
    Ok((0..array.len())
        .map(|i| {
            if array.is_null(i) {
                None
            } else {
                Some(formatter.value(i).to_string())
            }
        })
        .collect())
}
