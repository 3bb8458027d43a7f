//! Module for handling data type adaptation between mismatched schemas.

pub mod conversions;
pub mod date_utils;
pub mod types;

pub use conversions::{
    coerce_to_timestamp, convert_array, create_null_array, micros_to_datetime, timestamp_type,
    to_string_array,
};
pub use date_utils::{detect_date_format, format_iso, parse_date_string, parse_datetime_string};
pub use types::DateFormatConfig;
