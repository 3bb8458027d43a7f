//! Module for handling date parsing and formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::schema::adapt::types::DateFormatConfig;

/// Parse a date or date-time string into a naive UTC date-time
///
/// Tries RFC 3339 first (offsets are normalized to UTC), then the configured
/// date-time formats, then date-only formats at midnight. Returns `None` when
/// nothing matches.
#[must_use]
pub fn parse_datetime_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for format in &config.datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    parse_date_string(s, config).and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse a date string with multiple format attempts
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    for format in &config.date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if config.enable_format_detection {
        if let Some(detected_format) = detect_date_format(s) {
            if let Ok(date) = NaiveDate::parse_from_str(s, detected_format) {
                return Some(date);
            }
        }
    }

    None
}

/// Try to detect the date format based on string patterns
#[must_use]
pub fn detect_date_format(s: &str) -> Option<&'static str> {
    // Day-first slashes only when the first part cannot be a month
    if s.contains('/') {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 3 && parts[2].len() == 4 {
            if let Ok(first_num) = parts[0].parse::<u8>() {
                if first_num > 12 {
                    return Some("%d/%m/%Y");
                }
            }
        }
    }

    if s.contains('.') {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() == 3 && parts[2].len() == 4 {
            return Some("%d.%m.%Y");
        }
    }

    None
}

/// Format a naive date-time as ISO 8601, omitting a zero fraction
#[must_use]
pub fn format_iso(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}
