//! Configuration types for date coercion.

/// Configuration for date format handling
#[derive(Debug, Clone)]
pub struct DateFormatConfig {
    /// Date-time formats tried, in order, after RFC 3339
    pub datetime_formats: Vec<String>,
    /// Date-only formats tried, in order, when no date-time format matches
    pub date_formats: Vec<String>,
    /// Enable heuristic format detection for date-only strings
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            datetime_formats: vec![
                "%Y-%m-%dT%H:%M:%S%.f".to_string(), // 2024-07-01T08:30:00.0000
                "%Y-%m-%d %H:%M:%S%.f".to_string(), // 2024-07-01 08:30:00
                "%Y-%m-%dT%H:%M".to_string(),       // 2024-07-01T08:30
                "%m/%d/%Y %H:%M:%S".to_string(),    // 07/01/2024 08:30:00
                "%m/%d/%Y %I:%M:%S %p".to_string(), // 07/01/2024 8:30:00 AM
            ],
            date_formats: vec![
                "%Y-%m-%d".to_string(), // ISO format: 2024-07-01
                "%m/%d/%Y".to_string(), // US: 07/01/2024
                "%Y/%m/%d".to_string(), // 2024/07/01
                "%Y%m%d".to_string(),   // Compact: 20240701
                "%d %b %Y".to_string(), // 01 Jul 2024
                "%B %d, %Y".to_string(), // July 01, 2024
            ],
            enable_format_detection: true,
        }
    }
}
