//! Column names of the job-posting exports and of the derived columns.

/// Control-number identifier, the deduplication key
pub const CONTROL_NUMBER: &str = "usajobsControlNumber";
pub const POSITION_TITLE: &str = "positionTitle";
pub const ORGANIZATION_NAME: &str = "organizationName";
pub const HIRING_AGENCY_NAME: &str = "hiringAgencyName";
pub const HIRING_DEPARTMENT_NAME: &str = "hiringDepartmentName";
pub const POSITION_OPEN_DATE: &str = "positionOpenDate";
pub const POSITION_END_DATE: &str = "positionEndDate";
pub const LAST_UPDATED_DATE: &str = "lastUpdatedDate";
pub const POSITION_OPENING_STATUS: &str = "positionOpeningStatus";
pub const POSITION_SCHEDULE: &str = "positionSchedule";
pub const OCCUPATIONAL_SERIES: &str = "occupationalSeries";
pub const JOB_CATEGORIES: &str = "JobCategories";

/// Columns coerced to timestamps before deduplication
pub const DATE_COLUMNS: [&str; 3] = [POSITION_OPEN_DATE, POSITION_END_DATE, LAST_UPDATED_DATE];

// Derived columns
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const WEEK: &str = "week";
pub const YEAR_MONTH: &str = "year_month";
pub const STATUS_SIMPLIFIED: &str = "status_simplified";
pub const APPOINTMENT_TYPE: &str = "appointment_type";
pub const OCCUPATIONAL_SERIES_NAME: &str = "occupationalSeriesName";

/// Columns written to the sample extract, in output order
pub const SAMPLE_COLUMNS: [&str; 14] = [
    CONTROL_NUMBER,
    POSITION_TITLE,
    ORGANIZATION_NAME,
    POSITION_OPEN_DATE,
    POSITION_END_DATE,
    POSITION_OPENING_STATUS,
    "MinimumGradeLevel",
    "MaximumGradeLevel",
    YEAR,
    MONTH,
    YEAR_MONTH,
    STATUS_SIMPLIFIED,
    OCCUPATIONAL_SERIES,
    OCCUPATIONAL_SERIES_NAME,
];

/// Columns searched, in order, for an occupational series code
pub const CATEGORY_COLUMNS: [&str; 5] = [
    JOB_CATEGORIES,
    "occupational_series",
    "series",
    "job_series",
    "occupation",
];

/// Columns previewed by the column inspector
pub const KEY_COLUMNS: [&str; 6] = [
    CONTROL_NUMBER,
    POSITION_TITLE,
    HIRING_DEPARTMENT_NAME,
    HIRING_AGENCY_NAME,
    POSITION_OPEN_DATE,
    POSITION_OPENING_STATUS,
];

/// Low-cardinality columns whose value counts the inspector reports
pub const CATEGORICAL_COLUMNS: [&str; 7] = [
    "appointmentType",
    "workSchedule",
    "payScale",
    "whoMayApply",
    "teleworkEligible",
    "securityClearance",
    POSITION_OPENING_STATUS,
];

/// Columns holding nested or JSON-encoded values
pub const NESTED_COLUMNS: [&str; 3] = ["HiringPaths", JOB_CATEGORIES, "PositionLocations"];

/// Label for a null opening status or schedule
pub const UNKNOWN: &str = "Unknown";
/// Label for a series code missing from the lookup
pub const UNKNOWN_SERIES: &str = "Unknown Series";
