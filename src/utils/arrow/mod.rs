//! Arrow data handling utilities

pub mod array_utils;

pub use array_utils::{get_column, require_column, select_existing_columns, value_counts, with_column};
