//! Utilities for logging, console output and progress tracking.

pub mod console;
pub mod log;
pub mod progress;

pub use log::{init_logging, log_operation_complete, log_operation_start, log_warning};
pub use progress::{create_file_progress_bar, finish_progress_bar};
