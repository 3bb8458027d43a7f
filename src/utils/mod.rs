//! Shared utilities for Arrow handling, file I/O and logging.

pub mod arrow;
pub mod io;
pub mod logging;
