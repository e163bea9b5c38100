//! Logging utilities for output and progress tracking

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use self::log::{log_empty_source, log_load_complete, log_load_start};
pub use progress::{create_spinner, finish_progress_bar};
