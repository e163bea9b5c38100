//! Shared utilities: logging helpers and period handling

pub mod logging;
pub mod period;

pub use logging::{log_empty_source, log_load_complete, log_load_start};
pub use period::{MONTH_LABELS, Period, PeriodLabels};
