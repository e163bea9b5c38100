//! Record selection for downstream consumers
//!
//! Consumers receive the aggregated records together with a selected month
//! and/or host type and pick the matching rows.

pub mod selection;

pub use selection::{RecordSelection, order_by_period};
