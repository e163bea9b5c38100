//! Record models for market and geo rows
//!
//! Every stage of the pipeline passes [`Record`] values along; the stage
//! determines whether a record is raw, merged or aggregated.

pub mod record;

pub use record::{Record, Value};
