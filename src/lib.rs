//! A Rust library for ingesting market-analysis CSV exports: loading,
//! geolocation join, numeric normalization and duplicate averaging.

pub mod algorithm;
pub mod async_io;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{DEFAULT_BATCH_SIZE, LoaderOptions, PipelineConfig};
pub use error::{IngestError, Result};
pub use models::{Record, Value};
pub use schema::{DEFAULT_NUMERIC_FIELDS, RecordSchema};

// Pipeline stages
pub use algorithm::{GeoIndex, add_geo_data, average_duplicates, convert_to_numeric};
pub use pipeline::{load_data, process_sources};

// Loading
pub use async_io::{LoadedSources, load_sources_async, read_records_async};
pub use reader::{parse_records, read_records};

// Consumer-side selection
pub use filter::{RecordSelection, order_by_period};
pub use utils::{Period, PeriodLabels};
