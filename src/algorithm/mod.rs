//! Processing stages of the ingestion pipeline
//!
//! Each stage consumes the complete output of the previous one:
//! geo join, numeric normalization, then duplicate averaging.

pub mod aggregate;
pub mod geo_join;
pub mod normalize;

pub use aggregate::{Aggregator, GroupKey, average_duplicates};
pub use geo_join::{GeoIndex, add_geo_data};
pub use normalize::{convert_to_numeric, normalize_record, parse_float_prefix, text_to_number};
