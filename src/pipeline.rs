//! Pipeline orchestration
//!
//! load → optional geo join → numeric normalization → duplicate averaging.
//! Every stage runs to completion before the next starts, and the first
//! error from any stage ends the invocation.

use std::time::Instant;

use crate::algorithm::{add_geo_data, average_duplicates, convert_to_numeric};
use crate::async_io::{LoadedSources, load_sources_async};
use crate::config::PipelineConfig;
use crate::error::{IngestError, Result};
use crate::models::Record;

/// Run the processing stages over already loaded rows
///
/// `geo` is required when `config.with_geo` is set and ignored otherwise.
pub fn process_sources(
    primary: Vec<Record>,
    geo: Option<Vec<Record>>,
    config: &PipelineConfig,
) -> Result<Vec<Record>> {
    let schema = &config.schema;

    let merged = if config.with_geo {
        let geo = geo.ok_or_else(|| {
            IngestError::load(&config.geo_path, "Geo join enabled but no geo rows were loaded")
        })?;
        log::info!("Joining {} geo rows onto {} rows", geo.len(), primary.len());
        add_geo_data(primary, geo, schema)
    } else {
        primary
    };

    let columns = config.numeric_columns();
    log::info!("Normalizing {} rows", merged.len());
    let normalized = convert_to_numeric(merged, &columns)?;

    log::info!("Averaging duplicate rows");
    let aggregated = average_duplicates(normalized, schema, &columns)?;

    Ok(aggregated)
}

/// Load both sources and run the full pipeline
///
/// Returns one record per (entity id, period) or the first failure.
pub async fn load_data(config: &PipelineConfig) -> Result<Vec<Record>> {
    let start = Instant::now();

    let LoadedSources { primary, geo } = load_sources_async(config).await?;
    let records = process_sources(primary, geo, config)?;

    log::info!(
        "Pipeline produced {} records in {:?}",
        records.len(),
        start.elapsed()
    );
    Ok(records)
}
