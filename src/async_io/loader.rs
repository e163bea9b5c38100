//! Concurrent source loading
//!
//! The market and geo files are independent, so they are read in parallel.
//! The geo join stage is the point that waits on both.

use std::path::{Path, PathBuf};

use futures::future::try_join;

use crate::config::{LoaderOptions, PipelineConfig};
use crate::error::Result;
use crate::models::Record;
use crate::reader::read_records;

/// Records read from both sources of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    pub primary: Vec<Record>,
    /// Geo rows, only read when the geo stage is enabled
    pub geo: Option<Vec<Record>>,
}

/// Read a delimited file asynchronously
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if the
/// blocking task fails
pub async fn read_records_async(path: &Path, options: LoaderOptions) -> Result<Vec<Record>> {
    let path: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || read_records(&path, &options)).await?
}

/// Load the sources named by `config`
///
/// When the geo stage is enabled both files load concurrently and the first
/// failure aborts the whole load. Otherwise only the market file is read.
pub async fn load_sources_async(config: &PipelineConfig) -> Result<LoadedSources> {
    if config.with_geo {
        log::info!(
            "Loading {} and {} concurrently",
            config.primary_path.display(),
            config.geo_path.display()
        );
        let (primary, geo) = try_join(
            read_records_async(&config.primary_path, config.loader),
            read_records_async(&config.geo_path, config.loader),
        )
        .await?;

        Ok(LoadedSources {
            primary,
            geo: Some(geo),
        })
    } else {
        let primary = read_records_async(&config.primary_path, config.loader).await?;
        Ok(LoadedSources { primary, geo: None })
    }
}
