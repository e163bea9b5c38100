//! Configuration for the ingestion pipeline.

use std::path::{Path, PathBuf};

use crate::schema::RecordSchema;

/// Default number of rows decoded per record batch
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Options for reading a delimited source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Rows per decoded record batch
    pub batch_size: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl LoaderOptions {
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

/// Configuration for one pipeline invocation
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Market dataset path
    pub primary_path: PathBuf,
    /// Geolocation dataset path
    pub geo_path: PathBuf,
    /// Whether to join coordinates onto the market rows
    pub with_geo: bool,
    pub loader: LoaderOptions,
    pub schema: RecordSchema,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            primary_path: PathBuf::from("market_analysis_2019.csv"),
            geo_path: PathBuf::from("geolocation.csv"),
            with_geo: false,
            loader: LoaderOptions::default(),
            schema: RecordSchema::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a configuration for the given source files
    #[must_use]
    pub fn new(primary_path: impl AsRef<Path>, geo_path: impl AsRef<Path>) -> Self {
        Self {
            primary_path: primary_path.as_ref().to_path_buf(),
            geo_path: geo_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Enable or disable the geo join stage
    #[must_use]
    pub const fn with_geo(mut self, with_geo: bool) -> Self {
        self.with_geo = with_geo;
        self
    }

    #[must_use]
    pub const fn with_loader(mut self, loader: LoaderOptions) -> Self {
        self.loader = loader;
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: RecordSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Columns normalized and averaged under this configuration
    #[must_use]
    pub fn numeric_columns(&self) -> Vec<String> {
        self.schema.numeric_columns(self.with_geo)
    }
}
