//! Error handling for the ingestion pipeline.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;

/// Errors that can occur while loading or processing market data
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Error opening or reading a source file
    #[error("IO error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source file could be opened but not parsed
    #[error("Failed to load {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },

    /// Arrow error while decoding delimited data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// A column listed for numeric conversion is missing from a row
    #[error("Missing column '{column}' in row {row}")]
    MissingColumn { column: String, row: usize },

    /// Record contents disagree with the declared schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// A background loading task failed to complete
    #[error("Loading task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IngestError {
    /// Create a load error for a file that could not be parsed
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error happened while fetching or parsing a source
    #[must_use]
    pub const fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Load { .. } | Self::Arrow(_) | Self::Task(_)
        )
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, IngestError>;
