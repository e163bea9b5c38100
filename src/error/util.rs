//! Utility functions for error handling
//!
//! Helpers that attach the offending path to IO failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Safely read a whole file into memory with rich error information
///
/// # Arguments
/// * `path` - The path to the file to read
/// * `purpose` - Why the file is being read (for error context)
pub fn safe_read_file(path: &Path, purpose: &str) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(IngestError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found (needed for: {purpose})"),
            ),
        });
    }

    if !path.is_file() {
        return Err(IngestError::load(
            path,
            format!("Path is not a file (expected a file for: {purpose})"),
        ));
    }

    fs::read(path).map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
