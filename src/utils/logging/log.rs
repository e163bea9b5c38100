//! Log lines for source file loading

use std::path::Path;
use std::time::Duration;

/// Announce that a source file is about to be decoded
pub fn log_load_start(path: &Path, delimiter: u8) {
    log::info!(
        "Loading rows from {} (delimiter {:?})",
        path.display(),
        char::from(delimiter)
    );
}

/// Report the shape of a decoded source file
///
/// # Arguments
/// * `path` - File that was read
/// * `rows` - Data rows, header excluded
/// * `columns` - Header columns
/// * `batches` - Arrow record batches decoded
/// * `elapsed` - Wall time spent reading and decoding
pub fn log_load_complete(
    path: &Path,
    rows: usize,
    columns: usize,
    batches: usize,
    elapsed: Duration,
) {
    log::info!(
        "Loaded {rows} rows x {columns} columns from {} ({batches} batches) in {elapsed:?}",
        path.display()
    );
}

/// Warn about a source file that has a header but no data rows
pub fn log_empty_source(path: &Path, columns: usize) {
    log::warn!(
        "{} has a header with {columns} columns but no data rows",
        path.display()
    );
}
