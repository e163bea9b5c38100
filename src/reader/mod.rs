//! Delimited file loading
//!
//! Source files are decoded with the Arrow CSV reader into record batches of
//! text columns, then flattened into [`Record`] rows keyed by header name.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{Array, StringArray};
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::config::LoaderOptions;
use crate::error::util::safe_read_file;
use crate::error::{IngestError, Result};
use crate::models::Record;
use crate::utils::{log_empty_source, log_load_complete, log_load_start};

/// Build an all-text schema from the header row of delimited data
///
/// Every column is read as nullable `Utf8`; numeric coercion happens later
/// and only for declared columns.
pub fn header_schema(bytes: &[u8], options: &LoaderOptions) -> std::result::Result<SchemaRef, ArrowError> {
    let format = Format::default()
        .with_header(true)
        .with_delimiter(options.delimiter);
    let (inferred, _) = format.infer_schema(Cursor::new(bytes), Some(0))?;

    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect();

    Ok(Arc::new(Schema::new(fields)))
}

/// Decode delimited bytes into text record batches, with their header schema
fn decode_batches(
    bytes: &[u8],
    options: &LoaderOptions,
) -> std::result::Result<(SchemaRef, Vec<RecordBatch>), ArrowError> {
    let schema = header_schema(bytes, options)?;
    if schema.fields().is_empty() {
        return Err(ArrowError::CsvError("Missing header row".to_string()));
    }

    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_delimiter(options.delimiter)
        .with_batch_size(options.batch_size)
        .build(Cursor::new(bytes))?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

fn decode_file(path: &Path, options: &LoaderOptions) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let bytes = safe_read_file(path, "reading delimited file")?;
    decode_batches(&bytes, options).map_err(|e| IngestError::load(path, e.to_string()))
}

/// Read a delimited file into Arrow record batches
pub fn read_delimited(path: &Path, options: &LoaderOptions) -> Result<Vec<RecordBatch>> {
    decode_file(path, options).map(|(_, batches)| batches)
}

/// Flatten a batch of text columns into records
///
/// Null cells (empty fields) become empty text so that every header column
/// is present on every row.
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<Record>> {
    let schema = batch.schema();
    let columns = batch
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            column
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| {
                    IngestError::Schema(format!(
                        "Column '{}' is not a text column",
                        schema.field(idx).name()
                    ))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let mut record = Record::with_capacity(columns.len());
        for (field, column) in schema.fields().iter().zip(&columns) {
            let value = if column.is_null(row) {
                String::new()
            } else {
                column.value(row).to_string()
            };
            record.insert(field.name().as_str(), value);
        }
        records.push(record);
    }

    Ok(records)
}

/// Parse in-memory delimited data into records
pub fn parse_records(bytes: &[u8], options: &LoaderOptions) -> Result<Vec<Record>> {
    let (_, batches) = decode_batches(bytes, options)?;
    batches_to_records(&batches)
}

fn batches_to_records(batches: &[RecordBatch]) -> Result<Vec<Record>> {
    let total = batches.iter().map(RecordBatch::num_rows).sum();
    let mut records = Vec::with_capacity(total);
    for batch in batches {
        records.extend(batch_to_records(batch)?);
    }
    Ok(records)
}

/// Read a delimited file into records, one per data row
pub fn read_records(path: &Path, options: &LoaderOptions) -> Result<Vec<Record>> {
    log_load_start(path, options.delimiter);
    let start = Instant::now();

    let (schema, batches) = decode_file(path, options)?;
    let records = batches_to_records(&batches)?;
    let columns = schema.fields().len();

    if records.is_empty() {
        log_empty_source(path, columns);
    } else {
        log_load_complete(path, records.len(), columns, batches.len(), start.elapsed());
    }

    Ok(records)
}
