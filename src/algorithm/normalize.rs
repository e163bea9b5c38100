//! Numeric normalization of declared text columns
//!
//! Text cells are coerced to `f64` with comma-decimal support. A cell that
//! cannot be parsed becomes `NaN` instead of failing the run, so the anomaly
//! stays visible in every later sum and mean.

use rayon::prelude::*;

use crate::error::{IngestError, Result};
use crate::models::{Record, Value};

/// Parse the longest leading decimal number in `text`
///
/// Leading whitespace is skipped. Accepts an optional sign followed by
/// `Infinity` or by digits with an optional fraction and exponent; trailing
/// characters after the number are ignored. Returns `NaN` when no number
/// starts the text.
#[must_use]
pub fn parse_float_prefix(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - end - 1;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Convert one text cell into a number
///
/// Empty text is `0`. Otherwise the first comma is read as the decimal
/// point before parsing.
#[must_use]
pub fn text_to_number(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    if text.contains(',') {
        parse_float_prefix(&text.replacen(',', ".", 1))
    } else {
        parse_float_prefix(text)
    }
}

/// Normalize the listed columns of a single record
///
/// # Errors
/// Returns [`IngestError::MissingColumn`] if a listed column is absent.
pub fn normalize_record(mut record: Record, columns: &[String], row: usize) -> Result<Record> {
    for column in columns {
        let value = record
            .get_mut(column)
            .ok_or_else(|| IngestError::MissingColumn {
                column: column.clone(),
                row,
            })?;
        if let Value::Text(text) = value {
            *value = Value::Number(text_to_number(text));
        }
    }
    Ok(record)
}

/// Coerce the listed columns of every record into numbers
///
/// Records are processed in parallel; output order matches input order.
/// Columns not listed keep their original text.
pub fn convert_to_numeric(records: Vec<Record>, columns: &[String]) -> Result<Vec<Record>> {
    log::debug!(
        "Normalizing {} numeric columns across {} rows",
        columns.len(),
        records.len()
    );

    let records = records
        .into_par_iter()
        .enumerate()
        .map(|(row, record)| normalize_record(record, columns, row))
        .collect::<Result<Vec<_>>>()?;

    for column in columns {
        let anomalies = records
            .iter()
            .filter(|r| r.number(column).is_some_and(f64::is_nan))
            .count();
        if anomalies > 0 {
            log::warn!("Column '{column}' has {anomalies} unparsable values (NaN)");
        }
    }

    Ok(records)
}
