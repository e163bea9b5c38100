//! Tests for reading delimited source files

use crate::utils::{Fixture, GEO_HEADER, MART_HEADER, NO_ROWS, mart_row, write_csv};
use mart_reader::{LoaderOptions, read_records, read_records_async};

#[test]
fn test_every_header_column_present() {
    let fixture = Fixture::new(&[mart_row("A", "2019-01", "Professionals", "")], &NO_ROWS);
    let records = read_records(&fixture.primary, &LoaderOptions::default()).unwrap();

    assert_eq!(records.len(), 1);
    for column in MART_HEADER.split(';') {
        assert!(records[0].contains(column), "missing {column}");
    }
    assert_eq!(records[0].text("revenue"), Some(""));
}

#[test]
fn test_header_only_file_has_no_rows() {
    let fixture = Fixture::new(&NO_ROWS, &NO_ROWS);
    let records = read_records(&fixture.geo, &LoaderOptions::default()).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_custom_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "comma.csv", "unified_id,month", &["A,2019-01"]);
    let options = LoaderOptions::default().with_delimiter(b',');

    let records = read_records(&path, &options).unwrap();
    assert_eq!(records[0].text("month"), Some("2019-01"));
}

#[test]
fn test_quoted_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "quoted.csv", GEO_HEADER, &[r#"A;2019-01;1;2;"Paris; 1er""#]);

    let records = read_records(&path, &LoaderOptions::default()).unwrap();
    assert_eq!(records[0].text("city"), Some("Paris; 1er"));
}

#[test]
fn test_malformed_row_is_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "short.csv", GEO_HEADER, &["A;2019-01;1"]);

    let err = read_records(&path, &LoaderOptions::default()).unwrap_err();
    assert!(err.is_load_failure());
}

#[tokio::test]
async fn test_async_read_matches_blocking_read() {
    let fixture = Fixture::new(
        &[
            mart_row("A", "2019-01", "Professionals", "1"),
            mart_row("B", "2019-02", "Single Owners", "2"),
        ],
        &NO_ROWS,
    );
    let options = LoaderOptions::default().with_batch_size(1);

    let blocking = read_records(&fixture.primary, &options).unwrap();
    let async_read = read_records_async(&fixture.primary, options).await.unwrap();
    assert_eq!(blocking, async_read);
}
