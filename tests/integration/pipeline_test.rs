//! End-to-end tests for the ingestion pipeline

use std::collections::HashSet;

use crate::utils::{Fixture, NO_ROWS, find, mart_row};
use mart_reader::{DEFAULT_NUMERIC_FIELDS, load_data};

#[tokio::test]
async fn test_duplicates_are_averaged() -> mart_reader::Result<()> {
    let fixture = Fixture::new(
        &[
            mart_row("A", "2019-01", "Professionals", "100"),
            mart_row("A", "2019-01", "Professionals", "300"),
        ],
        &NO_ROWS,
    );

    let records = load_data(&fixture.config(false)).await?;
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.text("unified_id"), Some("A"));
    assert_eq!(record.text("month"), Some("2019-01"));
    assert_eq!(record.number("revenue"), Some(200.0));
    assert_eq!(record.number("occupancy"), Some(0.5));
    assert_eq!(record.text("city"), Some("Paris"));
    assert!(!record.contains("count"));
    Ok(())
}

#[tokio::test]
async fn test_three_way_mean() -> mart_reader::Result<()> {
    let fixture = Fixture::new(
        &[
            mart_row("A", "2019-01", "Professionals", "100"),
            mart_row("A", "2019-01", "Professionals", "200"),
            mart_row("A", "2019-01", "Professionals", "300"),
        ],
        &NO_ROWS,
    );

    let records = load_data(&fixture.config(false)).await?;
    assert_eq!(records[0].number("revenue"), Some(200.0));
    Ok(())
}

#[tokio::test]
async fn test_all_numeric_columns_are_numbers() -> mart_reader::Result<()> {
    let fixture = Fixture::new(
        &[
            "A;2019-01;Paris;Professionals;;;;;;;;;".to_string(),
            mart_row("B", "2019-01", "Single Owners", "1,5"),
        ],
        &NO_ROWS,
    );

    let records = load_data(&fixture.config(false)).await?;
    for record in &records {
        for column in DEFAULT_NUMERIC_FIELDS {
            assert!(record.number(column).is_some(), "{column} is not numeric");
        }
    }

    let blank = find(&records, "A", "2019-01").expect("record A");
    for column in DEFAULT_NUMERIC_FIELDS {
        assert_eq!(blank.number(column), Some(0.0));
    }
    assert_eq!(
        find(&records, "B", "2019-01").and_then(|r| r.number("revenue")),
        Some(1.5)
    );
    Ok(())
}

#[tokio::test]
async fn test_without_geo_counts_distinct_keys() -> mart_reader::Result<()> {
    let rows = [
        mart_row("A", "2019-01", "Professionals", "1"),
        mart_row("A", "2019-02", "Professionals", "2"),
        mart_row("B", "2019-01", "Single Owners", "3"),
        mart_row("B", "2019-01", "Single Owners", "4"),
        mart_row("C", "2019-03", "2-5 Units", "5"),
    ];
    // No geo rows at all: nothing may be filtered when the join is off
    let fixture = Fixture::new(&rows, &NO_ROWS);

    let records = load_data(&fixture.config(false)).await?;
    let keys: HashSet<(String, String)> = records
        .iter()
        .map(|r| {
            (
                r.text("unified_id").unwrap_or_default().to_string(),
                r.text("month").unwrap_or_default().to_string(),
            )
        })
        .collect();

    assert_eq!(records.len(), 4);
    assert_eq!(keys.len(), records.len());
    Ok(())
}

#[tokio::test]
async fn test_geo_join_filters_and_converts() -> mart_reader::Result<()> {
    let fixture = Fixture::new(
        &[
            mart_row("A", "2019-01", "Professionals", "100"),
            mart_row("A", "2019-02", "Professionals", "200"),
            mart_row("B", "2019-01", "Single Owners", "300"),
        ],
        &[
            "A;2018-06;48,8566;2,3522;Paris 1er",
            "A;2018-07;0;0;Elsewhere",
        ],
    );

    let records = load_data(&fixture.config(true)).await?;
    assert_eq!(records.len(), 2);

    for record in &records {
        assert_eq!(record.text("unified_id"), Some("A"));
        assert_eq!(record.number("latitude"), Some(48.8566));
        assert_eq!(record.number("longitude"), Some(2.3522));
        assert_eq!(record.text("city"), Some("Paris 1er"));
    }

    // Market periods survive the join
    assert!(find(&records, "A", "2019-01").is_some());
    assert!(find(&records, "A", "2019-02").is_some());
    Ok(())
}

#[tokio::test]
async fn test_unparsable_coordinate_passes_filter() -> mart_reader::Result<()> {
    // Known edge case: presence is the only coordinate check, so a value
    // that fails numeric parsing reaches the output as NaN.
    let fixture = Fixture::new(
        &[mart_row("A", "2019-01", "Professionals", "100")],
        &["A;2019-01;unknown;2,35;Paris"],
    );

    let records = load_data(&fixture.config(true)).await?;
    assert_eq!(records.len(), 1);
    assert!(records[0].number("latitude").is_some_and(f64::is_nan));
    assert_eq!(records[0].number("longitude"), Some(2.35));
    Ok(())
}

#[tokio::test]
async fn test_empty_coordinate_becomes_zero() -> mart_reader::Result<()> {
    let fixture = Fixture::new(
        &[mart_row("A", "2019-01", "Professionals", "100")],
        &["A;2019-01;;;Paris"],
    );

    let records = load_data(&fixture.config(true)).await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].number("latitude"), Some(0.0));
    Ok(())
}

#[tokio::test]
async fn test_unparsable_numeric_cell_does_not_abort() -> mart_reader::Result<()> {
    let fixture = Fixture::new(
        &[
            mart_row("A", "2019-01", "Professionals", "n/a"),
            mart_row("A", "2019-01", "Professionals", "100"),
            mart_row("B", "2019-01", "Professionals", "50"),
        ],
        &NO_ROWS,
    );

    let records = load_data(&fixture.config(false)).await?;
    let a = find(&records, "A", "2019-01").expect("record A");
    assert!(a.number("revenue").is_some_and(f64::is_nan));
    assert_eq!(
        find(&records, "B", "2019-01").and_then(|r| r.number("revenue")),
        Some(50.0)
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_primary_is_load_failure() {
    let fixture = Fixture::new(&NO_ROWS, &NO_ROWS);
    let config = mart_reader::PipelineConfig::new(fixture.dir.path().join("nope.csv"), &fixture.geo);

    let err = load_data(&config).await.unwrap_err();
    assert!(err.is_load_failure());
}

#[tokio::test]
async fn test_missing_numeric_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let primary = crate::utils::write_csv(
        dir.path(),
        "mart.csv",
        "unified_id;month;revenue",
        &["A;2019-01;100"],
    );
    let config = mart_reader::PipelineConfig::new(primary, dir.path().join("geo.csv"));

    let err = load_data(&config).await.unwrap_err();
    assert!(matches!(err, mart_reader::IngestError::MissingColumn { .. }));
}

#[tokio::test]
async fn test_concurrent_invocations_are_independent() -> mart_reader::Result<()> {
    let first = Fixture::new(&[mart_row("A", "2019-01", "Professionals", "10")], &NO_ROWS);
    let second = Fixture::new(&[mart_row("A", "2019-01", "Professionals", "20")], &NO_ROWS);
    let (first_config, second_config) = (first.config(false), second.config(false));

    let (left, right) = futures::future::try_join(
        load_data(&first_config),
        load_data(&second_config),
    )
    .await?;

    assert_eq!(left[0].number("revenue"), Some(10.0));
    assert_eq!(right[0].number("revenue"), Some(20.0));
    Ok(())
}
