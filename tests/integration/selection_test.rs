//! Tests for consumer-side selection over pipeline output

use crate::utils::{Fixture, NO_ROWS, mart_row};
use mart_reader::{RecordSelection, load_data, order_by_period};

#[tokio::test]
async fn test_select_month_and_host_type() -> mart_reader::Result<()> {
    let fixture = Fixture::new(
        &[
            mart_row("A", "2019-02", "Professionals", "1"),
            mart_row("B", "2019-01", "Professionals", "2"),
            mart_row("C", "2019-01", "Single Owners", "3"),
            mart_row("D", "2019-01", "Professionals", "0"),
        ],
        &NO_ROWS,
    );
    let config = fixture.config(false);
    let records = load_data(&config).await?;

    let selected = RecordSelection::new()
        .with_month("Jan")
        .with_host_type("Professionals")
        .select(&records, &config.schema);
    let ids: Vec<&str> = selected.iter().filter_map(|r| r.text("unified_id")).collect();
    assert_eq!(ids, ["B", "D"]);

    // Zero revenue is data, not a missing value
    assert_eq!(selected[1].number("revenue"), Some(0.0));
    Ok(())
}

#[tokio::test]
async fn test_order_by_period_after_pipeline() -> mart_reader::Result<()> {
    let fixture = Fixture::new(
        &[
            mart_row("A", "2019-12", "Professionals", "1"),
            mart_row("A", "2019-03", "Professionals", "2"),
            mart_row("A", "2019-07", "Professionals", "3"),
        ],
        &NO_ROWS,
    );
    let config = fixture.config(false);
    let records = load_data(&config).await?;

    let all = RecordSelection::new().select(&records, &config.schema);
    let ordered = order_by_period(&all, &config.schema);
    let months: Vec<&str> = ordered.iter().filter_map(|r| r.text("month")).collect();
    assert_eq!(months, ["2019-03", "2019-07", "2019-12"]);
    Ok(())
}
