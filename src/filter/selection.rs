//! Month and host type selection over aggregated records

use itertools::Itertools;

use crate::models::Record;
use crate::schema::RecordSchema;
use crate::utils::period::{Period, PeriodLabels};

/// Caller-supplied filters; unset filters match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSelection {
    /// Short month label such as "Jan"
    pub month: Option<String>,
    /// Host type, compared exactly
    pub host_type: Option<String>,
}

impl RecordSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    #[must_use]
    pub fn with_host_type(mut self, host_type: impl Into<String>) -> Self {
        self.host_type = Some(host_type.into());
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.month.is_none() && self.host_type.is_none()
    }

    fn matches(&self, record: &Record, schema: &RecordSchema, labels: &mut PeriodLabels) -> bool {
        if let Some(host_type) = &self.host_type {
            if record.text(&schema.category_field) != Some(host_type.as_str()) {
                return false;
            }
        }
        if let Some(month) = &self.month {
            let label = record
                .text(&schema.period_field)
                .and_then(|period| labels.label(period));
            if label != Some(month.as_str()) {
                return false;
            }
        }
        true
    }

    /// Records matching every set filter, in input order
    ///
    /// Period labels are cached for the duration of this call only.
    #[must_use]
    pub fn select<'a>(&self, records: &'a [Record], schema: &RecordSchema) -> Vec<&'a Record> {
        let mut labels = PeriodLabels::new();
        records
            .iter()
            .filter(|r| self.matches(r, schema, &mut labels))
            .collect()
    }
}

/// Sort records chronologically by period, unparsable periods last
///
/// The sort is stable, so records sharing a period keep their order.
#[must_use]
pub fn order_by_period<'a>(records: &[&'a Record], schema: &RecordSchema) -> Vec<&'a Record> {
    let mut labels = PeriodLabels::new();
    records
        .iter()
        .copied()
        .map(|r| {
            let period = r.text(&schema.period_field).and_then(|p| labels.period(p));
            (period.is_none(), period.map(|p: Period| (p.year(), p.month())), r)
        })
        .sorted_by_key(|(missing, period, _)| (*missing, *period))
        .map(|(_, _, r)| r)
        .collect()
}
