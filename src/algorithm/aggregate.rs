//! Deduplication of (entity id, period) rows by averaging
//!
//! One streaming pass accumulates running sums per group; finalization
//! divides each sum by the group size. Numeric fields come from the declared
//! column list, everything else keeps its first-seen value.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{IngestError, Result};
use crate::models::{Record, Value};
use crate::schema::RecordSchema;

/// Composite grouping key: (entity id, period)
pub type GroupKey = (String, String);

/// Running state for one (entity id, period) group
#[derive(Debug, Clone)]
struct Accumulator {
    fields: Record,
    count: usize,
}

impl Accumulator {
    /// Divide declared numeric sums by the group size
    ///
    /// Undeclared fields keep their first-seen value even when numeric.
    fn finish(self, numeric: &FxHashSet<&str>) -> Record {
        let count = self.count as f64;
        self.fields
            .into_iter()
            .map(|(name, value)| match value {
                Value::Number(sum) if numeric.contains(name.as_str()) => {
                    (name, Value::Number(sum / count))
                }
                other => (name, other),
            })
            .collect()
    }
}

/// Streaming group-by over records in input order
#[derive(Debug)]
pub struct Aggregator<'a> {
    schema: &'a RecordSchema,
    numeric: FxHashSet<&'a str>,
    index: FxHashMap<GroupKey, usize>,
    groups: Vec<Accumulator>,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator averaging the given numeric columns
    #[must_use]
    pub fn new(schema: &'a RecordSchema, numeric_columns: &'a [String]) -> Self {
        Self {
            schema,
            numeric: numeric_columns.iter().map(String::as_str).collect(),
            index: FxHashMap::default(),
            groups: Vec::new(),
        }
    }

    fn key(&self, record: &Record) -> GroupKey {
        let part = |name: &str| record.get(name).map(ToString::to_string).unwrap_or_default();
        (part(&self.schema.id_field), part(&self.schema.period_field))
    }

    /// Numeric value of a declared numeric field
    fn numeric_value(name: &str, value: &Value) -> Result<f64> {
        value.as_number().ok_or_else(|| {
            IngestError::Schema(format!(
                "Field '{name}' is declared numeric but holds text '{value}'"
            ))
        })
    }

    /// Add one record to its group
    pub fn push(&mut self, record: Record) -> Result<()> {
        let key = self.key(&record);

        if let Some(&idx) = self.index.get(&key) {
            let group = &mut self.groups[idx];
            group.count += 1;
            for (name, value) in record.iter() {
                if !self.numeric.contains(name) {
                    continue;
                }
                let value = Self::numeric_value(name, value)?;
                match group.fields.get_mut(name) {
                    Some(Value::Number(sum)) => *sum += value,
                    _ => {
                        group.fields.insert(name, value);
                    }
                }
            }
            return Ok(());
        }

        for (name, value) in record.iter() {
            if self.numeric.contains(name) {
                Self::numeric_value(name, value)?;
            }
        }
        self.index.insert(key, self.groups.len());
        self.groups.push(Accumulator {
            fields: record,
            count: 1,
        });
        Ok(())
    }

    /// Number of distinct groups seen so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Emit one averaged record per group, in first-seen key order
    #[must_use]
    pub fn finish(self) -> Vec<Record> {
        let numeric = self.numeric;
        self.groups
            .into_iter()
            .map(|group| group.finish(&numeric))
            .collect()
    }
}

/// Average duplicate (entity id, period) rows into one record each
///
/// # Errors
/// Returns [`IngestError::Schema`] if a declared numeric column still holds
/// text.
pub fn average_duplicates(
    records: Vec<Record>,
    schema: &RecordSchema,
    numeric_columns: &[String],
) -> Result<Vec<Record>> {
    let total = records.len();
    let mut aggregator = Aggregator::new(schema, numeric_columns);
    for record in records {
        aggregator.push(record)?;
    }
    log::debug!("Aggregated {} rows into {} groups", total, aggregator.len());
    Ok(aggregator.finish())
}
