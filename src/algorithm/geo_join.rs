//! Left join of geolocation rows onto market rows

use rustc_hash::FxHashMap;

use crate::models::Record;
use crate::schema::RecordSchema;

/// Geo rows indexed by entity id
///
/// Geo attributes are treated as time-invariant: the period column is
/// dropped from every row and only the first row per id is kept.
#[derive(Debug, Default)]
pub struct GeoIndex {
    by_id: FxHashMap<String, Record>,
    latitude_field: String,
    longitude_field: String,
}

impl GeoIndex {
    /// Build an index from geo rows, first occurrence per id wins
    #[must_use]
    pub fn build(geo: Vec<Record>, schema: &RecordSchema) -> Self {
        let mut by_id = FxHashMap::default();
        let mut duplicates = 0usize;

        for mut record in geo {
            record.remove(&schema.period_field);
            let Some(id) = record.get(&schema.id_field).map(ToString::to_string) else {
                continue;
            };
            if by_id.contains_key(&id) {
                duplicates += 1;
                continue;
            }
            by_id.insert(id, record);
        }

        if duplicates > 0 {
            log::debug!("Ignored {duplicates} duplicate geo rows");
        }

        Self {
            by_id,
            latitude_field: schema.latitude_field.clone(),
            longitude_field: schema.longitude_field.clone(),
        }
    }

    /// Look up the geo row for an entity id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.by_id.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Overlay geo fields onto each market row and drop rows without
    /// coordinates
    ///
    /// A row is kept when both coordinate fields are present, whatever
    /// their value.
    #[must_use]
    pub fn join(&self, primary: Vec<Record>, id_field: &str) -> Vec<Record> {
        let total = primary.len();

        let merged: Vec<Record> = primary
            .into_iter()
            .map(|mut record| {
                let geo = record
                    .get(id_field)
                    .and_then(|id| self.by_id.get(id.to_string().as_str()));
                if let Some(geo) = geo {
                    record.overlay(geo);
                }
                record
            })
            .filter(|r| r.contains(&self.latitude_field) && r.contains(&self.longitude_field))
            .collect();

        log::debug!(
            "Geo join kept {} of {} rows ({} without coordinates)",
            merged.len(),
            total,
            total - merged.len()
        );

        merged
    }
}

/// Join geolocation rows onto market rows by entity id
pub fn add_geo_data(primary: Vec<Record>, geo: Vec<Record>, schema: &RecordSchema) -> Vec<Record> {
    let index = GeoIndex::build(geo, schema);
    index.join(primary, &schema.id_field)
}
