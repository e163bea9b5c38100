//! Declared field layout for market and geo datasets.
//!
//! The schema states up front which columns are numeric and which name the
//! join and grouping keys, so no stage has to infer types from row contents.

/// Numeric columns of the market dataset
pub const DEFAULT_NUMERIC_FIELDS: [&str; 9] = [
    "bathrooms",
    "bedrooms",
    "guests",
    "occupancy",
    "openness",
    "lead time",
    "revenue",
    "length stay",
    "nightly rate",
];

/// Field names used by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    /// Entity id, the join key between the datasets
    pub id_field: String,
    /// Period column, "YYYY-MM"
    pub period_field: String,
    /// Host type / category column
    pub category_field: String,
    pub latitude_field: String,
    pub longitude_field: String,
    /// Domain columns coerced to numbers and averaged
    pub numeric_fields: Vec<String>,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            id_field: "unified_id".to_string(),
            period_field: "month".to_string(),
            category_field: "host_type".to_string(),
            latitude_field: "latitude".to_string(),
            longitude_field: "longitude".to_string(),
            numeric_fields: DEFAULT_NUMERIC_FIELDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl RecordSchema {
    /// Set the entity id column name
    #[must_use]
    pub fn with_id_field(mut self, name: impl Into<String>) -> Self {
        self.id_field = name.into();
        self
    }

    /// Set the period column name
    #[must_use]
    pub fn with_period_field(mut self, name: impl Into<String>) -> Self {
        self.period_field = name.into();
        self
    }

    /// Set the host type column name
    #[must_use]
    pub fn with_category_field(mut self, name: impl Into<String>) -> Self {
        self.category_field = name.into();
        self
    }

    /// Set the coordinate column names
    #[must_use]
    pub fn with_coordinate_fields(
        mut self,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        self.latitude_field = latitude.into();
        self.longitude_field = longitude.into();
        self
    }

    /// Replace the declared numeric domain columns
    #[must_use]
    pub fn with_numeric_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Columns to normalize and average for one pipeline run
    ///
    /// Coordinates are numeric only when the geo join ran.
    #[must_use]
    pub fn numeric_columns(&self, with_geo: bool) -> Vec<String> {
        let mut columns = self.numeric_fields.clone();
        if with_geo {
            columns.push(self.latitude_field.clone());
            columns.push(self.longitude_field.clone());
        }
        columns
    }
}
