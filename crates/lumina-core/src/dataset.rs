//! Datasets and column type inference
//!
//! A dataset is created once from a parsed grid. Its identity and column
//! classification are frozen at that point; only row values change
//! afterwards (through the live feed).

use lumina_io::{ParsedGrid, Record, Value, ValueKind};
use serde::{Deserialize, Serialize};

/// Opaque dataset identifier
pub type DatasetId = String;

/// Column classification produced by type inference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypes {
    /// Columns whose first-row value is a number
    pub numeric: Vec<String>,
    /// Columns whose first-row value is text
    pub categorical: Vec<String>,
}

/// Classify columns from the first row's value
///
/// A column is numeric when `rows[0][column]` is a number and categorical
/// when it is text. Booleans, nulls and absent values put the column in
/// neither list, even if later rows are well typed. An empty row list
/// classifies nothing.
pub fn infer_column_types(columns: &[String], rows: &[Record]) -> ColumnTypes {
    let mut types = ColumnTypes::default();
    let Some(first) = rows.first() else {
        return types;
    };

    for column in columns {
        match first.get(column).map(Value::kind) {
            Some(ValueKind::Number) => types.numeric.push(column.clone()),
            Some(ValueKind::Text) => types.categorical.push(column.clone()),
            _ => {}
        }
    }
    types
}

/// A loaded tabular dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Unique identifier, never reused
    pub id: DatasetId,

    /// Display label
    pub name: String,

    /// Rows in display order
    #[serde(rename = "data", alias = "rows")]
    pub rows: Vec<Record>,

    /// Column names in source order
    pub columns: Vec<String>,

    /// Columns usable for statistics
    pub numeric_columns: Vec<String>,

    /// Text columns usable as categories
    pub categorical_columns: Vec<String>,

    /// Creation time, epoch milliseconds
    pub created_at: i64,
}

impl Dataset {
    /// Create a dataset from a parsed grid, inferring column types once
    pub fn from_grid(name: impl Into<String>, grid: ParsedGrid) -> Self {
        let ParsedGrid { headers, mut rows } = grid;

        // keys outside the header are not part of the dataset
        for row in &mut rows {
            row.retain(|key, _| headers.contains(key));
        }

        let types = infer_column_types(&headers, &rows);
        let dataset = Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            rows,
            columns: headers,
            numeric_columns: types.numeric,
            categorical_columns: types.categorical,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        tracing::info!(
            id = %dataset.id,
            name = %dataset.name,
            rows = dataset.rows.len(),
            numeric = dataset.numeric_columns.len(),
            categorical = dataset.categorical_columns.len(),
            "dataset ingested"
        );
        dataset
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Check if the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Column types as computed at ingestion
    pub fn column_types(&self) -> ColumnTypes {
        ColumnTypes {
            numeric: self.numeric_columns.clone(),
            categorical: self.categorical_columns.clone(),
        }
    }

    /// Value of `column` in every row, in row order; absent cells read as null
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        static NULL: Value = Value::Null;
        self.rows
            .iter()
            .map(move |row| row.get(column).unwrap_or(&NULL))
    }

    /// First `limit` rows
    pub fn head(&self, limit: usize) -> &[Record] {
        &self.rows[..limit.min(self.rows.len())]
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
