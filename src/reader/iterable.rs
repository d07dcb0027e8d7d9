use serde::Serialize;
use serde_json::Value;

use crate::errors::DataViewResult;
use crate::format;
use crate::reader::{DataReader, Row, Sort};

/// Reader over rows held in memory.
///
/// Row keys are the rows' original positions unless a key field is
/// configured.
#[derive(Clone, Debug, Default)]
pub struct IterableDataReader {
    rows: Vec<Value>,
    key_field: Option<String>,
    sort: Option<Sort>,
}

impl IterableDataReader {
    pub fn new(rows: Vec<Value>) -> Self {
        Self {
            rows,
            key_field: None,
            sort: None,
        }
    }

    /// Serialises `items` into rows.
    pub fn from_serialize<T: Serialize>(items: &[T]) -> DataViewResult<Self> {
        let rows = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rows))
    }

    /// Uses the value at `field` as the row key.
    pub fn with_key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = Some(field.into());
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    fn key_of(&self, index: usize, data: &Value) -> Value {
        self.key_field
            .as_deref()
            .and_then(|field| format::value_at(data, field))
            .cloned()
            .unwrap_or_else(|| Value::from(index))
    }
}

impl DataReader for IterableDataReader {
    fn count(&self) -> usize {
        self.rows.len()
    }

    fn read(&self) -> Vec<Row> {
        let mut rows: Vec<Row> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, data)| Row::new(self.key_of(index, data), data.clone()))
            .collect();

        if let Some(sort) = &self.sort {
            rows.sort_by(|left, right| sort.compare(&left.data, &right.data));
        }

        rows
    }

    fn sort(&self) -> Option<Sort> {
        self.sort.clone()
    }
}
