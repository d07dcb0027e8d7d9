use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// CSS class put on links of a field sorted in this direction.
    pub fn css_class(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sortable fields and the active order.
///
/// The order is exchanged with clients as a comma-separated list of field
/// names, descending ones prefixed with `-` (`-name,id`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sort {
    allowed: Vec<String>,
    criteria: Vec<(String, SortDirection)>,
}

impl Sort {
    /// Creates a sort accepting only the given fields.
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: fields.into_iter().map(Into::into).collect(),
            criteria: Vec::new(),
        }
    }

    /// Adds (or replaces) an order criterion. Fields that are not sortable are
    /// ignored.
    pub fn with_order(mut self, field: &str, direction: SortDirection) -> Self {
        if self.is_sortable(field) {
            self.criteria.retain(|(name, _)| name != field);
            self.criteria.push((field.to_string(), direction));
        }
        self
    }

    /// Replaces the order with one parsed from an order string.
    pub fn with_order_string(mut self, order: &str) -> Self {
        self.criteria.clear();
        for part in order.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (field, direction) = match part.strip_prefix('-') {
                Some(field) => (field, SortDirection::Desc),
                None => (part, SortDirection::Asc),
            };
            self = self.with_order(field, direction);
        }
        self
    }

    pub fn allowed_fields(&self) -> &[String] {
        &self.allowed
    }

    pub fn is_sortable(&self, field: &str) -> bool {
        self.allowed.iter().any(|allowed| allowed == field)
    }

    pub fn criteria(&self) -> &[(String, SortDirection)] {
        &self.criteria
    }

    pub fn direction(&self, field: &str) -> Option<SortDirection> {
        self.criteria
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, direction)| *direction)
    }

    pub fn order_string(&self) -> String {
        self.criteria
            .iter()
            .map(|(field, direction)| match direction {
                SortDirection::Asc => field.clone(),
                SortDirection::Desc => format!("-{field}"),
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Order string a sort link on `field` should request: the current
    /// direction reversed, or ascending when `field` is not ordered yet.
    pub fn toggled_order_string(&self, field: &str) -> String {
        match self.direction(field).map(SortDirection::reversed) {
            Some(SortDirection::Desc) => format!("-{field}"),
            _ => field.to_string(),
        }
    }

    /// Compares two rows by the active criteria.
    pub fn compare(&self, left: &Value, right: &Value) -> Ordering {
        for (field, direction) in &self.criteria {
            let ordering = compare_values(
                crate::format::value_at(left, field).unwrap_or(&Value::Null),
                crate::format::value_at(right, field).unwrap_or(&Value::Null),
            );
            let ordering = match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Total order over JSON values: null < booleans < numbers < strings <
/// everything else.
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) | Value::Object(_) => 4,
        }
    }

    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => rank(left).cmp(&rank(right)),
    }
}
