//! Record shapes consumed by the stacked bar utilities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field value in a chart record
///
/// Dashboard records mix labels (`"Jan"`) with series values (`48`).
/// Only the `Number` variant ever participates in sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartValue {
    Number(f64),
    Text(String),
}

impl ChartValue {
    /// The contained number when it is finite, `None` otherwise
    pub fn as_chart_number(&self) -> Option<f64> {
        match self {
            ChartValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ChartValue::Text(s) => Some(s),
            ChartValue::Number(_) => None,
        }
    }
}

impl From<f64> for ChartValue {
    fn from(value: f64) -> Self {
        ChartValue::Number(value)
    }
}

impl From<&str> for ChartValue {
    fn from(value: &str) -> Self {
        ChartValue::Text(value.to_string())
    }
}

impl From<String> for ChartValue {
    fn from(value: String) -> Self {
        ChartValue::Text(value)
    }
}

/// One labeled group of a stacked bar chart, e.g. one month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackedBarData {
    fields: BTreeMap<String, ChartValue>,
}

impl StackedBarData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style numeric field
    pub fn with_number(mut self, key: &str, value: f64) -> Self {
        self.insert(key, ChartValue::Number(value));
        self
    }

    /// Builder-style text field
    pub fn with_text(mut self, key: &str, value: &str) -> Self {
        self.insert(key, ChartValue::Text(value.to_string()));
        self
    }

    pub fn insert(&mut self, key: &str, value: ChartValue) {
        self.fields.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ChartValue> {
        self.fields.get(key)
    }

    /// Finite numeric value at `key`, if any
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ChartValue::as_chart_number)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sum of the numeric values at `keys`
    ///
    /// Missing keys, text values and non-finite numbers contribute zero.
    pub fn stacked_total<K: AsRef<str>>(&self, keys: &[K]) -> f64 {
        keys.iter()
            .filter_map(|key| self.number(key.as_ref()))
            .sum()
    }

    /// Build a record from a JSON object.
    ///
    /// Numbers become `Number`, strings become `Text`; booleans, nulls,
    /// arrays and nested objects are dropped.
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut record = Self::new();
        for (key, value) in object {
            match value {
                serde_json::Value::Number(n) => {
                    if let Some(n) = n.as_f64() {
                        record.insert(key, ChartValue::Number(n));
                    }
                }
                serde_json::Value::String(s) => record.insert(key, ChartValue::Text(s.clone())),
                _ => {}
            }
        }
        record
    }
}

impl<K: Into<String>, V: Into<ChartValue>> FromIterator<(K, V)> for StackedBarData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
