//! Auxiliary series statistics for stacked chart data

use crate::data::StackedBarData;
use crate::scaling::extract_numeric_values;
use serde::{Deserialize, Serialize};

/// Summary of the numeric values of one or more series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Per-series aggregation over chart records
pub struct SeriesAnalyzer;

impl SeriesAnalyzer {
    /// Total of each series across all records, in key order
    pub fn series_totals<K: AsRef<str>>(data: &[StackedBarData], keys: &[K]) -> Vec<(String, f64)> {
        keys.iter()
            .map(|key| {
                let key = key.as_ref();
                let total: f64 = data.iter().filter_map(|row| row.number(key)).sum();
                (key.to_string(), total)
            })
            .collect()
    }

    /// Share of each series in the grand total, as percentages
    pub fn series_share_pct<K: AsRef<str>>(
        data: &[StackedBarData],
        keys: &[K],
    ) -> Vec<(String, f64)> {
        let totals = Self::series_totals(data, keys);
        let grand_total: f64 = totals.iter().map(|(_, t)| t).sum();

        totals
            .into_iter()
            .map(|(key, total)| {
                let share = if grand_total == 0.0 {
                    0.0
                } else {
                    total / grand_total * 100.0
                };
                (key, share)
            })
            .collect()
    }

    /// Count, mean and extremes of every numeric value at `keys`
    pub fn value_statistics<K: AsRef<str>>(data: &[StackedBarData], keys: &[K]) -> SeriesStats {
        let values = extract_numeric_values(data, keys);
        if values.is_empty() {
            return SeriesStats::default();
        }

        let count = values.len();
        let sum: f64 = values.iter().sum();
        SeriesStats {
            count,
            mean: sum / count as f64,
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}
