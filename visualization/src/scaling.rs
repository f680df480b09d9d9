//! Stacked bar scale calculation
//!
//! The axis maximum of a stacked chart must come from the largest *stacked
//! total*, not the largest single segment. Deriving it from the tallest
//! segment lets the bars overflow their container once several series are
//! stacked on top of each other.
//!
//! Three strategies are supported:
//! - `Dynamic`: fits the data exactly, with optional padding
//! - `Fixed`: a caller-supplied ceiling that stays stable across data slices
//! - `Hybrid`: never below the configured ceiling, grows for outliers,
//!   10% headroom by default

use crate::data::{ChartValue, StackedBarData};
use crate::errors::{Result, VisualizationError};
use serde::{Deserialize, Serialize};

/// Default headroom applied by the hybrid strategy
pub const HYBRID_DEFAULT_PADDING: f64 = 1.1;

/// How the chart maximum is derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingStrategy {
    #[default]
    Dynamic,
    Fixed,
    Hybrid,
}

impl std::str::FromStr for ScalingStrategy {
    type Err = VisualizationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dynamic" => Ok(ScalingStrategy::Dynamic),
            "fixed" => Ok(ScalingStrategy::Fixed),
            "hybrid" => Ok(ScalingStrategy::Hybrid),
            other => Err(VisualizationError::InvalidData {
                message: format!("Unknown scaling strategy: {}", other),
            }),
        }
    }
}

/// Scale calculation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingOptions {
    /// Externally supplied ceiling; its role depends on `strategy`
    pub max_value: Option<f64>,
    /// Multiplier on the computed maximum. `None` means 1.0 for dynamic
    /// and 1.1 for hybrid; fixed ignores it.
    pub padding: Option<f64>,
    /// Floor the result is clamped up to
    pub min_scale: f64,
    pub strategy: ScalingStrategy,
}

impl Default for ScalingOptions {
    fn default() -> Self {
        Self {
            max_value: None,
            padding: None,
            min_scale: 0.0,
            strategy: ScalingStrategy::Dynamic,
        }
    }
}

impl ScalingOptions {
    pub fn dynamic() -> Self {
        Self::default()
    }

    pub fn fixed(max_value: f64) -> Self {
        Self {
            max_value: Some(max_value),
            strategy: ScalingStrategy::Fixed,
            ..Self::default()
        }
    }

    pub fn hybrid(max_value: f64) -> Self {
        Self {
            max_value: Some(max_value),
            strategy: ScalingStrategy::Hybrid,
            ..Self::default()
        }
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_min_scale(mut self, min_scale: f64) -> Self {
        self.min_scale = min_scale;
        self
    }

    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn with_strategy(mut self, strategy: ScalingStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Largest stacked total across `data`, scaled per `options`.
///
/// # Errors
///
/// `EmptyData` when `data` is empty and `EmptyValueKeys` when `value_keys`
/// is empty. Both are caller bugs; a silent zero scale would render garbage.
pub fn calculate_stacked_max_value<K: AsRef<str>>(
    data: &[StackedBarData],
    value_keys: &[K],
    options: &ScalingOptions,
) -> Result<f64> {
    if data.is_empty() {
        return Err(VisualizationError::EmptyData);
    }
    if value_keys.is_empty() {
        return Err(VisualizationError::EmptyValueKeys);
    }

    let data_max = data
        .iter()
        .map(|row| row.stacked_total(value_keys))
        .fold(f64::NEG_INFINITY, f64::max);

    let scaled = match options.strategy {
        ScalingStrategy::Fixed => options.max_value.unwrap_or(data_max),
        ScalingStrategy::Hybrid => {
            let base = match options.max_value {
                Some(ceiling) => data_max.max(ceiling),
                None => data_max,
            };
            base * options.padding.unwrap_or(HYBRID_DEFAULT_PADDING)
        }
        ScalingStrategy::Dynamic => data_max * options.padding.unwrap_or(1.0),
    };

    Ok(if scaled < options.min_scale {
        options.min_scale
    } else {
        scaled
    })
}

/// Rendered height of a bar as a percentage of `max_value`, in `[0, 100]`.
///
/// `value` is the cumulative height up to and including the segment being
/// drawn. Zero or negative inputs map to 0; anything past the scale is
/// capped at 100.
pub fn calculate_bar_height(value: f64, max_value: f64) -> f64 {
    // Negated comparisons also catch NaN
    if !(max_value > 0.0) || !(value > 0.0) {
        return 0.0;
    }
    (value / max_value * 100.0).min(100.0)
}

/// True iff `value` is a finite number
pub fn is_valid_chart_number(value: &ChartValue) -> bool {
    value.as_chart_number().is_some()
}

/// Every finite number found at `keys`, row by row in key order
pub fn extract_numeric_values<K: AsRef<str>>(data: &[StackedBarData], keys: &[K]) -> Vec<f64> {
    data.iter()
        .flat_map(|row| keys.iter().filter_map(move |key| row.number(key.as_ref())))
        .collect()
}
