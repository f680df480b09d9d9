//! Report assembly shared by the CLI: flag overrides on top of the loaded
//! configuration, and the stacked scale report.

use crate::error::Result;
use crate::overlap::OverlapOptions;
use pricelens_visualization::{
    ChartLayout, ScalingOptions, ScalingStrategy, StackedBarData, StackedBarLayout,
};
use serde::Serialize;

/// Flags that override `[overlap]` configuration
#[derive(Debug, Clone, Default)]
pub struct OverlapOverrides {
    pub currency: Option<String>,
    pub tolerance: Option<f64>,
}

impl OverlapOverrides {
    /// Apply the set flags over `base`; unset flags keep the configured value
    pub fn apply(&self, base: OverlapOptions) -> OverlapOptions {
        let mut options = base;
        if let Some(currency) = &self.currency {
            options = options.with_currency(currency);
        }
        if let Some(tolerance) = self.tolerance {
            options = options.with_tolerance(tolerance);
        }
        options
    }
}

/// Flags that override `[scaling]` configuration and chart layout
#[derive(Debug, Clone, Default)]
pub struct ScaleOverrides {
    pub keys: Vec<String>,
    pub strategy: Option<ScalingStrategy>,
    pub max_value: Option<f64>,
    pub padding: Option<f64>,
    pub min_scale: Option<f64>,
    pub tick_count: Option<usize>,
}

impl ScaleOverrides {
    pub fn apply(&self, base: ScalingOptions) -> ScalingOptions {
        let mut options = base;
        if let Some(strategy) = self.strategy {
            options = options.with_strategy(strategy);
        }
        if let Some(max_value) = self.max_value {
            options = options.with_max_value(max_value);
        }
        if let Some(padding) = self.padding {
            options = options.with_padding(padding);
        }
        if let Some(min_scale) = self.min_scale {
            options = options.with_min_scale(min_scale);
        }
        options
    }

    /// Keys given on the command line win; otherwise the configured ones
    pub fn value_keys(&self, configured: &[String]) -> Vec<String> {
        if self.keys.is_empty() {
            configured.to_vec()
        } else {
            self.keys.clone()
        }
    }

    pub fn chart_layout(&self) -> ChartLayout {
        let mut chart = ChartLayout::default();
        if let Some(tick_count) = self.tick_count {
            chart.value_axis.tick_count = tick_count;
        }
        chart
    }
}

/// Stacked bar geometry plus the value axis ticks for its scale
#[derive(Debug, Clone, Serialize)]
pub struct ScaleReport {
    #[serde(flatten)]
    pub layout: StackedBarLayout,
    pub ticks: Vec<f64>,
}

/// Lay out `rows` and compute the axis ticks from `chart`.
///
/// Empty rows or keys surface as `PricelensError::Scaling`.
pub fn build_scale_report(
    rows: &[StackedBarData],
    label_key: Option<&str>,
    value_keys: &[String],
    options: &ScalingOptions,
    chart: &ChartLayout,
) -> Result<ScaleReport> {
    let layout = StackedBarLayout::new(rows, label_key, value_keys, options)?;
    let ticks = chart.value_ticks(layout.max_value);
    Ok(ScaleReport { layout, ticks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricelensError;
    use pricelens_visualization::VisualizationError;

    fn rows() -> Vec<StackedBarData> {
        vec![
            StackedBarData::new()
                .with_text("month", "Jan")
                .with_number("a", 40.0)
                .with_number("b", 60.0),
            StackedBarData::new()
                .with_text("month", "Feb")
                .with_number("a", 80.0)
                .with_number("b", 120.0),
        ]
    }

    #[test]
    fn test_overlap_flags_override_config() {
        let configured = OverlapOptions::default()
            .with_currency("USD")
            .with_tolerance(2.0);

        let untouched = OverlapOverrides::default().apply(configured.clone());
        assert_eq!(untouched, configured);

        let overrides = OverlapOverrides {
            currency: Some("EUR".to_string()),
            tolerance: None,
        };
        let merged = overrides.apply(configured);
        assert_eq!(merged.currency.as_deref(), Some("EUR"));
        assert!(merged.require_same_currency);
        assert_eq!(merged.equality_tolerance_pct, 2.0);
    }

    #[test]
    fn test_scale_flags_override_config() {
        let configured = ScalingOptions::fixed(500.0).with_min_scale(50.0);
        let overrides = ScaleOverrides {
            strategy: Some(ScalingStrategy::Hybrid),
            padding: Some(1.25),
            ..ScaleOverrides::default()
        };
        let merged = overrides.apply(configured);

        assert_eq!(merged.strategy, ScalingStrategy::Hybrid);
        assert_eq!(merged.max_value, Some(500.0));
        assert_eq!(merged.padding, Some(1.25));
        assert_eq!(merged.min_scale, 50.0);
    }

    #[test]
    fn test_value_keys_precedence() {
        let configured = vec!["a".to_string(), "b".to_string()];
        assert_eq!(ScaleOverrides::default().value_keys(&configured), configured);

        let overrides = ScaleOverrides {
            keys: vec!["c".to_string()],
            ..ScaleOverrides::default()
        };
        assert_eq!(overrides.value_keys(&configured), vec!["c".to_string()]);
    }

    #[test]
    fn test_scale_report_uses_tick_count() {
        let keys = vec!["a".to_string(), "b".to_string()];
        let overrides = ScaleOverrides {
            tick_count: Some(4),
            ..ScaleOverrides::default()
        };
        let report = build_scale_report(
            &rows(),
            Some("month"),
            &keys,
            &ScalingOptions::default(),
            &overrides.chart_layout(),
        )
        .unwrap();

        assert_eq!(report.layout.max_value, 200.0);
        assert_eq!(report.ticks, vec![0.0, 50.0, 100.0, 150.0, 200.0]);

        let default_ticks = build_scale_report(
            &rows(),
            None,
            &keys,
            &ScalingOptions::default(),
            &ChartLayout::default(),
        )
        .unwrap()
        .ticks;
        assert_eq!(default_ticks.len(), 6);
    }

    #[test]
    fn test_scale_report_errors_are_scaling_errors() {
        let err = build_scale_report(
            &rows(),
            None,
            &[],
            &ScalingOptions::default(),
            &ChartLayout::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PricelensError::Scaling(VisualizationError::EmptyValueKeys)
        ));

        let err = build_scale_report(
            &[],
            None,
            &["a".to_string()],
            &ScalingOptions::default(),
            &ChartLayout::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PricelensError::Scaling(VisualizationError::EmptyData)));
    }
}
