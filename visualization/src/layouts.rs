//! Chart layout and stacked segment geometry

use crate::data::StackedBarData;
use crate::errors::{Result, VisualizationError};
use crate::scaling::{calculate_bar_height, calculate_stacked_max_value, ScalingOptions};
use serde::{Deserialize, Serialize};

/// Chart layout configuration and calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Total chart width in pixels
    pub width: u32,
    /// Total chart height in pixels
    pub height: u32,
    /// Margin configuration
    pub margins: Margins,
    /// Value (vertical) axis configuration
    pub value_axis: AxisConfig,
    /// Bar width relative to its slot (0.1 to 1.0)
    pub bar_width_ratio: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 960,
            height: 400,
            margins: Margins::default(),
            value_axis: AxisConfig::default(),
            bar_width_ratio: 0.8,
        }
    }
}

impl ChartLayout {
    /// Plot area after margins as (left, top, right, bottom)
    pub fn chart_area(&self) -> Result<(u32, u32, u32, u32)> {
        let horizontal = self.margins.left + self.margins.right;
        let vertical = self.margins.top + self.margins.bottom;
        if horizontal >= self.width || vertical >= self.height {
            return Err(VisualizationError::LayoutError {
                message: format!(
                    "Margins {}x{} leave no room in a {}x{} chart",
                    horizontal, vertical, self.width, self.height
                ),
            });
        }

        Ok((
            self.margins.left,
            self.margins.top,
            self.width - self.margins.right,
            self.height - self.margins.bottom,
        ))
    }

    /// Value axis ticks for a scale of `max_value`
    pub fn value_ticks(&self, max_value: f64) -> Vec<f64> {
        axis_ticks(max_value, self.value_axis.tick_count)
    }

    /// Plot area dimensions as (width, height)
    pub fn chart_dimensions(&self) -> Result<(u32, u32)> {
        let (left, top, right, bottom) = self.chart_area()?;
        Ok((right - left, bottom - top))
    }
}

/// Margin configuration for chart layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 56,   // Value labels
            right: 16,
            top: 24,
            bottom: 40, // Group labels
        }
    }
}

/// Axis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Number of tick intervals
    pub tick_count: usize,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self { tick_count: 5 }
    }
}

/// Evenly spaced tick values from 0 to `max_value` inclusive
pub fn axis_ticks(max_value: f64, tick_count: usize) -> Vec<f64> {
    if tick_count == 0 || !(max_value > 0.0) || !max_value.is_finite() {
        return vec![0.0];
    }
    let step = max_value / tick_count as f64;
    (0..=tick_count).map(|i| step * i as f64).collect()
}

/// One series segment within a stacked bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSegment {
    pub key: String,
    pub value: f64,
    /// Bottom edge as a percentage of the scale
    pub offset_pct: f64,
    /// Rendered height as a percentage of the scale
    pub height_pct: f64,
}

/// A full stacked bar for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBar {
    pub label: Option<String>,
    pub total: f64,
    pub segments: Vec<BarSegment>,
}

impl StackedBar {
    /// Top edge of the stack as a percentage of the scale
    pub fn top_pct(&self) -> f64 {
        self.segments
            .last()
            .map(|s| s.offset_pct + s.height_pct)
            .unwrap_or(0.0)
    }
}

/// Pixel rectangle for a segment: (x, y, width, height), y growing downward
pub type SegmentRect = (f64, f64, f64, f64);

/// Stacked bar geometry computed against a shared scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackedBarLayout {
    pub max_value: f64,
    pub bars: Vec<StackedBar>,
}

impl StackedBarLayout {
    /// Lay out every record of `data` as a stacked bar.
    ///
    /// Segment heights come from cumulative values so the stack top is
    /// clamped at 100% even when the scale is smaller than a total.
    pub fn new<K: AsRef<str>>(
        data: &[StackedBarData],
        label_key: Option<&str>,
        value_keys: &[K],
        options: &ScalingOptions,
    ) -> Result<Self> {
        let max_value = calculate_stacked_max_value(data, value_keys, options)?;

        let bars = data
            .iter()
            .map(|row| {
                let mut cumulative = 0.0;
                let mut previous_top = 0.0;
                let mut segments = Vec::with_capacity(value_keys.len());

                for key in value_keys {
                    let key = key.as_ref();
                    let value = row.number(key).unwrap_or(0.0);
                    cumulative += value;
                    let top = calculate_bar_height(cumulative, max_value);
                    let height_pct = (top - previous_top).max(0.0);
                    segments.push(BarSegment {
                        key: key.to_string(),
                        value,
                        offset_pct: previous_top,
                        height_pct,
                    });
                    previous_top = previous_top.max(top);
                }

                StackedBar {
                    label: label_key
                        .and_then(|k| row.get(k))
                        .and_then(|v| v.as_text())
                        .map(str::to_string),
                    total: cumulative,
                    segments,
                }
            })
            .collect();

        Ok(Self { max_value, bars })
    }

    /// Map every segment to pixel space inside the plot area of `layout`.
    ///
    /// Returns one vector of rectangles per bar, in segment order.
    pub fn segment_pixels(&self, layout: &ChartLayout) -> Result<Vec<Vec<SegmentRect>>> {
        let (left, _top, _right, bottom) = layout.chart_area()?;
        let (width, height) = layout.chart_dimensions()?;
        if self.bars.is_empty() {
            return Ok(Vec::new());
        }

        let slot = width as f64 / self.bars.len() as f64;
        let bar_width = slot * layout.bar_width_ratio.clamp(0.1, 1.0);
        let plot_height = height as f64;

        Ok(self
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let x = left as f64 + slot * i as f64 + (slot - bar_width) / 2.0;
                bar.segments
                    .iter()
                    .map(|segment| {
                        let h = plot_height * segment.height_pct / 100.0;
                        let y = bottom as f64
                            - plot_height * segment.offset_pct / 100.0
                            - h;
                        (x, y, bar_width, h)
                    })
                    .collect()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<StackedBarData> {
        vec![
            StackedBarData::new()
                .with_text("month", "Jan")
                .with_number("a", 48.0)
                .with_number("b", 97.0)
                .with_number("c", 145.0),
            StackedBarData::new()
                .with_text("month", "Feb")
                .with_number("a", 57.0)
                .with_number("b", 116.0)
                .with_number("c", 177.0),
        ]
    }

    #[test]
    fn test_tallest_stack_fills_scale() {
        let layout = StackedBarLayout::new(
            &rows(),
            Some("month"),
            &["a", "b", "c"],
            &ScalingOptions::default(),
        )
        .unwrap();

        assert_eq!(layout.max_value, 350.0);
        assert_eq!(layout.bars[1].label.as_deref(), Some("Feb"));
        assert!((layout.bars[1].top_pct() - 100.0).abs() < 1e-9);
        for bar in &layout.bars {
            assert!(bar.top_pct() <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn test_segments_stack_contiguously() {
        let layout =
            StackedBarLayout::new(&rows(), None, &["a", "b", "c"], &ScalingOptions::default())
                .unwrap();
        let jan = &layout.bars[0];

        assert_eq!(jan.label, None);
        assert_eq!(jan.total, 290.0);
        assert_eq!(jan.segments[0].offset_pct, 0.0);
        for pair in jan.segments.windows(2) {
            let top = pair[0].offset_pct + pair[0].height_pct;
            assert!((pair[1].offset_pct - top).abs() < 1e-9);
        }
    }

    #[test]
    fn test_undersized_fixed_scale_clamps() {
        let layout =
            StackedBarLayout::new(&rows(), None, &["a", "b", "c"], &ScalingOptions::fixed(200.0))
                .unwrap();
        let feb = &layout.bars[1];

        assert!((feb.top_pct() - 100.0).abs() < 1e-9);
        assert_eq!(feb.segments[2].height_pct, 100.0 - feb.segments[2].offset_pct);
    }

    #[test]
    fn test_segment_pixels_within_plot_area() {
        let chart = ChartLayout::default();
        let (_, top, _, bottom) = chart.chart_area().unwrap();
        let layout =
            StackedBarLayout::new(&rows(), None, &["a", "b", "c"], &ScalingOptions::default())
                .unwrap();

        let rects = layout.segment_pixels(&chart).unwrap();
        assert_eq!(rects.len(), 2);
        for (_, y, _, h) in rects.iter().flatten() {
            assert!(*y >= top as f64 - 1e-9);
            assert!(y + h <= bottom as f64 + 1e-9);
        }
    }

    #[test]
    fn test_margins_too_large() {
        let chart = ChartLayout {
            width: 50,
            ..ChartLayout::default()
        };
        assert!(chart.chart_area().is_err());
    }

    #[test]
    fn test_value_ticks_follow_tick_count() {
        let mut chart = ChartLayout::default();
        assert_eq!(chart.value_ticks(350.0).len(), 6);

        chart.value_axis.tick_count = 2;
        assert_eq!(chart.value_ticks(350.0), vec![0.0, 175.0, 350.0]);
    }

    #[test]
    fn test_axis_ticks() {
        assert_eq!(axis_ticks(100.0, 4), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(axis_ticks(0.0, 4), vec![0.0]);
        assert_eq!(axis_ticks(100.0, 0), vec![0.0]);
    }
}
