//! Pricelens Visualization Library
//!
//! Scale and geometry calculations for the stacked bar charts on the
//! pricing dashboard. Rendering itself happens elsewhere; this crate only
//! decides how tall things are.
//!
//! # Architecture
//!
//! - `data`: chart records with mixed label/number fields
//! - `scaling`: stacked axis maximum and safe bar heights
//! - `layouts`: segment offsets, pixel mapping and axis ticks
//! - `analysis`: per-series totals and summary statistics

pub mod analysis;
pub mod data;
pub mod errors;
pub mod layouts;
pub mod scaling;

// Re-export key types for convenience
pub use analysis::{SeriesAnalyzer, SeriesStats};
pub use data::{ChartValue, StackedBarData};
pub use errors::{Result, VisualizationError};
pub use layouts::{axis_ticks, BarSegment, ChartLayout, StackedBar, StackedBarLayout};
pub use scaling::{
    calculate_bar_height, calculate_stacked_max_value, extract_numeric_values,
    is_valid_chart_number, ScalingOptions, ScalingStrategy,
};

/// Version of the visualization library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
