//! # Pricelens
//!
//! Competitor price-overlap statistics and stacked chart scaling for a
//! repricing dashboard.
//!
//! ## Quick Start
//!
//! ```rust
//! use pricelens::{OverlapItem, OverlapOptions, compute_overlap_summary};
//!
//! let overlaps = vec![
//!     OverlapItem::new(90.0, 100.0),
//!     OverlapItem::new(100.2, 100.0),
//!     OverlapItem::new(-1.0, 100.0), // excluded: not a valid price
//! ];
//!
//! let summary = compute_overlap_summary(&overlaps, &OverlapOptions::default());
//! assert_eq!(summary.n, 2);
//! assert_eq!(summary.cheaper_pct, Some(50.0));
//! assert_eq!(summary.equal_pct, Some(50.0));
//! ```
//!
//! ## Overlap deltas
//!
//! Each valid observation contributes `(my - competitor) / competitor * 100`:
//!
//! 1. **Validity**: both prices finite and strictly positive, otherwise excluded
//! 2. **Buckets**: cheaper below `-tolerance`, equal within `±tolerance`, overpriced above
//! 3. **Percentiles**: linear interpolation over the sorted deltas
//!
//! Chart scaling lives in [`pricelens_visualization`], re-exported here as
//! [`chart`].

pub mod config;
pub mod error;
pub mod loader;
pub mod overlap;
pub mod report;
pub mod statistics;
pub mod types;

pub use pricelens_visualization as chart;

// Re-export commonly used types for convenience
pub use crate::config::PricelensConfig;
pub use error::{PricelensError, Result};
pub use overlap::{OverlapOptions, compute_overlap_summary, summarize_by_sku};
pub use types::{OverlapItem, OverlapSummary, PricePosition};

use tracing_subscriber::{EnvFilter, fmt};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` and falls back to `info`. Calling it again after a
/// subscriber is installed is a no-op.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);

    // Err only means a subscriber is already set
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
