//! Overlap price statistics
//!
//! Summarizes how our prices sit against competitors for the same products:
//! the median relative delta, its interquartile range and extremes, and the
//! share of observations where we are cheaper, equal or overpriced.
//!
//! Dirty observations are expected from scraped feeds. They are excluded
//! from every denominator, never reported as errors.

use crate::statistics::{median_sorted, percentile_sorted, sort_ascending};
use crate::types::{OverlapItem, OverlapSummary, PricePosition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default width of the "equal price" band, in percentage points
pub const DEFAULT_EQUALITY_TOLERANCE_PCT: f64 = 0.5;

/// Summary calculation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapOptions {
    /// Absolute band around a zero delta that counts as equal
    pub equality_tolerance_pct: f64,
    /// Drop observations quoted in a different currency than `currency`
    pub require_same_currency: bool,
    pub currency: Option<String>,
}

impl Default for OverlapOptions {
    fn default() -> Self {
        Self {
            equality_tolerance_pct: DEFAULT_EQUALITY_TOLERANCE_PCT,
            require_same_currency: false,
            currency: None,
        }
    }
}

impl OverlapOptions {
    pub fn with_tolerance(mut self, tolerance_pct: f64) -> Self {
        self.equality_tolerance_pct = tolerance_pct;
        self
    }

    /// Only keep observations quoted in `currency` (or with no currency at all)
    pub fn with_currency(mut self, currency: &str) -> Self {
        self.require_same_currency = true;
        self.currency = Some(currency.to_string());
        self
    }

    /// Currency filter. Items without a currency always pass.
    pub fn accepts_currency(&self, item: &OverlapItem) -> bool {
        if !self.require_same_currency {
            return true;
        }
        match (&self.currency, &item.currency) {
            (Some(wanted), Some(quoted)) => wanted == quoted,
            _ => true,
        }
    }
}

/// Summarize the valid observations in `overlaps`.
///
/// Never fails: an empty input, or one where nothing survives the currency
/// and price checks, yields a summary with `n == 0` and every statistic
/// `None`.
pub fn compute_overlap_summary(
    overlaps: &[OverlapItem],
    options: &OverlapOptions,
) -> OverlapSummary {
    if overlaps.is_empty() {
        return OverlapSummary::empty();
    }
    let deltas = collect_deltas(overlaps.iter(), options);
    summarize_deltas(deltas, overlaps.len(), options.equality_tolerance_pct)
}

/// One summary per SKU. Items without a SKU are grouped under `""`.
pub fn summarize_by_sku(
    overlaps: &[OverlapItem],
    options: &OverlapOptions,
) -> BTreeMap<String, OverlapSummary> {
    let mut groups: BTreeMap<&str, Vec<&OverlapItem>> = BTreeMap::new();
    for item in overlaps {
        groups
            .entry(item.sku.as_deref().unwrap_or(""))
            .or_default()
            .push(item);
    }

    let summarize_group = |(sku, items): (&str, Vec<&OverlapItem>)| {
        let total = items.len();
        let deltas = collect_deltas(items.into_iter(), options);
        (
            sku.to_string(),
            summarize_deltas(deltas, total, options.equality_tolerance_pct),
        )
    };

    #[cfg(feature = "parallel")]
    {
        groups.into_par_iter().map(summarize_group).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        groups.into_iter().map(summarize_group).collect()
    }
}

fn collect_deltas<'a, I>(items: I, options: &OverlapOptions) -> Vec<f64>
where
    I: Iterator<Item = &'a OverlapItem>,
{
    items
        .filter(|item| options.accepts_currency(item))
        .filter_map(OverlapItem::delta_pct)
        .collect()
}

fn summarize_deltas(mut deltas: Vec<f64>, total: usize, tolerance_pct: f64) -> OverlapSummary {
    let n = deltas.len();
    if n < total {
        debug!(total, valid = n, excluded = total - n, "excluded price observations");
    }
    if n == 0 {
        return OverlapSummary::empty();
    }

    sort_ascending(&mut deltas);

    let (mut cheaper, mut equal, mut overpriced) = (0usize, 0usize, 0usize);
    for &delta in &deltas {
        match PricePosition::classify(delta, tolerance_pct) {
            PricePosition::Cheaper => cheaper += 1,
            PricePosition::Equal => equal += 1,
            PricePosition::Overpriced => overpriced += 1,
        }
    }
    let share = |count: usize| Some(count as f64 / n as f64 * 100.0);

    OverlapSummary {
        n,
        median_delta_pct: median_sorted(&deltas),
        cheaper_pct: share(cheaper),
        equal_pct: share(equal),
        overpriced_pct: share(overpriced),
        p25: percentile_sorted(&deltas, 25.0),
        p75: percentile_sorted(&deltas, 75.0),
        min: deltas.first().copied(),
        max: deltas.last().copied(),
    }
}
