//! Price observation and summary shapes
//!
//! These serialize camelCase so they round-trip with the dashboard's JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One same-product price observation: our price against one competitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapItem {
    /// Product identifier, used only for grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default = "missing_price", deserialize_with = "lenient_price")]
    pub my_price: f64,
    #[serde(default = "missing_price", deserialize_with = "lenient_price")]
    pub competitor_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl OverlapItem {
    pub fn new(my_price: f64, competitor_price: f64) -> Self {
        Self {
            sku: None,
            my_price,
            competitor_price,
            currency: None,
            in_stock: None,
            last_seen_at: None,
        }
    }

    pub fn with_sku(mut self, sku: &str) -> Self {
        self.sku = Some(sku.to_string());
        self
    }

    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = Some(currency.to_string());
        self
    }

    /// Both prices are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        is_valid_price(self.my_price) && is_valid_price(self.competitor_price)
    }

    /// Signed relative price in percent; negative means we are cheaper.
    ///
    /// `None` when either price is missing, non-finite or not positive.
    pub fn delta_pct(&self) -> Option<f64> {
        if !self.is_valid() {
            return None;
        }
        Some((self.my_price - self.competitor_price) / self.competitor_price * 100.0)
    }
}

/// A price counts only when it is finite and strictly positive
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Where our price sits relative to a competitor's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricePosition {
    Cheaper,
    Equal,
    Overpriced,
}

impl PricePosition {
    /// Bucket a delta using a symmetric tolerance band around zero
    pub fn classify(delta_pct: f64, tolerance_pct: f64) -> Self {
        if delta_pct < -tolerance_pct {
            PricePosition::Cheaper
        } else if delta_pct.abs() <= tolerance_pct {
            PricePosition::Equal
        } else {
            PricePosition::Overpriced
        }
    }
}

/// Distribution of price deltas over the valid observations
///
/// Every optional field is `None` exactly when `n == 0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapSummary {
    pub n: usize,
    pub median_delta_pct: Option<f64>,
    pub cheaper_pct: Option<f64>,
    pub equal_pct: Option<f64>,
    pub overpriced_pct: Option<f64>,
    pub p25: Option<f64>,
    pub p75: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl OverlapSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

fn missing_price() -> f64 {
    f64::NAN
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Accept numbers, numeric strings and nulls; anything else becomes NaN
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawPrice>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawPrice::Number(n)) => n,
        Some(RawPrice::Text(s)) => s.trim().parse().unwrap_or(f64::NAN),
        Some(RawPrice::Other(_)) | None => f64::NAN,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// RFC 3339 timestamps; unparsable values are dropped rather than failing the record
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTimestamp::Text(s)) => parse_timestamp(&s),
        Some(RawTimestamp::Other(_)) | None => None,
    })
}

pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
