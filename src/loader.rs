//! Loading price observations and chart rows from exported files
//!
//! The dashboard's data layer exports competitor observations as CSV or
//! JSON. Prices arrive as scraped text, so parsing is lenient: anything
//! that is not a number becomes NaN and drops out at summary time.

use crate::error::{PricelensError, Result};
use crate::types::{OverlapItem, parse_timestamp};
use pricelens_visualization::StackedBarData;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// CSV observation record as exported by the competitor-price table
#[derive(Debug, Clone, Deserialize)]
pub struct CsvOverlapRow {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub my_price: String,
    #[serde(default)]
    pub competitor_price: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub in_stock: Option<String>,
    #[serde(default)]
    pub last_seen_at: Option<String>,
}

impl From<CsvOverlapRow> for OverlapItem {
    fn from(row: CsvOverlapRow) -> Self {
        Self {
            sku: non_blank(row.sku),
            my_price: parse_price(&row.my_price),
            competitor_price: parse_price(&row.competitor_price),
            currency: non_blank(row.currency),
            in_stock: row.in_stock.as_deref().and_then(parse_flag),
            last_seen_at: row.last_seen_at.as_deref().and_then(parse_timestamp),
        }
    }
}

fn parse_price(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

/// Booleans as spreadsheets and Python exports write them
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "True" | "TRUE" | "1" => Some(true),
        "false" | "False" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load observations from a `.csv` or `.json` file
pub fn load_overlaps(path: &Path) -> Result<Vec<OverlapItem>> {
    let items = match extension(path).as_deref() {
        Some("csv") => read_overlaps_csv(fs::File::open(path)?)?,
        Some("json") => serde_json::from_str(&fs::read_to_string(path)?)?,
        _ => {
            return Err(PricelensError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
    };
    info!(path = %path.display(), count = items.len(), "loaded price observations");
    Ok(items)
}

/// Parse CSV observations from any reader.
///
/// Rows that do not fit the header layout are skipped with a warning.
pub fn read_overlaps_csv<R: std::io::Read>(reader: R) -> Result<Vec<OverlapItem>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut items = Vec::new();
    for (index, record) in csv_reader.deserialize::<CsvOverlapRow>().enumerate() {
        match record {
            Ok(row) => items.push(OverlapItem::from(row)),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => warn!(row = index + 1, error = %e, "skipping malformed CSV row"),
        }
    }
    Ok(items)
}

/// Load chart rows from a JSON array of objects
pub fn load_stacked_rows(path: &Path) -> Result<Vec<StackedBarData>> {
    if extension(path).as_deref() != Some("json") {
        return Err(PricelensError::UnsupportedFormat {
            path: path.display().to_string(),
        });
    }
    let rows = parse_stacked_rows(&fs::read_to_string(path)?)?;
    info!(path = %path.display(), count = rows.len(), "loaded chart rows");
    Ok(rows)
}

/// Parse chart rows from JSON text; array entries that are not objects are skipped
pub fn parse_stacked_rows(json: &str) -> Result<Vec<StackedBarData>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(values
        .iter()
        .filter_map(|value| value.as_object())
        .map(StackedBarData::from_json_object)
        .collect())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}
