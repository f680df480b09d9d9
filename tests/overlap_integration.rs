//! End-to-end checks of the overlap summary and chart scaling contracts

use pricelens::chart::{
    ScalingOptions, ScalingStrategy, StackedBarData, StackedBarLayout, VisualizationError,
    calculate_bar_height, calculate_stacked_max_value,
};
use pricelens::loader::{load_overlaps, load_stacked_rows};
use pricelens::{
    OverlapItem, OverlapOptions, OverlapSummary, PricelensConfig, compute_overlap_summary,
    summarize_by_sku,
};
use std::io::Write;

fn monthly_rows() -> Vec<StackedBarData> {
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
fn empty_input_yields_null_summary() {
    let summary = compute_overlap_summary(&[], &OverlapOptions::default());
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(summary, OverlapSummary::empty());
    for field in [
        "medianDeltaPct",
        "cheaperPct",
        "equalPct",
        "overpricedPct",
        "p25",
        "p75",
        "min",
        "max",
    ] {
        assert!(json[field].is_null(), "{} should be null", field);
    }
}

#[test]
fn bucket_percentages_sum_to_hundred() {
    let items: Vec<OverlapItem> = (0..37)
        .map(|i| OverlapItem::new(80.0 + (i as f64 * 1.7) % 40.0, 100.0))
        .chain([OverlapItem::new(f64::NAN, 1.0), OverlapItem::new(1.0, 0.0)])
        .collect();
    let summary = compute_overlap_summary(&items, &OverlapOptions::default());

    assert_eq!(summary.n, 37);
    let total = summary.cheaper_pct.unwrap()
        + summary.equal_pct.unwrap()
        + summary.overpriced_pct.unwrap();
    assert!((total - 100.0).abs() < 1e-9);
    assert!(summary.min <= summary.p25);
    assert!(summary.p25 <= summary.median_delta_pct);
    assert!(summary.median_delta_pct <= summary.p75);
    assert!(summary.p75 <= summary.max);
}

#[test]
fn equality_tolerance_boundary() {
    let options = OverlapOptions::default();
    let equal = compute_overlap_summary(&[OverlapItem::new(100.4, 100.0)], &options);
    let over = compute_overlap_summary(&[OverlapItem::new(100.6, 100.0)], &options);

    assert_eq!(equal.equal_pct, Some(100.0));
    assert_eq!(over.overpriced_pct, Some(100.0));
}

#[test]
fn stacked_max_uses_totals_not_segments() {
    let options = ScalingOptions::dynamic().with_padding(1.0);
    let max = calculate_stacked_max_value(&monthly_rows(), &["a", "b", "c"], &options).unwrap();
    assert_eq!(max, 350.0);
}

#[test]
fn hybrid_scale_and_heights_never_overflow() {
    let options = ScalingOptions::hybrid(200.0);
    let layout =
        StackedBarLayout::new(&monthly_rows(), Some("month"), &["a", "b", "c"], &options).unwrap();

    assert!((layout.max_value - 385.0).abs() < 1e-9);
    for bar in &layout.bars {
        assert!(bar.top_pct() < 100.0);
    }
    assert_eq!(calculate_bar_height(500.0, 350.0), 100.0);
    assert_eq!(calculate_bar_height(-10.0, 350.0), 0.0);
    assert_eq!(calculate_bar_height(10.0, 0.0), 0.0);
}

#[test]
fn scaling_preconditions_are_errors() {
    let no_keys: [&str; 0] = [];
    assert_eq!(
        calculate_stacked_max_value(&[], &["a"], &ScalingOptions::default()),
        Err(VisualizationError::EmptyData)
    );
    assert_eq!(
        calculate_stacked_max_value(
            &[StackedBarData::new().with_number("a", 1.0)],
            &no_keys,
            &ScalingOptions::default()
        ),
        Err(VisualizationError::EmptyValueKeys)
    );
}

#[test]
fn csv_file_round_trip_through_summary() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "sku,my_price,competitor_price,currency").unwrap();
    writeln!(file, "A,90,100,EUR").unwrap();
    writeln!(file, "A,110,100,EUR").unwrap();
    writeln!(file, "B,100,100,USD").unwrap();
    writeln!(file, "B,,100,USD").unwrap();
    file.flush().unwrap();

    let items = load_overlaps(file.path()).unwrap();
    assert_eq!(items.len(), 4);

    let by_sku = summarize_by_sku(&items, &OverlapOptions::default());
    assert_eq!(by_sku["A"].n, 2);
    assert_eq!(by_sku["A"].median_delta_pct, Some(0.0));
    assert_eq!(by_sku["B"].n, 1);

    let eur = compute_overlap_summary(&items, &OverlapOptions::default().with_currency("EUR"));
    assert_eq!(eur.n, 2);
}

#[test]
fn json_files_load() {
    let mut overlaps = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        overlaps,
        r#"[{{"myPrice": 95, "competitorPrice": 100, "inStock": true}},
            {{"myPrice": "oops", "competitorPrice": 100}}]"#
    )
    .unwrap();
    overlaps.flush().unwrap();

    let items = load_overlaps(overlaps.path()).unwrap();
    let summary = compute_overlap_summary(&items, &OverlapOptions::default());
    assert_eq!(items.len(), 2);
    assert_eq!(summary.n, 1);
    assert_eq!(summary.median_delta_pct, Some(-5.0));

    let mut rows = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(rows, r#"[{{"month": "Jan", "a": 1, "b": 2}}]"#).unwrap();
    rows.flush().unwrap();

    let rows = load_stacked_rows(rows.path()).unwrap();
    assert_eq!(rows[0].stacked_total(&["a", "b"]), 3.0);
}

#[test]
fn config_file_then_env_layering() {
    let mut base = PricelensConfig::default();
    base.overlap = base.overlap.with_currency("EUR").with_tolerance(0.25);
    base.scaling = ScalingOptions::fixed(500.0);
    base.value_keys = vec!["a".to_string(), "b".to_string()];

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(file, "{}", toml::to_string(&base).unwrap()).unwrap();
    file.flush().unwrap();

    let loaded = PricelensConfig::load_with_env(Some(file.path()), Vec::new()).unwrap();
    assert_eq!(loaded, base);

    let env = vec![(
        "PRICELENS__SCALING__STRATEGY".to_string(),
        "hybrid".to_string(),
    )];
    let overridden = PricelensConfig::load_with_env(Some(file.path()), env).unwrap();
    assert_eq!(overridden.scaling.strategy, ScalingStrategy::Hybrid);
    assert_eq!(overridden.scaling.max_value, Some(500.0));
    assert_eq!(overridden.overlap.currency.as_deref(), Some("EUR"));
}
