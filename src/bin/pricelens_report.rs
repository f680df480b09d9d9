//! Pricing report CLI
//!
//! Summarizes exported competitor observations and previews stacked chart
//! scales from the command line.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use pricelens::chart::{ScalingStrategy, StackedBarLayout};
use pricelens::loader::{load_overlaps, load_stacked_rows};
use pricelens::report::{OverlapOverrides, ScaleOverrides, build_scale_report};
use pricelens::{OverlapSummary, PricelensConfig, compute_overlap_summary, summarize_by_sku};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "pricelens-report",
    version,
    about = "Competitor price statistics and chart scaling"
)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "PRICELENS_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarize our prices against competitor prices
    Overlap {
        /// Observations file (.csv or .json)
        #[arg(long)]
        input: PathBuf,
        /// Only count observations in this currency
        #[arg(long)]
        currency: Option<String>,
        /// Equal-price band in percentage points
        #[arg(long)]
        tolerance: Option<f64>,
        /// One summary per SKU
        #[arg(long)]
        by_sku: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Compute a stacked bar scale and segment heights
    Scale {
        /// Chart rows (.json array of objects)
        #[arg(long)]
        input: PathBuf,
        /// Series keys to stack, comma separated
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
        /// Field holding the bar label
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        strategy: Option<ScalingStrategy>,
        #[arg(long)]
        max_value: Option<f64>,
        #[arg(long)]
        padding: Option<f64>,
        #[arg(long)]
        min_scale: Option<f64>,
        /// Number of value axis intervals
        #[arg(long)]
        ticks: Option<usize>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    pricelens::init_logging(cli.json_logs);

    let config = PricelensConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Overlap {
            input,
            currency,
            tolerance,
            by_sku,
            format,
        } => {
            let options = OverlapOverrides {
                currency,
                tolerance,
            }
            .apply(config.overlap);

            let items = load_overlaps(&input)
                .with_context(|| format!("reading observations from {}", input.display()))?;

            let summaries = if by_sku {
                summarize_by_sku(&items, &options)
            } else {
                BTreeMap::from([("all".to_string(), compute_overlap_summary(&items, &options))])
            };
            info!(groups = summaries.len(), "computed overlap summaries");

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
                OutputFormat::Table => println!("{}", overlap_table(&summaries)),
            }
        }
        Command::Scale {
            input,
            keys,
            label,
            strategy,
            max_value,
            padding,
            min_scale,
            ticks,
            format,
        } => {
            let overrides = ScaleOverrides {
                keys,
                strategy,
                max_value,
                padding,
                min_scale,
                tick_count: ticks,
            };
            let options = overrides.apply(config.scaling);
            let keys = overrides.value_keys(&config.value_keys);
            if keys.is_empty() {
                bail!("no series keys given; pass --keys or set value_keys in the configuration");
            }

            let rows = load_stacked_rows(&input)
                .with_context(|| format!("reading chart rows from {}", input.display()))?;
            let report = build_scale_report(
                &rows,
                label.as_deref(),
                &keys,
                &options,
                &overrides.chart_layout(),
            )?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Table => {
                    println!("Scale maximum: {:.2}", report.layout.max_value);
                    let ticks: Vec<String> =
                        report.ticks.iter().map(|t| format!("{:.1}", t)).collect();
                    println!("Axis ticks: {}", ticks.join(", "));
                    println!("{}", segment_table(&report.layout, &keys));
                }
            }
        }
    }

    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn overlap_table(summaries: &BTreeMap<String, OverlapSummary>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Group", "N", "Median Δ%", "P25", "P75", "Min", "Max", "Cheaper%", "Equal%", "Over%",
    ]);

    for (group, s) in summaries {
        let label = if group.is_empty() { "(no sku)" } else { group.as_str() };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(s.n),
            Cell::new(fmt_opt(s.median_delta_pct)),
            Cell::new(fmt_opt(s.p25)),
            Cell::new(fmt_opt(s.p75)),
            Cell::new(fmt_opt(s.min)),
            Cell::new(fmt_opt(s.max)),
            Cell::new(fmt_opt(s.cheaper_pct)),
            Cell::new(fmt_opt(s.equal_pct)),
            Cell::new(fmt_opt(s.overpriced_pct)),
        ]);
    }
    table
}

fn segment_table(layout: &StackedBarLayout, keys: &[String]) -> Table {
    let mut table = Table::new();
    let mut header = vec!["Bar".to_string(), "Total".to_string()];
    header.extend(keys.iter().map(|k| format!("{} h%", k)));
    header.push("Top%".to_string());
    table.load_preset(UTF8_FULL).set_header(header);

    for (i, bar) in layout.bars.iter().enumerate() {
        let mut row = vec![
            bar.label.clone().unwrap_or_else(|| format!("#{}", i + 1)),
            format!("{:.2}", bar.total),
        ];
        row.extend(bar.segments.iter().map(|s| format!("{:.2}", s.height_pct)));
        row.push(format!("{:.2}", bar.top_pct()));
        table.add_row(row);
    }
    table
}
