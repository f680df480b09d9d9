//! Error type for loading, configuration and scaling failures
//!
//! Statistics over dirty price data never produce an error; bad rows are
//! excluded instead. Everything here is an I/O, format or contract failure.

use pricelens_visualization::VisualizationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PricelensError>;

#[derive(Error, Debug)]
pub enum PricelensError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Chart scaling error: {0}")]
    Scaling(#[from] VisualizationError),

    #[error("Unsupported input format: {path}")]
    UnsupportedFormat { path: String },
}
