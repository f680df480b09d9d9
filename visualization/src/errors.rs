//! Error types for chart scaling and layout

use thiserror::Error;

/// Result type alias for visualization operations
pub type Result<T> = std::result::Result<T, VisualizationError>;

/// Errors that can occur while scaling or laying out charts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisualizationError {
    #[error("Cannot calculate a chart scale from empty data")]
    EmptyData,

    #[error("Cannot calculate a stacked total without value keys")]
    EmptyValueKeys,

    #[error("Invalid data format: {message}")]
    InvalidData { message: String },

    #[error("Layout calculation error: {message}")]
    LayoutError { message: String },
}
