//! Chart errors

use thiserror::Error;

/// Result type alias using [`ChartError`]
pub type ChartResult<T> = std::result::Result<T, ChartError>;

/// Errors raised while rendering a chart
#[derive(Debug, Error)]
pub enum ChartError {
    /// A line needs at least two points
    #[error("Need at least 2 points to draw a chart, got {0}")]
    TooFewPoints(usize),

    /// Drawing or writing the image failed
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}
