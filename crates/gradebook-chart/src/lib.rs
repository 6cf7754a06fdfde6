//! # gradebook-chart
//!
//! Renders the running average of a subject as an SVG line chart: one point
//! per date, dashed guides where the average would round to the next grade.

mod axis;
mod error;
mod render;

pub use axis::{date_labels, ChartSize, ValueAxis, TIER_MIDPOINTS};
pub use error::{ChartError, ChartResult};
pub use render::{chart_title, render_series, DEFAULT_OUTPUT};
