//! Drawing running averages with plotters

use std::path::Path;

use gradebook::ChartSeries;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::axis::{date_labels, ChartSize, ValueAxis};
use crate::error::{ChartError, ChartResult};

/// File the chart is written to unless told otherwise
pub const DEFAULT_OUTPUT: &str = "graph.svg";

/// Title of the chart for a subject
pub fn chart_title(subject: &str) -> String {
    format!("График изменения среднего балла по предмету {}", subject)
}

/// Write the series as an SVG line chart, replacing any existing file
pub fn render_series(series: &ChartSeries, path: impl AsRef<Path>) -> ChartResult<()> {
    let count = series.points.len();
    if count < 2 {
        return Err(ChartError::TooFewPoints(count));
    }

    let path = path.as_ref();
    let size = ChartSize::for_dates(count);
    log::debug!(
        "drawing {} points for {:?} at {}x{}",
        count,
        series.subject,
        size.width,
        size.height
    );

    let root = SVGBackend::new(path, (size.width, size.height)).into_drawing_area();
    draw_series(&root, series).map_err(|e| ChartError::Draw(e.to_string()))?;
    root.present().map_err(|e| ChartError::Draw(e.to_string()))?;

    log::info!("chart written to {}", path.display());
    Ok(())
}

fn draw_series<DB>(
    area: &DrawingArea<DB, Shift>,
    series: &ChartSeries,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();
    let labels = date_labels(series.points.iter().map(|p| p.date));
    let axis = ValueAxis::for_values(&values);
    let last = labels.len() as i32;

    area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(area)
        .caption(
            chart_title(&series.subject),
            FontDesc::new(FontFamily::SansSerif, 20.0, FontStyle::Normal),
        )
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(-1..last, axis.minimum..axis.maximum)?;

    let x_label = |x: &i32| {
        usize::try_from(*x)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len() + 2)
        .x_label_formatter(&x_label)
        .y_label_formatter(&|v| format!("{:.1}", v))
        .label_style(FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Normal))
        .draw()?;

    for level in axis.reference_lines() {
        chart.draw_series(DashedLineSeries::new(
            [(-1, level), (last, level)],
            6,
            4,
            BLACK.mix(0.4).stroke_width(1),
        ))?;
    }

    let points = || (0..).zip(values.iter().copied());
    chart.draw_series(LineSeries::new(points(), RED.stroke_width(2)))?;
    chart.draw_series(points().map(|p| Circle::new(p, 4, RED.filled())))?;

    Ok(())
}
