//! Axis ranges and chart size

use chrono::NaiveDate;

/// Scores halfway between two grades
pub const TIER_MIDPOINTS: [f64; 4] = [1.5, 2.5, 3.5, 4.5];

const PADDING: f64 = 0.07;
const REACH: f64 = 0.9;
const LOWEST_GRADE_SHOWN: f64 = 2.0;
const HIGHEST_GRADE: f64 = 5.0;

/// Vertical axis of average scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAxis {
    pub minimum: f64,
    pub maximum: f64,
}

impl ValueAxis {
    /// Range for a series of averages.
    ///
    /// Spans whole grades around the data, from no lower than 2 up to no
    /// higher than 5, with a small margin. A value outside that window
    /// stretches the range to include it.
    pub fn for_values(values: &[f64]) -> Self {
        let lowest = values.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !lowest.is_finite() || !highest.is_finite() {
            return Self {
                minimum: LOWEST_GRADE_SHOWN - PADDING,
                maximum: HIGHEST_GRADE + PADDING,
            };
        }

        let mut minimum = (lowest - REACH).ceil().max(LOWEST_GRADE_SHOWN) - PADDING;
        let mut maximum = (highest + REACH).floor().min(HIGHEST_GRADE) + PADDING;
        if lowest < minimum {
            minimum = lowest - PADDING;
        }
        if highest > maximum {
            maximum = highest + PADDING;
        }
        Self { minimum, maximum }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.minimum..=self.maximum).contains(&value)
    }

    /// Tier midpoints that fall inside the range
    pub fn reference_lines(&self) -> impl Iterator<Item = f64> + '_ {
        TIER_MIDPOINTS.into_iter().filter(|v| self.contains(*v))
    }
}

/// Tick labels of the date axis, `dd.mm`
pub fn date_labels(dates: impl IntoIterator<Item = NaiveDate>) -> Vec<String> {
    dates
        .into_iter()
        .map(|d| d.format("%d.%m").to_string())
        .collect()
}

/// Image size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl ChartSize {
    const BASE_WIDTH: u32 = 640;
    const WIDTH_PER_DATE: u32 = 48;
    const MAX_WIDTH: u32 = 4096;
    const HEIGHT: u32 = 480;

    /// Size that leaves room for `dates` labels
    pub fn for_dates(dates: usize) -> Self {
        let extra = u32::try_from(dates)
            .unwrap_or(u32::MAX)
            .saturating_mul(Self::WIDTH_PER_DATE);
        Self {
            width: Self::BASE_WIDTH.saturating_add(extra).min(Self::MAX_WIDTH),
            height: Self::HEIGHT,
        }
    }
}
