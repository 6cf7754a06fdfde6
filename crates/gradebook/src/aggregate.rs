//! Weighted averages over a subject's marks.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::ledger::MarkRecord;

/// Round to 2 decimal places, ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Cosmetic colour of a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Green,
    Yellow,
    Red,
    Gray,
}

/// Grade tier of a rounded average
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    One,
    Two,
    Three,
    Four,
    Five,
}

/// Upper (exclusive) bound of each tier, in ascending order
const TIER_BOUNDS: &[(f64, Tier)] = &[
    (1.5, Tier::One),
    (2.5, Tier::Two),
    (3.5, Tier::Three),
    (4.5, Tier::Four),
    (f64::INFINITY, Tier::Five),
];

impl Tier {
    /// All tiers, lowest first
    pub const ALL: [Tier; 5] = [Tier::One, Tier::Two, Tier::Three, Tier::Four, Tier::Five];

    /// Tier of a score
    pub fn classify(score: f64) -> Tier {
        TIER_BOUNDS
            .iter()
            .find(|(bound, _)| score < *bound)
            .map_or(Tier::Five, |(_, tier)| *tier)
    }

    /// Integer grade of the tier, 1 to 5
    pub fn band(self) -> u8 {
        match self {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
            Tier::Four => 4,
            Tier::Five => 5,
        }
    }

    /// Console color class of the tier
    pub fn severity(self) -> Severity {
        match self {
            Tier::Five => Severity::Green,
            Tier::Four => Severity::Yellow,
            Tier::Three | Tier::Two => Severity::Red,
            Tier::One => Severity::Gray,
        }
    }
}

/// Weighted final average of a non-empty mark list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalAverage {
    /// Weighted mean rounded to 2 decimals
    pub score: f64,
    /// Score rounded to an integer grade, clamped to 1..=5
    pub band: u8,
    /// Tier the band falls in
    pub tier: Tier,
    /// Number of marks averaged
    pub count: usize,
}

/// Final average, or the absence of marks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageOutcome {
    /// Subject has no marks
    NoMarks,
    /// Average of at least one mark
    Average(FinalAverage),
}

impl AverageOutcome {
    /// The average, if there were any marks
    pub fn average(&self) -> Option<&FinalAverage> {
        match self {
            AverageOutcome::NoMarks => None,
            AverageOutcome::Average(avg) => Some(avg),
        }
    }
}

/// Running average at a date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragePoint {
    /// Date of the marks behind the point
    pub date: NaiveDate,
    /// Running average on that date
    pub value: f64,
}

/// Unrounded `sum(value * weight) / sum(weight)`, `None` for no marks
pub fn weighted_average<'a, I>(records: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a MarkRecord>,
{
    let (total, weights) = records
        .into_iter()
        .fold((0.0, 0.0), |(total, weights), r| {
            (total + f64::from(r.value) * r.weight, weights + r.weight)
        });
    (weights > 0.0).then(|| total / weights)
}

/// Final average of a subject's marks
pub fn final_average(records: &[MarkRecord]) -> AverageOutcome {
    let Some(mean) = weighted_average(records) else {
        return AverageOutcome::NoMarks;
    };

    let score = round2(mean);
    let band = score.round_ties_even().clamp(1.0, 5.0) as u8;
    AverageOutcome::Average(FinalAverage {
        score,
        band,
        tier: Tier::classify(f64::from(band)),
        count: records.len(),
    })
}

/// Average of the first `i` marks for every `i`, each rounded to 2 decimals
pub fn running_averages(records: &[MarkRecord]) -> Vec<AveragePoint> {
    let mut total = 0.0;
    let mut weights = 0.0;
    records
        .iter()
        .map(|r| {
            total += f64::from(r.value) * r.weight;
            weights += r.weight;
            AveragePoint {
                date: r.date,
                value: round2(total / weights),
            }
        })
        .collect()
}

/// Running averages with one point per distinct date, in order of first
/// appearance. A date's point is the plain mean of its running averages.
pub fn running_average_series(records: &[MarkRecord]) -> Vec<AveragePoint> {
    collapse_by_date(&running_averages(records))
}

fn collapse_by_date(points: &[AveragePoint]) -> Vec<AveragePoint> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut sums: Vec<(NaiveDate, f64, usize)> = Vec::new();

    for point in points {
        match index.get(&point.date) {
            Some(&slot) => {
                sums[slot].1 += point.value;
                sums[slot].2 += 1;
            }
            None => {
                index.insert(point.date, sums.len());
                sums.push((point.date, point.value, 1));
            }
        }
    }

    sums.into_iter()
        .map(|(date, sum, n)| AveragePoint {
            date,
            value: sum / n as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 9, d).unwrap()
    }

    fn quiz(d: u32, value: u8) -> MarkRecord {
        MarkRecord::new(day(d), value, "Тест", 1.0)
    }

    fn point(d: u32, value: f64) -> AveragePoint {
        AveragePoint { date: day(d), value }
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(4.125), 4.12);
        assert_eq!(round2(4.375), 4.38);
        assert_eq!(round2(3.0), 3.0);
        assert_eq!(round2(2.666_666), 2.67);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::classify(1.0), Tier::One);
        assert_eq!(Tier::classify(1.49), Tier::One);
        assert_eq!(Tier::classify(1.5), Tier::Two);
        assert_eq!(Tier::classify(3.49), Tier::Three);
        assert_eq!(Tier::classify(4.5), Tier::Five);
        assert_eq!(Tier::classify(5.0), Tier::Five);
        for tier in Tier::ALL {
            assert_eq!(Tier::classify(f64::from(tier.band())), tier);
        }
    }

    #[test]
    fn test_severity() {
        assert_eq!(Tier::Five.severity(), Severity::Green);
        assert_eq!(Tier::Four.severity(), Severity::Yellow);
        assert_eq!(Tier::Three.severity(), Severity::Red);
        assert_eq!(Tier::Two.severity(), Severity::Red);
        assert_eq!(Tier::One.severity(), Severity::Gray);
    }

    #[test]
    fn test_final_average_example() {
        let marks = [quiz(1, 5), quiz(1, 4), quiz(2, 3)];
        let avg = *final_average(&marks).average().unwrap();
        assert_relative_eq!(avg.score, 4.0);
        assert_eq!(avg.band, 4);
        assert_eq!(avg.tier, Tier::Four);
        assert_eq!(avg.count, 3);
    }

    #[test]
    fn test_final_average_no_marks() {
        assert_eq!(final_average(&[]), AverageOutcome::NoMarks);
        assert_eq!(weighted_average(&Vec::<MarkRecord>::new()), None);
    }

    #[test]
    fn test_final_average_weighted_and_banded() {
        let marks = [
            MarkRecord::new(day(1), 5, "Контрольная работа", 1.5),
            MarkRecord::new(day(2), 4, "Тест", 1.0),
            MarkRecord::new(day(3), 3, "Тест", 1.0),
        ];
        // (7.5 + 4 + 3) / 3.5
        let avg = *final_average(&marks).average().unwrap();
        assert_relative_eq!(avg.score, 4.14);
        assert_eq!(avg.band, 4);

        // 2.5 rounds to the even band
        let avg = *final_average(&[quiz(1, 2), quiz(2, 3)])
            .average()
            .unwrap();
        assert_relative_eq!(avg.score, 2.5);
        assert_eq!(avg.band, 2);
        assert_eq!(avg.tier, Tier::Two);
    }

    #[test]
    fn test_final_average_ignores_order() {
        let marks = vec![
            MarkRecord::new(day(1), 2, "Диктант", 1.5),
            quiz(2, 5),
            MarkRecord::new(day(3), 4, "Проект", 1.2),
            quiz(4, 3),
        ];
        let mut reversed = marks.clone();
        reversed.reverse();
        let mut rotated = marks.clone();
        rotated.rotate_left(1);

        let expected = final_average(&marks);
        assert_eq!(final_average(&reversed), expected);
        assert_eq!(final_average(&rotated), expected);
    }

    #[test]
    fn test_running_series_depends_on_order() {
        let marks = vec![quiz(1, 5), quiz(2, 3)];
        let reversed = vec![quiz(1, 3), quiz(2, 5)];

        assert_eq!(
            running_average_series(&marks),
            vec![point(1, 5.0), point(2, 4.0)]
        );
        assert_eq!(
            running_average_series(&reversed),
            vec![point(1, 3.0), point(2, 4.0)]
        );
    }

    #[test]
    fn test_running_averages_are_rounded() {
        let marks = [quiz(1, 5), quiz(2, 4), quiz(3, 4)];
        let values: Vec<f64> = running_averages(&marks).iter().map(|p| p.value).collect();
        assert_eq!(values, vec![5.0, 4.5, 4.33]);
    }

    #[test]
    fn test_same_day_collapse() {
        let points = [point(1, 4.0), point(1, 4.5), point(2, 4.2)];
        let collapsed = collapse_by_date(&points);
        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed[0].date, day(1));
        assert_relative_eq!(collapsed[0].value, 4.25);
        assert_eq!(collapsed[1].date, day(2));
        assert_relative_eq!(collapsed[1].value, 4.2);
    }

    #[test]
    fn test_collapse_keeps_first_appearance_order() {
        let points = [point(5, 3.0), point(2, 4.0), point(5, 5.0)];
        let collapsed = collapse_by_date(&points);
        assert_eq!(collapsed, vec![point(5, 4.0), point(2, 4.0)]);
    }

    #[test]
    fn test_running_series_empty() {
        assert!(running_average_series(&[]).is_empty());
    }
}
