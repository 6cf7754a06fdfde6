//! A parsed grade report and the figures derived from it.

use gradebook_core::SheetAccessor;

use crate::aggregate::{
    final_average, round2, running_average_series, weighted_average, AverageOutcome,
    AveragePoint, Tier,
};
use crate::dates::SchoolYear;
use crate::error::{GradebookError, Result};
use crate::info::{extract_info, HeaderInfo};
use crate::layout::SheetLayout;
use crate::ledger::{MarkLedger, MarkLedgerBuilder, MarkRecord};
use crate::period::MarkPolicy;
use crate::subjects::{extract_subjects, SubjectCatalog};
use crate::weights::WorkTypeWeights;

/// Header, subjects and marks of one report sheet
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    header: HeaderInfo,
    catalog: SubjectCatalog,
    ledger: MarkLedger,
    policy: MarkPolicy,
}

impl GradeReport {
    /// Extract everything from a sheet. Fails on the first malformed mark.
    pub fn from_sheet<S: SheetAccessor + ?Sized>(
        sheet: &S,
        layout: &SheetLayout,
        weights: &WorkTypeWeights,
        school_year: SchoolYear,
    ) -> Result<Self> {
        let header = extract_info(sheet, layout);
        let catalog = extract_subjects(sheet, layout.subjects_start);
        let ledger = MarkLedgerBuilder::new(&catalog, weights)
            .with_layout(layout)
            .with_school_year(school_year)
            .build(sheet)?;

        Ok(Self::from_parts(header, catalog, ledger))
    }

    /// Assemble a report from already extracted parts. The mark policy
    /// follows the header's period.
    pub fn from_parts(header: HeaderInfo, catalog: SubjectCatalog, ledger: MarkLedger) -> Self {
        let policy = MarkPolicy::for_period(header.period());
        log::debug!(
            "period {:?} expects at least {} marks per subject",
            header.period(),
            policy.minimum()
        );
        Self {
            header,
            catalog,
            ledger,
            policy,
        }
    }

    pub fn header(&self) -> &HeaderInfo {
        &self.header
    }

    pub fn catalog(&self) -> &SubjectCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &MarkLedger {
        &self.ledger
    }

    pub fn policy(&self) -> MarkPolicy {
        self.policy
    }

    fn marks_of(&self, subject: &str) -> Result<&[MarkRecord]> {
        self.catalog
            .ordinal_of(subject)
            .and_then(|ordinal| self.ledger.marks(ordinal))
            .ok_or_else(|| GradebookError::UnknownSubject(subject.to_string()))
    }

    /// Final average of the first subject with this name
    pub fn final_average(&self, subject: &str) -> Result<AverageOutcome> {
        self.marks_of(subject).map(final_average)
    }

    /// Date-collapsed running averages of the first subject with this name
    pub fn running_average_series(&self, subject: &str) -> Result<Vec<AveragePoint>> {
        self.marks_of(subject).map(running_average_series)
    }

    /// Series to chart for a subject; needs at least two distinct dates
    pub fn chart_series(&self, subject: &str) -> Result<ChartSeries> {
        let points = self.running_average_series(subject)?;
        if points.len() < 2 {
            return Err(GradebookError::InsufficientData {
                subject: subject.to_string(),
                points: points.len(),
            });
        }
        Ok(ChartSeries {
            subject: subject.to_string(),
            points,
        })
    }

    /// Per-subject results, overall average and tier tally
    pub fn summary(&self) -> ReportSummary {
        let subjects: Vec<SubjectSummary> = self
            .ledger
            .iter()
            .map(|entry| SubjectSummary {
                ordinal: entry.ordinal,
                subject: entry.subject.clone(),
                mark_count: entry.marks.len(),
                outcome: final_average(&entry.marks),
                shortfall: self.policy.shortfall(entry.marks.len()),
            })
            .collect();

        let overall = weighted_average(self.ledger.all_marks()).map(round2);
        let tally = TierTally::from_summaries(&subjects);

        ReportSummary {
            subjects,
            overall,
            tally,
        }
    }
}

/// Outcome for one catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectSummary {
    pub ordinal: usize,
    pub subject: String,
    pub mark_count: usize,
    pub outcome: AverageOutcome,
    /// Marks missing to meet the period's minimum
    pub shortfall: Option<usize>,
}

impl SubjectSummary {
    /// Tier of a subject with an average and enough marks
    pub fn counted_tier(&self) -> Option<Tier> {
        match (&self.outcome, self.shortfall) {
            (AverageOutcome::Average(avg), None) => Some(avg.tier),
            _ => None,
        }
    }
}

/// Number of subjects per tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierTally {
    counts: [usize; 5],
    short: usize,
}

impl TierTally {
    fn from_summaries(subjects: &[SubjectSummary]) -> Self {
        let mut tally = Self::default();
        for summary in subjects {
            match summary.counted_tier() {
                Some(tier) => tally.counts[usize::from(tier.band() - 1)] += 1,
                None => tally.short += 1,
            }
        }
        tally
    }

    /// Subjects whose average falls in `tier`
    pub fn count(&self, tier: Tier) -> usize {
        self.counts[usize::from(tier.band() - 1)]
    }

    /// Subjects without an average or short of marks
    pub fn short(&self) -> usize {
        self.short
    }
}

/// Everything printed for a report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub subjects: Vec<SubjectSummary>,
    /// Weighted average over every mark, rounded to 2 decimals
    pub overall: Option<f64>,
    pub tally: TierTally,
}

/// Collapsed running averages ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub subject: String,
    pub points: Vec<AveragePoint>,
}
