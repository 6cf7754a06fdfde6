//! Minimum number of marks a reporting period expects per subject.

/// Mark-count requirement derived from the header's period field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkPolicy {
    minimum: usize,
}

impl MarkPolicy {
    /// Policy for a period label.
    ///
    /// A quarter ("1 четверть") needs 3 marks, a half-year ("2 полугодие")
    /// 6, the full year ("Год") 12. Anything else, or no period at all,
    /// needs none.
    pub fn for_period(period: Option<&str>) -> Self {
        let minimum = match period {
            Some(p) if p.contains("четверть") => 3,
            Some(p) if p.contains("полугодие") => 6,
            Some("Год") => 12,
            _ => 0,
        };
        Self { minimum }
    }

    /// Marks a subject needs in this period
    pub fn minimum(&self) -> usize {
        self.minimum
    }

    /// Marks still missing for `count` marks, `None` when there are enough
    pub fn shortfall(&self, count: usize) -> Option<usize> {
        (count < self.minimum).then(|| self.minimum - count)
    }
}
