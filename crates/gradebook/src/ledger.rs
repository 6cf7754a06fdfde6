//! Mark ledger: dated, weighted marks per subject, built from the grid.

use chrono::NaiveDate;
use gradebook_core::{CellAddress, SheetAccessor};

use crate::dates::{parse_date_label, SchoolYear};
use crate::error::{GradebookError, Result};
use crate::layout::SheetLayout;
use crate::subjects::SubjectCatalog;
use crate::weights::WorkTypeWeights;

/// Separator between the annotations of the marks in one cell
const SEGMENT_SEPARATOR: char = ';';

/// Separator between the fields of one annotation
const FIELD_SEPARATOR: &str = " - ";

/// A single mark
#[derive(Debug, Clone, PartialEq)]
pub struct MarkRecord {
    /// Day of the grid column the mark was found in
    pub date: NaiveDate,
    /// Grade, one decimal digit
    pub value: u8,
    /// Work type label from the annotation
    pub work_type: String,
    /// Coefficient of the work type
    pub weight: f64,
}

impl MarkRecord {
    /// Create a mark record
    pub fn new(date: NaiveDate, value: u8, work_type: impl Into<String>, weight: f64) -> Self {
        Self {
            date,
            value,
            work_type: work_type.into(),
            weight,
        }
    }
}

/// Marks of one catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectMarks {
    /// 1-based catalog ordinal
    pub ordinal: usize,
    /// Subject name
    pub subject: String,
    /// Marks in grid order: column by column, top to bottom
    pub marks: Vec<MarkRecord>,
}

/// All marks of a report, one entry per catalog subject (possibly empty)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkLedger {
    subjects: Vec<SubjectMarks>,
}

impl MarkLedger {
    /// Empty ledger with one entry per catalog subject
    pub fn for_catalog(catalog: &SubjectCatalog) -> Self {
        Self {
            subjects: catalog
                .iter()
                .map(|(ordinal, name)| SubjectMarks {
                    ordinal,
                    subject: name.to_string(),
                    marks: Vec::new(),
                })
                .collect(),
        }
    }

    /// Build a ledger from `(subject, marks)` pairs in ordinal order
    pub fn from_subjects<I, S>(subjects: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<MarkRecord>)>,
        S: Into<String>,
    {
        Self {
            subjects: subjects
                .into_iter()
                .enumerate()
                .map(|(idx, (name, marks))| SubjectMarks {
                    ordinal: idx + 1,
                    subject: name.into(),
                    marks,
                })
                .collect(),
        }
    }

    /// Marks of the subject at `ordinal` (1-based)
    pub fn marks(&self, ordinal: usize) -> Option<&[MarkRecord]> {
        ordinal
            .checked_sub(1)
            .and_then(|idx| self.subjects.get(idx))
            .map(|s| s.marks.as_slice())
    }

    /// Marks of the first subject with this name
    pub fn marks_for(&self, subject: &str) -> Option<&[MarkRecord]> {
        self.subjects
            .iter()
            .find(|s| s.subject == subject)
            .map(|s| s.marks.as_slice())
    }

    /// Iterate over subjects in ordinal order
    pub fn iter(&self) -> impl Iterator<Item = &SubjectMarks> {
        self.subjects.iter()
    }

    /// Every mark of every subject
    pub fn all_marks(&self) -> impl Iterator<Item = &MarkRecord> {
        self.subjects.iter().flat_map(|s| s.marks.iter())
    }

    /// Total number of marks
    pub fn total_marks(&self) -> usize {
        self.subjects.iter().map(|s| s.marks.len()).sum()
    }

    /// Number of subjects
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Check if the ledger has no subjects
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    fn push(&mut self, ordinal: usize, mark: MarkRecord) {
        if let Some(entry) = self.subjects.get_mut(ordinal - 1) {
            entry.marks.push(mark);
        }
    }
}

/// Walks the dated grid and turns mark cells into [`MarkRecord`]s.
///
/// Each mark cell pairs its characters with the `;`-separated segments of
/// its comment: the n-th character is described by the n-th segment, which
/// reads `<date> - <work type> - <topic>`. Non-digit characters (absence
/// codes and the like) are dropped along with their segment.
#[derive(Debug, Clone)]
pub struct MarkLedgerBuilder<'a> {
    catalog: &'a SubjectCatalog,
    weights: &'a WorkTypeWeights,
    grid_start: CellAddress,
    terminator: String,
    school_year: SchoolYear,
}

impl<'a> MarkLedgerBuilder<'a> {
    /// Create a builder using the default layout and the current school year
    pub fn new(catalog: &'a SubjectCatalog, weights: &'a WorkTypeWeights) -> Self {
        let layout = SheetLayout::default();
        Self {
            catalog,
            weights,
            grid_start: layout.grid_start,
            terminator: layout.terminator,
            school_year: SchoolYear::current(),
        }
    }

    /// Take the grid position and terminator from a layout
    pub fn with_layout(mut self, layout: &SheetLayout) -> Self {
        self.grid_start = layout.grid_start;
        self.terminator = layout.terminator.clone();
        self
    }

    /// School year used to complete `dd.mm` date labels
    pub fn with_school_year(mut self, school_year: SchoolYear) -> Self {
        self.school_year = school_year;
        self
    }

    /// Build the ledger. Any malformed mark aborts the whole build.
    pub fn build<S: SheetAccessor + ?Sized>(&self, sheet: &S) -> Result<MarkLedger> {
        let mut ledger = MarkLedger::for_catalog(self.catalog);
        let Some(last_col) = sheet.max_col() else {
            return Ok(ledger);
        };

        let date_row = self.grid_start.row;
        for col in self.grid_start.col..=last_col {
            let label = sheet.cell_value(date_row, col);
            if label
                .as_string()
                .map_or(false, |s| s.trim() == self.terminator)
            {
                log::debug!("grid ends at {}", CellAddress::new(date_row, col));
                break;
            }

            let address = CellAddress::new(date_row, col);
            let Some(date) =
                parse_date_label(label, address, sheet.date_system(), self.school_year)?
            else {
                if let Some(mark) = self.first_annotated_mark(sheet, col) {
                    return Err(GradebookError::MissingDate { address, mark });
                }
                log::debug!("column {} has no date, skipped", address);
                continue;
            };

            for (ordinal, _) in self.catalog.iter() {
                let row = date_row + ordinal as u32;
                for mark in self.read_cell(sheet, CellAddress::new(row, col), date)? {
                    ledger.push(ordinal, mark);
                }
            }
        }

        log::debug!(
            "ledger built: {} marks across {} subjects",
            ledger.total_marks(),
            ledger.len()
        );
        Ok(ledger)
    }

    /// First subject cell of `col` holding an annotated digit
    fn first_annotated_mark<S: SheetAccessor + ?Sized>(
        &self,
        sheet: &S,
        col: u16,
    ) -> Option<CellAddress> {
        self.catalog
            .iter()
            .map(|(ordinal, _)| CellAddress::new(self.grid_start.row + ordinal as u32, col))
            .find(|address| {
                let has_digit = sheet
                    .cell_value(address.row, address.col)
                    .display_text()
                    .chars()
                    .any(|c| c.is_ascii_digit());
                let annotated = sheet
                    .cell_annotation(address.row, address.col)
                    .map_or(false, |a| !a.trim().is_empty());
                has_digit && annotated
            })
    }

    fn read_cell<S: SheetAccessor + ?Sized>(
        &self,
        sheet: &S,
        address: CellAddress,
        date: NaiveDate,
    ) -> Result<Vec<MarkRecord>> {
        let value = sheet.cell_value(address.row, address.col);
        if value.is_blank() {
            return Ok(Vec::new());
        }
        let Some(annotation) = sheet
            .cell_annotation(address.row, address.col)
            .filter(|a| !a.trim().is_empty())
        else {
            return Ok(Vec::new());
        };

        let text = value.display_text();
        let characters: Vec<char> = text.chars().collect();
        let segments: Vec<&str> = annotation.split(SEGMENT_SEPARATOR).collect();

        if segments
            .iter()
            .skip(characters.len())
            .any(|s| !s.trim().is_empty())
        {
            return Err(GradebookError::AnnotationMismatch {
                address,
                characters: characters.len(),
                segments: segments.len(),
            });
        }

        let mut marks = Vec::new();
        for (idx, ch) in characters.iter().enumerate() {
            let Some(digit) = ch.to_digit(10) else {
                continue;
            };

            let segment = segments
                .get(idx)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .ok_or(GradebookError::MissingAnnotation {
                    address,
                    position: idx + 1,
                })?;

            let work_type = work_type_of(segment).ok_or_else(|| GradebookError::Format {
                address,
                segment: segment.to_string(),
            })?;

            let weight =
                self.weights
                    .weight(work_type)
                    .ok_or_else(|| GradebookError::UnknownWorkType {
                        address,
                        label: work_type.to_string(),
                    })?;

            marks.push(MarkRecord::new(date, digit as u8, work_type, weight));
        }

        Ok(marks)
    }
}

/// Middle field of `<date> - <work type> - <topic>`
fn work_type_of(segment: &str) -> Option<&str> {
    let mut fields = segment.split(FIELD_SEPARATOR);
    let (_, work_type, _) = (fields.next()?, fields.next()?, fields.next()?);
    if fields.next().is_some() {
        return None;
    }
    let work_type = work_type.trim();
    (!work_type.is_empty()).then_some(work_type)
}
