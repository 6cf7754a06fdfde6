//! Date labels of the mark grid.

use chrono::{Datelike, Local, NaiveDate};
use gradebook_core::{CellAddress, CellValue, DateSystem};

use crate::error::{GradebookError, Result};

/// First month of a school year
const SCHOOL_YEAR_START_MONTH: u32 = 9;

/// School year identified by the calendar year it starts in.
///
/// Labels written as `dd.mm` carry no year; September to December belong
/// to the start year, January to August to the year after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolYear(pub i32);

impl SchoolYear {
    /// School year that contains `date`
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= SCHOOL_YEAR_START_MONTH {
            SchoolYear(date.year())
        } else {
            SchoolYear(date.year() - 1)
        }
    }

    /// School year running today, by the local clock
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// Full date for a day and month of this school year
    pub fn date(self, day: u32, month: u32) -> Option<NaiveDate> {
        let year = if month >= SCHOOL_YEAR_START_MONTH {
            self.0
        } else {
            self.0 + 1
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Interpret the grid date cell at `address`.
///
/// - empty or whitespace: `Ok(None)`, the column carries no date
/// - number: Excel serial date in the sheet's date system
/// - text: `dd.mm.yyyy` or `dd.mm`
///
/// Anything else is [`GradebookError::InvalidDate`].
pub(crate) fn parse_date_label(
    value: &CellValue,
    address: CellAddress,
    date_system: DateSystem,
    school_year: SchoolYear,
) -> Result<Option<NaiveDate>> {
    let date = match value {
        v if v.is_blank() => return Ok(None),
        CellValue::Number(serial) => date_system.date_from_serial(*serial),
        CellValue::String(text) => parse_text_date(text.trim(), school_year),
        _ => None,
    };
    date.map(Some).ok_or_else(|| GradebookError::InvalidDate {
        address,
        label: value.display_text(),
    })
}

fn parse_text_date(text: &str, school_year: SchoolYear) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%d.%m.%Y") {
        return Some(date);
    }

    let (day, month) = text.split_once('.')?;
    let all_digits = |s: &str| !s.is_empty() && s.len() <= 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(day) || !all_digits(month) {
        return None;
    }
    school_year.date(day.parse().ok()?, month.parse().ok()?)
}
