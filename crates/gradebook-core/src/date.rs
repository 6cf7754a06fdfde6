//! Excel serial date conversion.
//!
//! - Excel stores dates as serial numbers (days since a base date).
//! - The 1900 system treats 1900 as a leap year, so serial 60 is the
//!   non-existent 1900-02-29 and every later serial is shifted by one day.
//! - The 1904 system (old Mac workbooks) counts from 1904-01-01 = 0.

use chrono::{Duration, NaiveDate};

/// Date system a workbook was saved with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSystem {
    /// 1900 date system (Windows default), serial 1 = 1900-01-01
    #[default]
    Excel1900,
    /// 1904 date system, serial 0 = 1904-01-01
    Excel1904,
}

impl DateSystem {
    /// Convert a serial number to a calendar date.
    ///
    /// Time-of-day fractions are truncated. Returns `None` for serials that
    /// do not name a real day (negative, 1900-02-29, out of chrono's range).
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use gradebook_core::DateSystem;
    ///
    /// assert_eq!(
    ///     DateSystem::Excel1900.date_from_serial(45170.0),
    ///     NaiveDate::from_ymd_opt(2023, 9, 1)
    /// );
    /// ```
    pub fn date_from_serial(self, serial: f64) -> Option<NaiveDate> {
        if !serial.is_finite() {
            return None;
        }
        let serial = serial.floor() as i64;

        match self {
            DateSystem::Excel1900 => {
                if serial < 1 || serial == 60 {
                    return None;
                }
                let base = NaiveDate::from_ymd_opt(1899, 12, 31)?;
                let adjusted = if serial > 60 { serial - 1 } else { serial };
                base.checked_add_signed(Duration::try_days(adjusted)?)
            }
            DateSystem::Excel1904 => {
                if serial < 0 {
                    return None;
                }
                let base = NaiveDate::from_ymd_opt(1904, 1, 1)?;
                base.checked_add_signed(Duration::try_days(serial)?)
            }
        }
    }
}
