//! Workbook type

use crate::date::DateSystem;
use crate::error::{Error, Result};
use crate::worksheet::Worksheet;

/// An ordered collection of worksheets with one active sheet
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
    active: usize,
    date_system: DateSystem,
}

impl Workbook {
    /// Create a workbook with no sheets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a worksheet and return its index.
    ///
    /// The sheet inherits the workbook's date system.
    pub fn push_worksheet(&mut self, mut sheet: Worksheet) -> usize {
        sheet.set_date_system(self.date_system);
        self.sheets.push(sheet);
        self.sheets.len() - 1
    }

    /// Number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    /// Index of the sheet that was selected when the file was saved
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Mark a sheet as active
    pub fn set_active(&mut self, index: usize) -> Result<()> {
        if index >= self.sheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.sheets.len()));
        }
        self.active = index;
        Ok(())
    }

    /// The active worksheet, falling back to the first one
    pub fn active_sheet(&self) -> Option<&Worksheet> {
        self.sheets.get(self.active).or_else(|| self.sheets.first())
    }

    /// Consume the workbook and return its active worksheet
    pub fn into_active_sheet(mut self) -> Option<Worksheet> {
        if self.sheets.is_empty() {
            return None;
        }
        let index = self.active.min(self.sheets.len() - 1);
        Some(self.sheets.swap_remove(index))
    }

    /// Date system the workbook was saved with
    pub fn date_system(&self) -> DateSystem {
        self.date_system
    }

    /// Set the date system and propagate it to every sheet
    pub fn set_date_system(&mut self, date_system: DateSystem) {
        self.date_system = date_system;
        for sheet in &mut self.sheets {
            sheet.set_date_system(date_system);
        }
    }
}
