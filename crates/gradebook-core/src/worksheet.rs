//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellValue};
use crate::comment::CellComment;
use crate::date::DateSystem;
use crate::error::{Error, Result};
use crate::sheet::SheetAccessor;
use crate::{MAX_COLS, MAX_ROWS};

static EMPTY: CellValue = CellValue::Empty;

/// A worksheet (single sheet in a workbook)
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell values keyed by (row, col)
    cells: BTreeMap<(u32, u16), CellValue>,
    /// Cell comments keyed by (row, col)
    comments: BTreeMap<(u32, u16), CellComment>,
    /// Date system inherited from the owning workbook
    date_system: DateSystem,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the date system used to read numeric dates
    pub fn set_date_system(&mut self, date_system: DateSystem) {
        self.date_system = date_system;
    }

    // === Cell Access ===

    /// Get cell value by address string (e.g., "A1")
    pub fn get_value(&self, address: &str) -> Result<&CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> &CellValue {
        self.cells.get(&(row, col)).unwrap_or(&EMPTY)
    }

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by indices. Setting [`CellValue::Empty`] clears the cell.
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        check_bounds(row, col)?;
        match value.into() {
            CellValue::Empty => {
                self.cells.remove(&(row, col));
            }
            value => {
                self.cells.insert((row, col), value);
            }
        }
        Ok(())
    }

    // === Comments ===

    /// Attach a comment to a cell by address string
    pub fn set_comment(&mut self, address: &str, comment: CellComment) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_comment_at(addr.row, addr.col, comment);
        Ok(())
    }

    /// Attach a comment to a cell by indices, replacing any previous comment
    pub fn set_comment_at(&mut self, row: u32, col: u16, comment: CellComment) {
        self.comments.insert((row, col), comment);
    }

    /// Get the comment attached to a cell by indices
    pub fn comment_at(&self, row: u32, col: u16) -> Option<&CellComment> {
        self.comments.get(&(row, col))
    }

    /// Number of comments in the sheet
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the sheet holds neither values nor comments
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.comments.is_empty()
    }
}

fn check_bounds(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS {
        return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
    }
    if col >= MAX_COLS {
        return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
    }
    Ok(())
}

impl SheetAccessor for Worksheet {
    fn cell_value(&self, row: u32, col: u16) -> &CellValue {
        self.get_value_at(row, col)
    }

    fn cell_annotation(&self, row: u32, col: u16) -> Option<&str> {
        self.comment_at(row, col).map(|c| c.text.as_str())
    }

    fn max_col(&self) -> Option<u16> {
        let cells = self.cells.keys().map(|(_, c)| *c).max();
        let comments = self.comments.keys().map(|(_, c)| *c).max();
        cells.max(comments)
    }

    fn date_system(&self) -> DateSystem {
        self.date_system
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_and_get() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value("A1", "Организация:").unwrap();
        sheet.set_cell_value_at(9, 2, 45170.0).unwrap();

        assert_eq!(sheet.get_value("A1").unwrap().as_string(), Some("Организация:"));
        assert_eq!(sheet.cell_value(9, 2).as_number(), Some(45170.0));
        assert!(sheet.cell_value(100, 100).is_empty());
        assert_eq!(sheet.cell_count(), 2);
    }

    #[test]
    fn test_empty_value_clears_cell() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value("B2", 5).unwrap();
        sheet.set_cell_value("B2", CellValue::Empty).unwrap();
        assert_eq!(sheet.cell_count(), 0);
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_annotations() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet
            .set_comment("C11", CellComment::new("Учитель", "a - Тест - b"))
            .unwrap();

        assert_eq!(sheet.cell_annotation(10, 2), Some("a - Тест - b"));
        assert_eq!(sheet.cell_annotation(10, 3), None);
        assert_eq!(sheet.comment_count(), 1);
    }

    #[test]
    fn test_extent() {
        let mut sheet = Worksheet::new("Sheet1");
        assert_eq!(sheet.max_col(), None);

        sheet.set_cell_value("B7", "x").unwrap();
        sheet.set_comment("E3", CellComment::text_only("note")).unwrap();
        assert_eq!(sheet.max_col(), Some(4));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut sheet = Worksheet::new("Sheet1");
        assert!(sheet.set_cell_value_at(MAX_ROWS, 0, 1).is_err());
        assert!(sheet.set_cell_value_at(0, MAX_COLS, 1).is_err());
    }
}
