//! Fixed cell layout of a grade report

use gradebook_core::CellAddress;

/// Label of the summary column that ends the dated grid
pub const TOTAL_COLUMN_LABEL: &str = "Итог:";

/// Where each block of a grade report lives on the sheet.
///
/// ```text
///      A              B   C      D      ...   X
///  1   Организация:
///  2   <value>
///  ..  (4 key/value pairs down to row 8)
/// 10                      01.09  02.09  ...   Итог:
/// 11   <subject 1>        54     н5
/// 12   <subject 2>        ...
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// First header key cell
    pub info_start: CellAddress,
    /// Rows between consecutive header keys
    pub info_step: u32,
    /// Number of rows scanned for header keys, starting at `info_start`
    pub info_rows: u32,
    /// First subject name cell
    pub subjects_start: CellAddress,
    /// First date cell of the grid; mark rows follow directly below it
    pub grid_start: CellAddress,
    /// Date label that ends the grid
    pub terminator: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            info_start: CellAddress::new(0, 0),
            info_step: 2,
            info_rows: 7,
            subjects_start: CellAddress::new(10, 0),
            grid_start: CellAddress::new(9, 2),
            terminator: TOTAL_COLUMN_LABEL.to_string(),
        }
    }
}
