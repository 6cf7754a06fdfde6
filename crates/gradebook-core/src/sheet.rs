//! Read-only access to a loaded tabular sheet.

use crate::cell::CellValue;
use crate::date::DateSystem;

/// Capability the report parser is written against.
///
/// Coordinates are 0-based (`row 0, col 0` is A1). Any backend that can
/// answer these questions (an in-memory [`Worksheet`](crate::Worksheet), a
/// test double, another file format) can feed the parser.
pub trait SheetAccessor {
    /// Value of the cell, [`CellValue::Empty`] when the cell is absent.
    fn cell_value(&self, row: u32, col: u16) -> &CellValue;

    /// Free-text annotation (comment) attached to the cell, if any.
    fn cell_annotation(&self, row: u32, col: u16) -> Option<&str>;

    /// Largest column index holding a value or annotation, `None` for an empty sheet.
    fn max_col(&self) -> Option<u16>;

    /// Date system used to interpret numeric date cells.
    fn date_system(&self) -> DateSystem {
        DateSystem::Excel1900
    }
}

impl<T: SheetAccessor + ?Sized> SheetAccessor for &T {
    fn cell_value(&self, row: u32, col: u16) -> &CellValue {
        (**self).cell_value(row, col)
    }

    fn cell_annotation(&self, row: u32, col: u16) -> Option<&str> {
        (**self).cell_annotation(row, col)
    }

    fn max_col(&self) -> Option<u16> {
        (**self).max_col()
    }

    fn date_system(&self) -> DateSystem {
        (**self).date_system()
    }
}
