//! # gradebook-core
//!
//! Sheet model shared by the gradebook crates.
//!
//! This crate provides:
//! - [`CellValue`] - Values stored in a cell (numbers, strings, booleans)
//! - [`CellAddress`] - Zero-based cell coordinates with A1 formatting
//! - [`CellComment`] - Free-text annotations attached to cells
//! - [`SheetAccessor`] - The read-only capability the report parser is written against
//! - [`Worksheet`], [`Workbook`] - In-memory implementations of that capability
//!
//! ## Example
//!
//! ```rust
//! use gradebook_core::{CellComment, SheetAccessor, Worksheet};
//!
//! let mut sheet = Worksheet::new("Отметки");
//! sheet.set_cell_value("C11", "54").unwrap();
//! sheet.set_comment("C11", CellComment::text_only("a - Тест - b;a - Тест - b")).unwrap();
//!
//! assert_eq!(sheet.cell_value(10, 2).display_text(), "54");
//! assert!(sheet.cell_annotation(10, 2).is_some());
//! ```

pub mod cell;
pub mod comment;
pub mod date;
pub mod error;
pub mod sheet;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellValue};
pub use comment::CellComment;
pub use date::DateSystem;
pub use error::{Error, Result};
pub use sheet::SheetAccessor;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
