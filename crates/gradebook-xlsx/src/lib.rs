//! # gradebook-xlsx
//!
//! XLSX (Office Open XML) reader for gradebook.
//!
//! Only what a grade report needs is read: cell values (shared strings,
//! inline strings, numbers, booleans, cached formula results), legacy cell
//! comments, the active sheet index and the workbook date system. Styles,
//! formulas and everything else are skipped.

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
