//! Errors raised by the sheet model

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Text that is not an A1 reference
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    #[error("Row {0} is past the last sheet row {1}")]
    RowOutOfBounds(u32, u32),

    #[error("Column {0} is past the last sheet column {1}")]
    ColumnOutOfBounds(u16, u16),

    #[error("No sheet at index {0}, the workbook has {1}")]
    SheetOutOfBounds(usize, usize),
}
