//! Error types for report extraction and aggregation

use std::path::PathBuf;

use gradebook_core::CellAddress;
use gradebook_xlsx::XlsxError;
use thiserror::Error;

/// Result type alias using [`GradebookError`]
pub type Result<T> = std::result::Result<T, GradebookError>;

/// Errors raised while loading, parsing or charting a grade report
#[derive(Debug, Error)]
pub enum GradebookError {
    /// File name does not name an `.xlsx` workbook
    #[error("File name must have the .xlsx extension: {0}")]
    InvalidFileName(String),

    /// File is absent from the data directory
    #[error("File \"{file}\" not found in \"{}\"", .dir.display())]
    NotFound { file: String, dir: PathBuf },

    /// File could not be read as a workbook
    #[error("Failed to read workbook: {0}")]
    Load(#[from] XlsxError),

    /// Workbook loaded but holds no worksheet
    #[error("Workbook has no worksheets")]
    NoWorksheet,

    /// Annotation segment is not `<date> - <work type> - <topic>`
    #[error("Malformed annotation in {address}: \"{segment}\" (expected \"<date> - <work type> - <topic>\")")]
    Format { address: CellAddress, segment: String },

    /// Annotation names a work type missing from the weight table
    #[error("Unknown work type \"{label}\" in {address}")]
    UnknownWorkType { address: CellAddress, label: String },

    /// A mark has no annotation segment to take its work type from
    #[error("Mark #{position} in {address} has no annotation")]
    MissingAnnotation { address: CellAddress, position: usize },

    /// Annotation has more non-blank segments than the cell has characters
    #[error("{address} has {segments} annotation segments for {characters} characters")]
    AnnotationMismatch {
        address: CellAddress,
        characters: usize,
        segments: usize,
    },

    /// Date row holds something that is not a date
    #[error("Invalid date label \"{label}\" in {address}")]
    InvalidDate { address: CellAddress, label: String },

    /// Annotated mark sits under an empty date cell
    #[error("Mark in {mark} has no date: {address} is empty")]
    MissingDate { address: CellAddress, mark: CellAddress },

    /// Weight table entry with a non-positive coefficient
    #[error("Invalid weight {weight} for work type \"{label}\"")]
    InvalidWeight { label: String, weight: f64 },

    /// Subject name is not in the catalog
    #[error("Subject \"{0}\" not found")]
    UnknownSubject(String),

    /// Fewer than two points to draw
    #[error("Too few marks to chart \"{subject}\": {points} point(s)")]
    InsufficientData { subject: String, points: usize },
}
