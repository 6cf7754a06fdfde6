//! Errors raised while reading an XLSX package

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("Cannot read file: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a zip archive, or the archive is damaged
    #[error("Not a valid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Zip archive that is not a spreadsheet package
    #[error("Not an XLSX package: {0}")]
    InvalidFormat(String),

    /// Package part the workbook points to is absent
    #[error("Package part {0} is missing")]
    MissingPart(String),

    /// Cell `r` attribute that is not an A1 reference
    #[error("Bad cell reference \"{reference}\": {source}")]
    BadReference {
        reference: String,
        source: gradebook_core::Error,
    },

    /// Shared string index that is not a number or points past the table
    #[error("Shared string index \"{0}\" does not resolve")]
    SharedString(String),

    #[error(transparent)]
    Core(#[from] gradebook_core::Error),
}
