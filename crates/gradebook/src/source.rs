//! Locating and loading report workbooks.

use std::path::{Path, PathBuf};

use gradebook_core::Worksheet;
use gradebook_xlsx::XlsxReader;

use crate::dates::SchoolYear;
use crate::error::{GradebookError, Result};
use crate::layout::SheetLayout;
use crate::report::GradeReport;
use crate::weights::WorkTypeWeights;

/// Extension a report file name must carry
pub const REPORT_EXTENSION: &str = ".xlsx";

/// Directory reports are looked up in by default
pub const DEFAULT_DATA_DIR: &str = "data";

/// How a report is interpreted once loaded
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub layout: SheetLayout,
    pub school_year: SchoolYear,
    pub weights: &'static WorkTypeWeights,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            layout: SheetLayout::default(),
            school_year: SchoolYear::current(),
            weights: WorkTypeWeights::standard(),
        }
    }
}

/// Path of the report `name` inside `data_dir`.
///
/// The name must contain `.xlsx` and the file must exist.
pub fn resolve_report_path(data_dir: impl AsRef<Path>, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if !name.contains(REPORT_EXTENSION) {
        return Err(GradebookError::InvalidFileName(name.to_string()));
    }

    let dir = data_dir.as_ref();
    let path = dir.join(name);
    if !path.is_file() {
        return Err(GradebookError::NotFound {
            file: name.to_string(),
            dir: dir.to_path_buf(),
        });
    }
    Ok(path)
}

/// Load the active worksheet of a workbook
pub fn load_sheet(path: impl AsRef<Path>) -> Result<Worksheet> {
    let path = path.as_ref();
    log::info!("loading {}", path.display());
    let workbook = XlsxReader::read_file(path)?;
    workbook.into_active_sheet().ok_or(GradebookError::NoWorksheet)
}

/// Resolve, load and parse a report
pub fn open_report(
    data_dir: impl AsRef<Path>,
    name: &str,
    options: &ReportOptions,
) -> Result<GradeReport> {
    let path = resolve_report_path(data_dir, name)?;
    let sheet = load_sheet(&path)?;
    log::debug!("parsing sheet {:?}", sheet.name());
    GradeReport::from_sheet(&sheet, &options.layout, options.weights, options.school_year)
}
