//! # gradebook
//!
//! Reads school grade reports exported from e-journals as `.xlsx` and turns
//! them into weighted averages.
//!
//! A report sheet has a header block of key/value pairs, a column of
//! subjects and a grid of marks with one column per date. Every mark cell
//! carries a comment naming the kind of work each mark was given for, which
//! decides the mark's weight.
//!
//! ## Example
//!
//! ```rust
//! use gradebook::{GradeReport, SchoolYear, SheetLayout, Tier, WorkTypeWeights};
//! use gradebook_core::{CellComment, Worksheet};
//!
//! let mut sheet = Worksheet::new("Отметки");
//! sheet.set_cell_value("A7", "Период:").unwrap();
//! sheet.set_cell_value("A8", "1 четверть").unwrap();
//! sheet.set_cell_value("A11", "Математика").unwrap();
//! sheet.set_cell_value("C10", "01.09").unwrap();
//! sheet.set_cell_value("C11", "54").unwrap();
//! sheet
//!     .set_comment(
//!         "C11",
//!         CellComment::text_only("01.09 - Контрольная работа - Дроби;01.09 - Тест - Дроби"),
//!     )
//!     .unwrap();
//!
//! let report = GradeReport::from_sheet(
//!     &sheet,
//!     &SheetLayout::default(),
//!     WorkTypeWeights::standard(),
//!     SchoolYear(2023),
//! )
//! .unwrap();
//!
//! let summary = report.summary();
//! let math = &summary.subjects[0];
//! assert_eq!(math.outcome.average().unwrap().tier, Tier::Five);
//! assert_eq!(math.shortfall, Some(1));
//! ```

pub mod aggregate;
pub mod dates;
pub mod error;
pub mod info;
pub mod layout;
pub mod ledger;
pub mod period;
pub mod report;
pub mod source;
pub mod subjects;
pub mod weights;

pub use aggregate::{AverageOutcome, AveragePoint, FinalAverage, Severity, Tier};
pub use dates::SchoolYear;
pub use error::{GradebookError, Result};
pub use info::HeaderInfo;
pub use layout::SheetLayout;
pub use ledger::{MarkLedger, MarkLedgerBuilder, MarkRecord};
pub use period::MarkPolicy;
pub use report::{ChartSeries, GradeReport, ReportSummary, SubjectSummary, TierTally};
pub use source::{open_report, ReportOptions};
pub use subjects::SubjectCatalog;
pub use weights::WorkTypeWeights;
