//! Ordered list of subjects from the report's subject column.

use gradebook_core::{CellAddress, SheetAccessor, MAX_ROWS};

/// Subject names by 1-based ordinal.
///
/// Ordinal `n` is the `n`-th non-blank cell going down the subject column.
/// Equal names are kept as separate entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubjectCatalog {
    names: Vec<String>,
}

impl SubjectCatalog {
    /// Build a catalog from names in ordinal order
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of the subject at `ordinal` (1-based)
    pub fn get(&self, ordinal: usize) -> Option<&str> {
        ordinal
            .checked_sub(1)
            .and_then(|idx| self.names.get(idx))
            .map(String::as_str)
    }

    /// Ordinal of the first subject with this name
    pub fn ordinal_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name).map(|idx| idx + 1)
    }

    /// Iterate over `(ordinal, name)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (idx + 1, name.as_str()))
    }

    /// Number of subjects
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Read subject names downward from `start` until the first blank cell.
///
/// Rows after a gap are never read, even if they hold names.
pub fn extract_subjects<S: SheetAccessor + ?Sized>(sheet: &S, start: CellAddress) -> SubjectCatalog {
    let mut names = Vec::new();

    for row in start.row..MAX_ROWS {
        let value = sheet.cell_value(row, start.col);
        if value.is_blank() {
            break;
        }
        names.push(value.display_text().trim().to_string());
    }

    log::debug!("found {} subjects starting at {}", names.len(), start);
    SubjectCatalog { names }
}
