//! Header block: organization, student, class, period.

use gradebook_core::{CellValue, SheetAccessor};

use crate::layout::SheetLayout;

/// Header field holding the reporting period
pub const PERIOD_FIELD: &str = "Период";

/// Key/value fields from the top of the report.
///
/// Keys keep the order in which they were first seen; a repeated key
/// overwrites the earlier value in place. A value is `None` when its cell
/// was empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderInfo {
    fields: Vec<(String, Option<String>)>,
}

impl HeaderInfo {
    /// Create an empty header
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing the value of an existing key
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(field) => field.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up a field.
    ///
    /// The outer `Option` tells whether the key exists, the inner one whether
    /// its value cell held anything.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// Value of a field, `None` when the key is missing or its value is empty
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).flatten()
    }

    /// Reporting period ("1 четверть", "Год", ...)
    pub fn period(&self) -> Option<&str> {
        self.value(PERIOD_FIELD)
    }

    /// Iterate over fields in scan order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field was found
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Read the header key/value pairs.
///
/// Keys sit on rows `info_start`, `info_start + step`, ... within `info_rows`
/// rows, each value on the row right below its key. A key is taken only from
/// a text cell, minus its trailing character (the colon); anything else skips
/// the pair.
pub fn extract_info<S: SheetAccessor + ?Sized>(sheet: &S, layout: &SheetLayout) -> HeaderInfo {
    let mut info = HeaderInfo::new();
    let col = layout.info_start.col;
    let start = layout.info_start.row;
    let end = start.saturating_add(layout.info_rows);
    let step = layout.info_step.max(1) as usize;

    for row in (start..end).step_by(step) {
        let Some(raw_key) = sheet.cell_value(row, col).as_string() else {
            continue;
        };

        let mut chars = raw_key.chars();
        chars.next_back();
        let key = chars.as_str();
        if key.is_empty() {
            continue;
        }

        let value = match sheet.cell_value(row + 1, col) {
            CellValue::Empty => None,
            other => Some(other.display_text()),
        };

        log::debug!("header field {:?} = {:?}", key, value);
        info.insert(key, value);
    }

    info
}
