//! Cell comments.
//!
//! Grade reports attach the work type of every mark to its cell as a
//! comment, so comments are read as data, not decoration.

use std::fmt;

/// Note attached to a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellComment {
    /// Empty when the file names no author
    pub author: String,
    pub text: String,
}

impl CellComment {
    /// ```rust
    /// use gradebook_core::CellComment;
    ///
    /// let comment = CellComment::new("Учитель", "05.09 - Тест - Дроби");
    /// assert_eq!(comment.author, "Учитель");
    /// assert!(comment.has_author());
    /// ```
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }

    /// Comment without an author
    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(String::new(), text)
    }

    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }
}

impl fmt::Display for CellComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.has_author() {
            true => write!(f, "{}: {}", self.author, self.text),
            false => f.write_str(&self.text),
        }
    }
}
