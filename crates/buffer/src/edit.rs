//! Edit operations

use std::ops::Range;

/// An edit operation against the document text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub kind: EditKind,
}

/// Edit kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    Insert { offset: usize, text: String },
    Delete { range: Range<usize> },
    Replace { range: Range<usize>, text: String },
}

impl Edit {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Insert {
                offset,
                text: text.into(),
            },
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self {
            kind: EditKind::Delete { range },
        }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Replace {
                range,
                text: text.into(),
            },
        }
    }

    /// The inverse of this edit against the text it has not yet mutated
    pub fn inverse(&self, text: &str) -> Edit {
        match &self.kind {
            EditKind::Insert { offset, text: inserted } => {
                Edit::delete(*offset..*offset + inserted.len())
            }
            EditKind::Delete { range } => {
                Edit::insert(range.start, &text[range.clone()])
            }
            EditKind::Replace { range, text: replacement } => Edit::replace(
                range.start..range.start + replacement.len(),
                &text[range.clone()],
            ),
        }
    }

    /// Cursor offset after this edit is applied
    pub fn caret_after(&self) -> usize {
        match &self.kind {
            EditKind::Insert { offset, text } => offset + text.len(),
            EditKind::Delete { range } => range.start,
            EditKind::Replace { range, text } => range.start + text.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_of_replace() {
        let edit = Edit::replace(0..5, "world");
        let inverse = edit.inverse("hello!");
        assert_eq!(inverse, Edit::replace(0..5, "hello"));
    }

    #[test]
    fn test_inverse_of_insert() {
        let edit = Edit::insert(2, "abc");
        assert_eq!(edit.inverse("xy"), Edit::delete(2..5));
    }

    #[test]
    fn test_caret_after() {
        assert_eq!(Edit::insert(2, "abc").caret_after(), 5);
        assert_eq!(Edit::delete(2..5).caret_after(), 2);
    }
}
