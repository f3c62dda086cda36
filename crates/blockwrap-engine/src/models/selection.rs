use crate::error::InvalidSelectionError;
use crate::models::Document;

/// A selection range between two document positions.
///
/// Construction does not validate; call [`Selection::validate`] against the
/// document the selection is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub from: usize,
    pub to: usize,
}

impl Selection {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Collapsed selection (a caret)
    pub fn caret(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    /// Check ordering and that both ends lie inside `doc`
    pub fn validate(&self, doc: &Document) -> Result<(), InvalidSelectionError> {
        if self.from > self.to {
            return Err(InvalidSelectionError::Reversed {
                from: self.from,
                to: self.to,
            });
        }
        doc.check_position(self.from)?;
        doc.check_position(self.to)
    }
}

impl From<std::ops::Range<usize>> for Selection {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
