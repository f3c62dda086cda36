/// A selection the formatter refuses to work with
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSelectionError {
    #[error("Selection is reversed: from {from} is after to {to}")]
    Reversed { from: usize, to: usize },
    #[error("Position {pos} is outside the document (content size {size})")]
    OutOfBounds { pos: usize, size: usize },
}
