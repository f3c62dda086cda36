pub mod document;
pub mod node;
pub mod selection;

pub use document::{Document, NodeRef, ResolvedPos};
pub use node::{Attrs, Inline, Node, NodeContent, NodeKind};
pub use selection::Selection;
