pub mod error;
pub mod formatting;
pub mod models;

// Re-export key types for easier usage
pub use error::InvalidSelectionError;
pub use formatting::{
    BlockTag, FormatOptions, Route, SelectionFormatter, TagNames, format_in_multi_nodes,
    format_in_single_node, format_selection,
};
pub use models::{Document, Node, NodeKind, Selection};
