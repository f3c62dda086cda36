use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidSelectionError;
use crate::formatting::TagNames;
use crate::models::{Document, NodeKind};

/// The two block tags a selection can be rewrapped in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    Heading,
    Paragraph,
}

impl BlockTag {
    /// Headings map to `Heading`; every other block type reads as a paragraph
    pub fn for_kind(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Heading => BlockTag::Heading,
            _ => BlockTag::Paragraph,
        }
    }

    /// Tag of the block enclosing `pos`
    pub fn at(doc: &Document, pos: usize) -> Result<Self, InvalidSelectionError> {
        Ok(Self::for_kind(doc.resolve(pos)?.parent().kind()))
    }

    /// Rendered element name
    pub fn name(self, names: &TagNames) -> &str {
        match self {
            BlockTag::Heading => &names.heading,
            BlockTag::Paragraph => &names.paragraph,
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockTag::Heading => "h1",
            BlockTag::Paragraph => "p",
        };
        f.write_str(name)
    }
}
