use std::ptr;

use crate::error::InvalidSelectionError;
use crate::models::{Document, Node, NodeRef};

/// A container and the position where its content starts.
///
/// Unlike [`NodeRef`] this can also stand for the document root, whose
/// content starts at position 0.
#[derive(Debug, Clone, Copy)]
pub struct BlockRef<'a> {
    pub node: &'a Node,
    pub start: usize,
}

impl<'a> BlockRef<'a> {
    /// Offset of `pos` within the block's content, clamped to the content
    pub fn local(&self, pos: usize) -> usize {
        pos.saturating_sub(self.start).min(self.node.content_size())
    }

    pub fn size(&self) -> usize {
        self.node.content_size()
    }

    pub fn is(&self, node: NodeRef<'_>) -> bool {
        ptr::eq(self.node, node.node) && node.content_start() == self.start
    }

    pub fn same_as(&self, other: &BlockRef<'_>) -> bool {
        ptr::eq(self.node, other.node) && self.start == other.start
    }

    /// Only textblocks can be split at a selection boundary
    pub fn textblock(self) -> Option<Self> {
        self.node.is_textblock().then_some(self)
    }
}

/// Find the block a selection endpoint belongs to.
///
/// That is the textblock `pos` resolves into, else the textblock starting at
/// `pos` (an endpoint sitting just before a block). When neither exists the
/// resolved parent is returned as is.
pub fn locate_block(doc: &Document, pos: usize) -> Result<BlockRef<'_>, InvalidSelectionError> {
    let resolved = doc.resolve(pos)?;
    let parent = BlockRef {
        node: resolved.parent(),
        start: resolved.start(),
    };
    if parent.node.is_textblock() {
        return Ok(parent);
    }
    match doc.node_at(pos) {
        Some(at) if at.node.is_textblock() => Ok(BlockRef {
            node: at.node,
            start: at.content_start(),
        }),
        _ => Ok(parent),
    }
}

/// The textblock a caret at `pos` edits.
///
/// Like [`locate_block`], but a position in a gap between blocks that has no
/// textblock after it falls back to the textblock ending there. `None` when
/// neither neighbour is a textblock.
pub fn textblock_near(
    doc: &Document,
    pos: usize,
) -> Result<Option<BlockRef<'_>>, InvalidSelectionError> {
    let located = locate_block(doc, pos)?;
    if located.node.is_textblock() {
        return Ok(Some(located));
    }
    let ending_here = located
        .node
        .child_offsets(located.start)
        .find(|(p, c)| p + c.node_size() == pos && c.is_textblock())
        .map(|(p, c)| BlockRef {
            node: c,
            start: p + 1,
        });
    Ok(ending_here)
}
