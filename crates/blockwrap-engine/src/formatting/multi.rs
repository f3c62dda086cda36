//! Rewrap a selection that crosses block boundaries.
//!
//! The nodes overlapping the selection are folded left to right into
//! fragments. The target wrapper opens at the start boundary, stays open
//! across the blocks in between (closing briefly around each image) and
//! closes at the end boundary.

use crate::error::InvalidSelectionError;
use crate::formatting::block::{BlockRef, locate_block};
use crate::formatting::fragment::wrap_inline;
use crate::formatting::{BlockTag, Fragment};
use crate::models::{Document, Inline, Node, NodeKind, NodeRef, Selection};

/// Whether the target wrapper is currently open in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    Closed,
    Open,
}

/// How a traversed node contributes to the output
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role<'a> {
    StartBoundary,
    EndBoundary,
    Image { src: &'a str },
    PlainBlock,
    Skip,
}

/// Boundary blocks of a selection
#[derive(Debug, Clone, Copy)]
pub struct Boundaries<'a> {
    pub start: Option<BlockRef<'a>>,
    pub end: Option<BlockRef<'a>>,
}

impl<'a> Boundaries<'a> {
    /// The textblocks at `from` and at `to - 1`
    pub fn of(selection: Selection, doc: &'a Document) -> Result<Self, InvalidSelectionError> {
        Ok(Self {
            start: locate_block(doc, selection.from)?.textblock(),
            end: locate_block(doc, selection.to.saturating_sub(1))?.textblock(),
        })
    }

    /// Classify a node. Boundaries win over kind, start over end.
    pub fn classify(&self, node: NodeRef<'a>) -> Role<'a> {
        if node.node.is_text() {
            return Role::Skip;
        }
        if self.start.is_some_and(|b| b.is(node)) {
            return Role::StartBoundary;
        }
        if self.end.is_some_and(|b| b.is(node)) {
            return Role::EndBoundary;
        }
        match node.node.kind() {
            NodeKind::Image => Role::Image {
                src: node.node.attr("src").unwrap_or_default(),
            },
            NodeKind::Paragraph | NodeKind::Heading => Role::PlainBlock,
            NodeKind::Text | NodeKind::Other(_) => Role::Skip,
        }
    }
}

/// Result of folding a selection
#[derive(Debug, Clone, PartialEq)]
pub struct Folded {
    pub fragments: Vec<Fragment>,
    /// Wrapper state after the last node
    pub wrapper: Wrapper,
}

struct Fold {
    target: BlockTag,
    wrapper: Wrapper,
    fragments: Vec<Fragment>,
    /// Nodes starting before this position were emitted with their block
    consumed_until: usize,
}

impl Fold {
    fn open(&mut self) {
        if self.wrapper == Wrapper::Closed {
            self.fragments.push(Fragment::Open(self.target));
            self.wrapper = Wrapper::Open;
        }
    }

    fn close(&mut self) {
        if self.wrapper == Wrapper::Open {
            self.fragments.push(Fragment::Close(self.target));
            self.wrapper = Wrapper::Closed;
        }
    }

    fn text(&mut self, text: &str) {
        if !text.is_empty() {
            self.fragments.push(Fragment::Text(text.to_string()));
        }
    }

    /// Images never sit inside the wrapper's text
    fn image(&mut self, src: &str) {
        let reopen = self.wrapper == Wrapper::Open;
        self.close();
        self.fragments.push(Fragment::Image {
            src: src.to_string(),
        });
        if reopen {
            self.open();
        }
    }

    fn inline(&mut self, block: &Node, from: usize, to: usize) {
        for piece in block.inline_between(from, to) {
            match piece {
                Inline::Text(text) => self.text(text),
                Inline::Image(image) => self.image(image.attr("src").unwrap_or_default()),
            }
        }
    }

    /// Content outside the selection, kept in the block's own tag
    fn outside(&mut self, tag: BlockTag, block: &Node, from: usize, to: usize) {
        self.fragments
            .extend(wrap_inline(tag, &block.inline_between(from, to), false));
    }

    /// Close the wrapper after the last node when no end boundary did.
    /// A wrapper reopened after a trailing image holds nothing and is dropped.
    fn finish(&mut self) {
        if self.wrapper == Wrapper::Closed {
            return;
        }
        if self.fragments.last() == Some(&Fragment::Open(self.target)) {
            self.fragments.pop();
            self.wrapper = Wrapper::Closed;
        } else {
            self.close();
        }
    }

    fn step(&mut self, node: NodeRef<'_>, role: Role<'_>, selection: Selection) {
        let block = node.node;
        let tag = BlockTag::for_kind(block.kind());
        match role {
            Role::StartBoundary => {
                let split = node_local(node, selection.from);
                self.outside(tag, block, 0, split);
                self.open();
                self.inline(block, split, block.content_size());
            }
            Role::EndBoundary => {
                let split = node_local(node, selection.to);
                self.open();
                self.inline(block, 0, split);
                self.close();
                self.outside(tag, block, split, block.content_size());
            }
            Role::Image { src } => self.image(src),
            Role::PlainBlock => {
                self.open();
                self.inline(block, 0, block.content_size());
            }
            Role::Skip => return,
        }
        if block.is_textblock() {
            self.consumed_until = node.end();
        }
    }
}

fn node_local(node: NodeRef<'_>, pos: usize) -> usize {
    pos.saturating_sub(node.content_start())
        .min(node.node.content_size())
}

/// Fold the nodes overlapping the selection into fragments.
///
/// A selection ending on an atom rather than inside a textblock has no end
/// boundary; the wrapper is closed after the last node instead. When the
/// start and end boundary are the same block the start rule wins and the
/// wrapper is left open; such selections belong to the single-node formatter.
pub fn fold(
    target: BlockTag,
    selection: Selection,
    doc: &Document,
) -> Result<Folded, InvalidSelectionError> {
    let boundaries = Boundaries::of(selection, doc)?;
    let mut fold = Fold {
        target,
        wrapper: Wrapper::Closed,
        fragments: Vec::new(),
        consumed_until: 0,
    };

    for node in doc.nodes_between(selection.from, selection.to) {
        if node.pos < fold.consumed_until {
            continue;
        }
        let role = boundaries.classify(node);
        log::trace!("node {} at {}: {role:?}", node.node.kind().name(), node.pos);
        fold.step(node, role, selection);
    }
    if boundaries.end.is_none() {
        fold.finish();
    }

    Ok(Folded {
        fragments: fold.fragments,
        wrapper: fold.wrapper,
    })
}
