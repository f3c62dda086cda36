/*!
 * # Selection Formatting
 *
 * Turns a selection over a [`Document`] into markup where the selected range
 * is rewrapped in a target [`BlockTag`] while everything around it keeps the
 * tag of the block it came from.
 *
 * ## Entry points
 *
 * - **`format_in_single_node`**: the selection stays inside one block. The
 *   block is split into before / selected / after; empty outer parts are
 *   dropped, the selected part is always wrapped (a caret yields `<h1></h1>`).
 * - **`format_in_multi_nodes`**: the selection crosses blocks. Nodes
 *   overlapping the selection are folded in document order; the wrapper opens
 *   at the start boundary, swallows whole blocks in between, closes around
 *   images and closes for good at the end boundary.
 * - **`format_selection`**: picks one of the two from where the selection
 *   starts and ends.
 *
 * ```rust
 * use blockwrap_engine::{BlockTag, Document, Node, Selection, format_selection};
 *
 * let doc = Document::new([Node::paragraph_text("Hello world")]);
 * let html = format_selection(BlockTag::Heading, Selection::new(7, 12), &doc).unwrap();
 * assert_eq!(html, "<p>Hello </p><h1>world</h1>");
 * ```
 *
 * ## Module Structure
 *
 * - **`block`**: locating the block a selection endpoint belongs to
 * - **`single`** / **`multi`**: the two splitting algorithms, producing fragments
 * - **`fragment`**: output fragments and rendering to a string
 * - **`tag`** / **`options`**: tag inference and rendering options
 */

pub mod block;
pub mod fragment;
pub mod multi;
pub mod options;
pub mod single;
pub mod tag;

#[cfg(test)]
mod tests;

pub use fragment::{Fragment, render};
pub use multi::{Folded, Wrapper};
pub use options::{FormatOptions, TagNames};
pub use tag::BlockTag;

use crate::error::InvalidSelectionError;
use crate::models::{Document, Selection};

/// Which algorithm a selection needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SingleNode,
    MultiNodes,
}

impl Route {
    /// Single-node when the selection is empty or both ends land in the same
    /// textblock, multi-node otherwise. A range covering only document-level
    /// atoms has no textblock to split and goes through the multi-node fold.
    pub fn for_selection(
        selection: Selection,
        doc: &Document,
    ) -> Result<Self, InvalidSelectionError> {
        selection.validate(doc)?;
        if selection.is_empty() {
            return Ok(Route::SingleNode);
        }
        let start = block::locate_block(doc, selection.from)?;
        let end = block::locate_block(doc, selection.to - 1)?;
        Ok(if start.same_as(&end) && start.node.is_textblock() {
            Route::SingleNode
        } else {
            Route::MultiNodes
        })
    }
}

/// Formatter carrying rendering options
#[derive(Debug, Clone, Default)]
pub struct SelectionFormatter {
    options: FormatOptions,
}

impl SelectionFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn format_in_single_node(
        &self,
        target: BlockTag,
        selection: Selection,
        doc: &Document,
    ) -> Result<String, InvalidSelectionError> {
        selection.validate(doc)?;
        log::debug!(
            "single-node format {}..{} as {target}",
            selection.from,
            selection.to
        );
        let fragments = single::fragments(target, selection, doc)?;
        Ok(render(&fragments, &self.options))
    }

    pub fn format_in_multi_nodes(
        &self,
        target: BlockTag,
        selection: Selection,
        doc: &Document,
    ) -> Result<String, InvalidSelectionError> {
        selection.validate(doc)?;
        log::debug!(
            "multi-node format {}..{} as {target}",
            selection.from,
            selection.to
        );
        let folded = multi::fold(target, selection, doc)?;
        if folded.wrapper == Wrapper::Open {
            log::warn!(
                "selection {}..{} left the {target} wrapper open; it does not cross blocks",
                selection.from,
                selection.to
            );
        }
        Ok(render(&folded.fragments, &self.options))
    }

    pub fn format_selection(
        &self,
        target: BlockTag,
        selection: Selection,
        doc: &Document,
    ) -> Result<String, InvalidSelectionError> {
        match Route::for_selection(selection, doc)? {
            Route::SingleNode => self.format_in_single_node(target, selection, doc),
            Route::MultiNodes => self.format_in_multi_nodes(target, selection, doc),
        }
    }
}

/// [`SelectionFormatter::format_in_single_node`] with default options
pub fn format_in_single_node(
    target: BlockTag,
    selection: Selection,
    doc: &Document,
) -> Result<String, InvalidSelectionError> {
    SelectionFormatter::default().format_in_single_node(target, selection, doc)
}

/// [`SelectionFormatter::format_in_multi_nodes`] with default options
pub fn format_in_multi_nodes(
    target: BlockTag,
    selection: Selection,
    doc: &Document,
) -> Result<String, InvalidSelectionError> {
    SelectionFormatter::default().format_in_multi_nodes(target, selection, doc)
}

/// [`SelectionFormatter::format_selection`] with default options
pub fn format_selection(
    target: BlockTag,
    selection: Selection,
    doc: &Document,
) -> Result<String, InvalidSelectionError> {
    SelectionFormatter::default().format_selection(target, selection, doc)
}
