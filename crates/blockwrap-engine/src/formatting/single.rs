//! Rewrap a selection that stays inside one block.

use crate::error::InvalidSelectionError;
use crate::formatting::block::textblock_near;
use crate::formatting::fragment::wrap_inline;
use crate::formatting::{BlockTag, Fragment};
use crate::models::{Document, Selection};

/// Split the block holding the selection into before / selected / after.
///
/// The selected part is always wrapped in `target`, even when empty, so a
/// caret still toggles the block. Empty before/after parts are dropped; the
/// non-empty ones keep the tag of the block they came from. Inline images
/// stay where they are, between tag pairs.
///
/// A caret in a gap with no textblock on either side yields the empty target
/// pair alone.
pub fn fragments(
    target: BlockTag,
    selection: Selection,
    doc: &Document,
) -> Result<Vec<Fragment>, InvalidSelectionError> {
    let Some(block) = textblock_near(doc, selection.from)? else {
        return Ok(Fragment::wrapped(target, String::new()).to_vec());
    };
    let from = block.local(selection.from);
    let to = block.local(selection.to).max(from);
    let original = BlockTag::for_kind(block.node.kind());

    let mut out = wrap_inline(original, &block.node.inline_between(0, from), false);
    out.extend(wrap_inline(
        target,
        &block.node.inline_between(from, to),
        true,
    ));
    out.extend(wrap_inline(
        original,
        &block.node.inline_between(to, block.size()),
        false,
    ));
    Ok(out)
}
