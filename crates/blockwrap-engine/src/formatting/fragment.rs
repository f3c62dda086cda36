use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::formatting::{BlockTag, FormatOptions};
use crate::models::Inline;

/// One piece of formatter output, rendered in sequence by [`render`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Open(BlockTag),
    Close(BlockTag),
    Text(String),
    Image { src: String },
}

impl Fragment {
    /// `<tag>text</tag>` as three fragments
    pub fn wrapped(tag: BlockTag, text: impl Into<String>) -> [Fragment; 3] {
        [
            Fragment::Open(tag),
            Fragment::Text(text.into()),
            Fragment::Close(tag),
        ]
    }
}

/// Wrap inline content in `tag`, lifting images out between pairs.
///
/// Adjacent text runs share one pair and empty pairs are dropped. With
/// `keep_empty` a lone empty pair is emitted when no text survives, ahead of
/// any images.
pub fn wrap_inline(tag: BlockTag, pieces: &[Inline<'_>], keep_empty: bool) -> Vec<Fragment> {
    let mut out = Vec::new();
    let mut run = String::new();
    let mut wrapped_any = false;
    for piece in pieces {
        match piece {
            Inline::Text(text) => run.push_str(text),
            Inline::Image(image) => {
                if !run.is_empty() {
                    out.extend(Fragment::wrapped(tag, std::mem::take(&mut run)));
                    wrapped_any = true;
                }
                out.push(Fragment::Image {
                    src: image.attr("src").unwrap_or_default().to_string(),
                });
            }
        }
    }
    if !run.is_empty() {
        out.extend(Fragment::wrapped(tag, run));
        wrapped_any = true;
    }
    if keep_empty && !wrapped_any {
        out.splice(0..0, Fragment::wrapped(tag, String::new()));
    }
    out
}

pub fn render(fragments: &[Fragment], options: &FormatOptions) -> String {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Open(tag) => {
                out.push('<');
                out.push_str(tag.name(&options.tags));
                out.push('>');
            }
            Fragment::Close(tag) => {
                out.push_str("</");
                out.push_str(tag.name(&options.tags));
                out.push('>');
            }
            Fragment::Text(text) if options.escape_html => out.push_str(&encode_text(text)),
            Fragment::Text(text) => out.push_str(text),
            Fragment::Image { src } => {
                out.push_str("<img src=\"");
                if options.escape_html {
                    out.push_str(&encode_double_quoted_attribute(src));
                } else {
                    out.push_str(src);
                }
                out.push_str("\" />");
            }
        }
    }
    out
}
