use std::collections::BTreeMap;

/// Node attributes (`src` for images, ...)
pub type Attrs = BTreeMap<String, String>;

/// The kinds of node the formatter dispatches on.
///
/// Anything the formatter has no rule for is carried as `Other` with its type
/// name, so documents from newer editors still load and are simply skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Text,
    Paragraph,
    Heading,
    Image,
    Other(String),
}

impl NodeKind {
    /// Map an editor type name onto a kind
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => NodeKind::Text,
            "paragraph" => NodeKind::Paragraph,
            "heading" => NodeKind::Heading,
            "image" => NodeKind::Image,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// The editor type name for this kind
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Text => "text",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::Image => "image",
            NodeKind::Other(name) => name.as_str(),
        }
    }
}

/// Content of a node: a text payload, nothing at all, or child nodes
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    /// Text node payload. Occupies one position per character.
    Text(String),
    /// Atom such as an image. Occupies exactly one position.
    Leaf,
    /// Container. Occupies its content plus an opening and a closing token.
    Children(Vec<Node>),
}

/// A node of the document tree.
///
/// Nodes are immutable once built; the content size is computed at
/// construction so position arithmetic never re-walks subtrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    attrs: Attrs,
    content: NodeContent,
    content_size: usize,
}

/// An inline piece of a textblock's content
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Inline<'a> {
    Text(&'a str),
    Image(&'a Node),
}

impl Node {
    fn build(kind: NodeKind, content: NodeContent) -> Self {
        let content_size = match &content {
            NodeContent::Text(text) => text.chars().count(),
            NodeContent::Leaf => 0,
            NodeContent::Children(children) => children.iter().map(Node::node_size).sum(),
        };
        Self {
            kind,
            attrs: Attrs::new(),
            content,
            content_size,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::build(NodeKind::Text, NodeContent::Text(text.into()))
    }

    pub fn paragraph(children: impl IntoIterator<Item = Node>) -> Self {
        Self::build(
            NodeKind::Paragraph,
            NodeContent::Children(children.into_iter().collect()),
        )
    }

    pub fn heading(children: impl IntoIterator<Item = Node>) -> Self {
        Self::build(
            NodeKind::Heading,
            NodeContent::Children(children.into_iter().collect()),
        )
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self::build(NodeKind::Image, NodeContent::Leaf).with_attr("src", src)
    }

    /// A container of any other type (`doc`, `bulletList`, `codeBlock`, ...)
    pub fn other(name: &str, children: impl IntoIterator<Item = Node>) -> Self {
        Self::build(
            NodeKind::from_name(name),
            NodeContent::Children(children.into_iter().collect()),
        )
    }

    /// An atom of any other type (`hardBreak`, `horizontalRule`, ...)
    pub fn other_leaf(name: &str) -> Self {
        Self::build(NodeKind::from_name(name), NodeContent::Leaf)
    }

    /// Paragraph holding a single text run. Empty text yields an empty paragraph.
    pub fn paragraph_text(text: &str) -> Self {
        Self::paragraph(Self::text_run(text))
    }

    /// Heading holding a single text run. Empty text yields an empty heading.
    pub fn heading_text(text: &str) -> Self {
        Self::heading(Self::text_run(text))
    }

    fn text_run(text: &str) -> Option<Node> {
        (!text.is_empty()).then(|| Node::text(text))
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    pub fn children(&self) -> &[Node] {
        match &self.content {
            NodeContent::Children(children) => children,
            _ => &[],
        }
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children().first()
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, NodeContent::Text(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self.content, NodeContent::Children(_))
    }

    /// Whether the node holds inline content (text and inline atoms) directly.
    ///
    /// Paragraphs and headings always do, even when empty. Other containers
    /// qualify when they hold text and no child is itself a container.
    pub fn is_textblock(&self) -> bool {
        match (&self.kind, &self.content) {
            (NodeKind::Paragraph | NodeKind::Heading, NodeContent::Children(_)) => true,
            (NodeKind::Other(_), NodeContent::Children(children)) => {
                children.iter().any(Node::is_text) && children.iter().all(|c| !c.is_container())
            }
            _ => false,
        }
    }

    /// Size of the node's content in positions
    pub fn content_size(&self) -> usize {
        self.content_size
    }

    /// Number of positions the node occupies in its parent
    pub fn node_size(&self) -> usize {
        match self.content {
            NodeContent::Text(_) => self.content_size,
            NodeContent::Leaf => 1,
            NodeContent::Children(_) => self.content_size + 2,
        }
    }

    /// Children paired with the position each one starts at, given the
    /// position where this node's content starts.
    pub fn child_offsets(&self, content_start: usize) -> impl Iterator<Item = (usize, &Node)> {
        self.children()
            .iter()
            .scan(content_start, |offset, child| {
                let pos = *offset;
                *offset += child.node_size();
                Some((pos, child))
            })
    }

    /// All text of the node and its descendants, concatenated
    pub fn text_content(&self) -> String {
        match &self.content {
            NodeContent::Text(text) => text.clone(),
            NodeContent::Leaf => String::new(),
            NodeContent::Children(children) => children.iter().map(Node::text_content).collect(),
        }
    }

    /// Text between two offsets local to this node's content.
    ///
    /// Offsets past the content are clamped. Atoms contribute no text and no
    /// separator is inserted between blocks.
    pub fn text_between(&self, from: usize, to: usize) -> String {
        let mut out = String::new();
        self.collect_text(from, to.min(self.content_size), &mut out);
        out
    }

    fn collect_text(&self, from: usize, to: usize, out: &mut String) {
        if from >= to {
            return;
        }
        match &self.content {
            NodeContent::Text(text) => out.push_str(char_slice(text, from, to)),
            NodeContent::Leaf => {}
            NodeContent::Children(_) => {
                for (pos, child) in self.child_offsets(0) {
                    if pos >= to {
                        break;
                    }
                    if pos + child.node_size() <= from {
                        continue;
                    }
                    let base = if child.is_text() { pos } else { pos + 1 };
                    child.collect_text(
                        from.saturating_sub(base),
                        to.saturating_sub(base).min(child.content_size),
                        out,
                    );
                }
            }
        }
    }

    /// Direct inline children between two local offsets, in order.
    ///
    /// Text runs are sliced to the range; images are included when their
    /// single position falls inside it. Other atoms are dropped.
    pub fn inline_between(&self, from: usize, to: usize) -> Vec<Inline<'_>> {
        let mut pieces = Vec::new();
        for (pos, child) in self.child_offsets(0) {
            if pos >= to {
                break;
            }
            let end = pos + child.node_size();
            match (&child.kind, &child.content) {
                (_, NodeContent::Text(text)) if end > from => {
                    let slice = char_slice(text, from.saturating_sub(pos), to.min(end) - pos);
                    if !slice.is_empty() {
                        pieces.push(Inline::Text(slice));
                    }
                }
                (NodeKind::Image, NodeContent::Leaf) if pos >= from => {
                    pieces.push(Inline::Image(child));
                }
                _ => {}
            }
        }
        pieces
    }
}

/// Slice `text` by character offsets, clamping both ends to the text.
pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| text.char_indices().nth(n).map_or(text.len(), |(i, _)| i);
    let start_byte = byte_at(start);
    let end_byte = byte_at(end.max(start));
    &text[start_byte..end_byte]
}
