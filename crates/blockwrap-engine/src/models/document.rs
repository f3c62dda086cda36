use crate::error::InvalidSelectionError;
use crate::models::Node;

/// Immutable snapshot of a document tree.
///
/// The root is a `doc` container. Positions address the gaps between
/// characters and tokens of the flattened tree, so they run from `0` to
/// `content_size()` inclusive:
///
/// ```text
///  0   1 2 3 4   5   6 7 8 9   10
///  <p> F o o </p> <p> B a r </p>
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Node,
}

/// A node together with the position directly before it
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub node: &'a Node,
    pub pos: usize,
}

impl NodeRef<'_> {
    /// Position directly after the node
    pub fn end(&self) -> usize {
        self.pos + self.node.node_size()
    }

    /// Position where the node's content starts
    pub fn content_start(&self) -> usize {
        self.pos + 1
    }
}

/// A position resolved against the tree: the innermost container holding it
/// and where that container's content starts and ends.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPos<'a> {
    pos: usize,
    depth: usize,
    parent: &'a Node,
    start: usize,
}

impl<'a> ResolvedPos<'a> {
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Nesting depth of the parent (0 for the document root)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> &'a Node {
        self.parent
    }

    /// Type name of the parent (`doc`, `paragraph`, `heading`, ...)
    pub fn parent_type(&self) -> &'a str {
        self.parent.kind().name()
    }

    /// Position where the parent's content starts
    pub fn start(&self) -> usize {
        self.start
    }

    /// Position where the parent's content ends
    pub fn end(&self) -> usize {
        self.start + self.parent.content_size()
    }

    /// Offset of the position within the parent's content
    pub fn parent_offset(&self) -> usize {
        self.pos - self.start
    }
}

impl Document {
    pub fn new(blocks: impl IntoIterator<Item = Node>) -> Self {
        Self {
            root: Node::other("doc", blocks),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn content_size(&self) -> usize {
        self.root.content_size()
    }

    pub fn check_position(&self, pos: usize) -> Result<(), InvalidSelectionError> {
        let size = self.content_size();
        if pos > size {
            return Err(InvalidSelectionError::OutOfBounds { pos, size });
        }
        Ok(())
    }

    /// Resolve a position to its innermost enclosing container
    pub fn resolve(&self, pos: usize) -> Result<ResolvedPos<'_>, InvalidSelectionError> {
        self.check_position(pos)?;

        let mut parent = &self.root;
        let mut start = 0;
        let mut depth = 0;
        while let Some((child_pos, child)) = parent
            .child_offsets(start)
            .find(|(p, c)| c.is_container() && *p < pos && pos < p + c.node_size())
        {
            parent = child;
            start = child_pos + 1;
            depth += 1;
        }

        Ok(ResolvedPos {
            pos,
            depth,
            parent,
            start,
        })
    }

    /// The node starting at `pos`, or the text node `pos` falls inside.
    ///
    /// Returns `None` at the end of a container's content, where no node follows.
    pub fn node_at(&self, pos: usize) -> Option<NodeRef<'_>> {
        let mut parent = &self.root;
        let mut start = 0;
        loop {
            let (child_pos, child) = parent
                .child_offsets(start)
                .find(|(p, c)| pos < p + c.node_size())?;
            if child_pos == pos || child.is_text() {
                return Some(NodeRef {
                    node: child,
                    pos: child_pos,
                });
            }
            if !child.is_container() {
                return None;
            }
            parent = child;
            start = child_pos + 1;
        }
    }

    /// All nodes overlapping `from..to`, in document order (parents before
    /// their children). The root itself is not included.
    pub fn nodes_between(&self, from: usize, to: usize) -> Vec<NodeRef<'_>> {
        let mut found = Vec::new();
        collect_between(&self.root, 0, from, to, &mut found);
        found
    }

    /// Text between two document positions, without block separators
    pub fn text_between(&self, from: usize, to: usize) -> String {
        self.root.text_between(from, to)
    }

    pub fn text_content(&self) -> String {
        self.root.text_content()
    }
}

fn collect_between<'a>(
    node: &'a Node,
    content_start: usize,
    from: usize,
    to: usize,
    found: &mut Vec<NodeRef<'a>>,
) {
    for (pos, child) in node.child_offsets(content_start) {
        if pos >= to {
            break;
        }
        if pos + child.node_size() <= from {
            continue;
        }
        found.push(NodeRef { node: child, pos });
        if child.is_container() && child.content_size() > 0 {
            collect_between(child, pos + 1, from, to, found);
        }
    }
}
