//! Arena-backed syntax tree with parent links
//!
//! Nodes live in one flat `Vec` and reference each other by [`NodeId`], so
//! parent links are plain indices rather than back-pointers. A tree is
//! immutable once [`TreeBuilder::finish`] returns it.

use smallvec::SmallVec;

use crate::node::{Node, NodeKind};
use crate::span::Span;

/// Unique identifier for a node within one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeEntry {
    node: Node,
    span: Span,
    parent: Option<NodeId>,
}

/// An immutable syntax tree.
///
/// The engine never mutates a tree; rules borrow it shared for the whole
/// traversal.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    entries: Vec<NodeEntry>,
    root: NodeId,
}

impl SyntaxTree {
    /// The top-level node (always a `Program`).
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get a node's payload.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.entries[id.index()].node
    }

    /// Get a node's kind.
    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.entries[id.index()].node.kind()
    }

    /// Get a node's source span.
    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.entries[id.index()].span
    }

    /// Get a node's parent, `None` for the root.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries[id.index()].parent
    }

    /// Child nodes in source order.
    #[inline]
    pub fn children(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        self.entries[id.index()].node.children()
    }

    /// Slice the source text covered by a node's span.
    pub fn text<'s>(&self, source: &'s str, id: NodeId) -> &'s str {
        let span = self.span(id);
        &source[span.start as usize..span.end as usize]
    }
}

/// Builds a [`SyntaxTree`] bottom-up.
///
/// Children are added before their parent; adding a parent records the
/// parent link on each child. Used by test fixtures and by whatever frontend
/// produces trees for the engine.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    entries: Vec<NodeEntry>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. All of its children must already be in the builder and
    /// must not yet have a parent.
    pub fn add(&mut self, node: Node, span: Span) -> NodeId {
        let id = NodeId::new(self.entries.len() as u32);
        for child in node.children() {
            debug_assert!(
                self.entries[child.index()].parent.is_none(),
                "node {:?} already has a parent",
                child
            );
            self.entries[child.index()].parent = Some(id);
        }
        self.entries.push(NodeEntry {
            node,
            span,
            parent: None,
        });
        id
    }

    /// Finish the tree with `root` as its top-level node.
    pub fn finish(self, root: NodeId) -> SyntaxTree {
        debug_assert!(self.entries[root.index()].parent.is_none());
        SyntaxTree {
            entries: self.entries,
            root,
        }
    }
}
