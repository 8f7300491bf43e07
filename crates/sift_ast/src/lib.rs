//! Sift AST - Syntax tree data model
//!
//! This crate provides the immutable syntax tree the analysis engine
//! traverses: node payloads as a closed tagged union, spans, parent links,
//! and a builder for constructing trees (parsing itself lives upstream).

mod node;
mod span;
mod tree;

pub use node::{
    AssignOp, BinaryOp, LiteralValue, LogicalOp, Node, NodeKind, UnaryOp,
};
pub use span::Span;
pub use tree::{NodeId, SyntaxTree, TreeBuilder};
