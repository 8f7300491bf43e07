//! Rule context - what a rule sees during one traversal

use std::any::Any;
use std::cell::RefCell;

use sift_ast::{NodeId, Span, SyntaxTree};
use sift_diagnostics::{Diagnostic, Location};
use sift_semantic::TypeOracle;

use crate::rule::{RuleCode, RuleError, RuleResult};

/// Shared, read-only view of the file under analysis.
pub(crate) struct SourceInfo<'a> {
    source: &'a str,
    file_path: &'a str,
    /// Line starts (byte offsets)
    line_starts: Vec<usize>,
}

impl<'a> SourceInfo<'a> {
    pub(crate) fn new(source: &'a str, file_path: &'a str) -> Self {
        // Pre-compute line starts for offset -> line/column conversion
        let mut line_starts = Vec::with_capacity(source.len() / 40 + 1);
        line_starts.push(0);
        for (i, c) in source.bytes().enumerate() {
            if c == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            source,
            file_path,
            line_starts,
        }
    }

    /// Convert a byte offset to line and column (1-indexed)
    pub(crate) fn offset_to_line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset as usize;

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        let column = offset - line_start + 1;

        ((line + 1) as u32, column as u32)
    }
}

/// Context provided to one rule instance for one traversal.
///
/// Every callback of that rule sees the same context: the normalized
/// options, the type oracle, the tree, and the rule-owned `data` cell.
/// Contexts are never shared between rules; isolation is structural.
pub struct RuleContext<'a> {
    code: RuleCode,
    options: Box<dyn Any>,
    data: Option<Box<dyn Any>>,
    tree: &'a SyntaxTree,
    oracle: &'a dyn TypeOracle,
    file: &'a SourceInfo<'a>,
    /// Traversal-wide collector, append-only through `report`
    sink: &'a RefCell<Vec<Diagnostic>>,
}

impl<'a> RuleContext<'a> {
    pub(crate) fn new(
        code: RuleCode,
        options: Box<dyn Any>,
        data: Option<Box<dyn Any>>,
        tree: &'a SyntaxTree,
        oracle: &'a dyn TypeOracle,
        file: &'a SourceInfo<'a>,
        sink: &'a RefCell<Vec<Diagnostic>>,
    ) -> Self {
        Self {
            code,
            options,
            data,
            tree,
            oracle,
            file,
            sink,
        }
    }

    /// The owning rule's code
    pub fn code(&self) -> RuleCode {
        self.code
    }

    /// The tree being traversed
    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    /// The type oracle
    pub fn oracle(&self) -> &'a dyn TypeOracle {
        self.oracle
    }

    /// The source code being analyzed
    pub fn source(&self) -> &'a str {
        self.file.source
    }

    /// The file path
    pub fn file_path(&self) -> &'a str {
        self.file.file_path
    }

    /// Source text covered by a node's span
    pub fn node_text(&self, node: NodeId) -> &'a str {
        self.tree.text(self.file.source, node)
    }

    /// Convert a byte offset to line and column (1-indexed)
    pub fn offset_to_line_col(&self, offset: u32) -> (u32, u32) {
        self.file.offset_to_line_col(offset)
    }

    /// Build a [`Location`] for a span in this file
    pub fn location(&self, span: Span) -> Location {
        let (line, column) = self.offset_to_line_col(span.start);
        Location::new(self.file.file_path, line, column, span.start, span.end)
    }

    /// Build a [`Location`] for a node
    pub fn location_of(&self, node: NodeId) -> Location {
        self.location(self.tree.span(node))
    }

    /// This rule's normalized options.
    pub fn options<T: 'static>(&self) -> RuleResult<&T> {
        self.options.downcast_ref::<T>().ok_or_else(|| {
            RuleError::new(self.code, "options downcast to the wrong type")
        })
    }

    /// Borrow the rule-owned data cell.
    pub fn data<T: 'static>(&self) -> RuleResult<&T> {
        self.data
            .as_deref()
            .and_then(|data| data.downcast_ref::<T>())
            .ok_or_else(|| RuleError::new(self.code, "data cell missing or of the wrong type"))
    }

    /// Mutably borrow the rule-owned data cell.
    pub fn data_mut<T: 'static>(&mut self) -> RuleResult<&mut T> {
        let code = self.code;
        self.data
            .as_deref_mut()
            .and_then(|data| data.downcast_mut::<T>())
            .ok_or_else(|| RuleError::new(code, "data cell missing or of the wrong type"))
    }

    /// Overwrite the data cell.
    pub fn set_data<T: 'static>(&mut self, value: T) {
        self.data = Some(Box::new(value));
    }

    /// Clear the data cell.
    pub fn clear_data(&mut self) {
        self.data = None;
    }

    /// Report a diagnostic.
    ///
    /// Valid any number of times from any callback, including zero.
    /// Ordering across rules is the order of the `report` calls themselves.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.sink.borrow_mut().push(diagnostic);
    }
}
