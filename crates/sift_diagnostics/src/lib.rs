//! Sift Diagnostics - Rule-independent diagnostic types
//!
//! This crate provides the diagnostic model rules report through, and the
//! patch engine that turns one suggestion's text edits into rewritten
//! source.

mod patch;

use std::fmt;

use sift_ast::{NodeId, Span};

pub use patch::{apply_changes, apply_suggestion, PatchError};

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// Category of a lint rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Likely bugs or errors
    Error,
    /// Potential issues or bad practices
    Warning,
    /// Style and readability issues
    Style,
    /// Performance improvements
    Performance,
    /// Information or unknown state (fallback)
    Info,
}

/// A location in source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File path
    pub file: String,
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column number
    pub column: u32,
    /// Byte offset start
    pub start: u32,
    /// Byte offset end
    pub end: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32, start: u32, end: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            start,
            end,
        }
    }
}

/// A single text edit within a suggestion.
///
/// Either anchored to a node (resolved to that node's full span by the patch
/// engine) or to an explicit, possibly zero-width, byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Replace a node's whole span
    ReplaceNode { node: NodeId, text: String },
    /// Replace an explicit half-open range
    ReplaceRange { start: u32, end: u32, text: String },
}

impl Change {
    pub fn replace(start: u32, end: u32, text: impl Into<String>) -> Self {
        Self::ReplaceRange {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn replace_len(start: u32, length: u32, text: impl Into<String>) -> Self {
        Self::replace(start, start + length, text)
    }

    /// Pure insertion at a position (zero-width range)
    pub fn insert(pos: u32, text: impl Into<String>) -> Self {
        Self::replace(pos, pos, text)
    }

    /// Delete a range
    pub fn delete(start: u32, end: u32) -> Self {
        Self::replace(start, end, "")
    }

    pub fn replace_node(node: NodeId, text: impl Into<String>) -> Self {
        Self::ReplaceNode {
            node,
            text: text.into(),
        }
    }

    pub fn new_text(&self) -> &str {
        match self {
            Change::ReplaceNode { text, .. } | Change::ReplaceRange { text, .. } => text,
        }
    }
}

enum ChangeSet {
    Ready(Vec<Change>),
    /// Computed on first request, so expensive rewrites cost nothing when a
    /// consumer never asks for fixes.
    Deferred(Box<dyn Fn() -> Vec<Change>>),
}

/// One independent, self-contained candidate fix for a diagnostic.
///
/// Applying one suggestion never implies applying another from the same
/// diagnostic; a consumer picks at most one per diagnostic per round.
pub struct Suggestion {
    /// Description of what this fix does
    pub message: String,
    changes: ChangeSet,
}

impl Suggestion {
    pub fn new(message: impl Into<String>, changes: Vec<Change>) -> Self {
        Self {
            message: message.into(),
            changes: ChangeSet::Ready(changes),
        }
    }

    /// A suggestion whose edits are produced on demand.
    pub fn deferred(
        message: impl Into<String>,
        changes: impl Fn() -> Vec<Change> + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            changes: ChangeSet::Deferred(Box::new(changes)),
        }
    }

    /// The edit list, computing it now if it was deferred.
    pub fn changes(&self) -> Vec<Change> {
        match &self.changes {
            ChangeSet::Ready(changes) => changes.clone(),
            ChangeSet::Deferred(thunk) => thunk(),
        }
    }
}

impl fmt::Debug for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let changes: &dyn fmt::Debug = match &self.changes {
            ChangeSet::Ready(changes) => changes,
            ChangeSet::Deferred(_) => &"<deferred>",
        };
        f.debug_struct("Suggestion")
            .field("message", &self.message)
            .field("changes", changes)
            .finish()
    }
}

/// A diagnostic reported by a rule
#[derive(Debug)]
pub struct Diagnostic {
    /// Rule code (e.g., "SIFT001")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Category
    pub category: Category,
    /// Location of the primary node
    pub location: Location,
    /// Candidate fixes, each independent of the others
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        category: Category,
        location: Location,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
            category,
            location,
            suggestions: Vec::new(),
        }
    }

    /// Add a suggestion to this diagnostic
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Create an error diagnostic
    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(code, message, Severity::Error, Category::Error, location)
    }

    /// Create a warning diagnostic
    pub fn warning(
        code: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(code, message, Severity::Warning, Category::Warning, location)
    }

    /// Create a style diagnostic
    pub fn style(
        code: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(code, message, Severity::Info, Category::Style, location)
    }

    /// Create a hint diagnostic
    pub fn hint(
        code: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(code, message, Severity::Hint, Category::Style, location)
    }

    pub fn span(&self) -> Span {
        Span::new(self.location.start, self.location.end)
    }
}
