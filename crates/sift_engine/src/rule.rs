//! Rule trait and handler registration

use std::any::Any;

use thiserror::Error;

use sift_ast::NodeKind;
use sift_diagnostics::Category;

use crate::context::RuleContext;

/// A rule code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleCode(pub &'static str);

impl RuleCode {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failure raised by a rule callback.
///
/// A failing callback is a programming defect in the rule, not a runtime
/// condition to route around: the traversal short-circuits and the whole
/// run surfaces the error.
#[derive(Debug, Error)]
#[error("rule {code} failed: {message}")]
pub struct RuleError {
    pub code: &'static str,
    pub message: String,
}

impl RuleError {
    pub fn new(code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_str(),
            message: message.into(),
        }
    }
}

pub type RuleResult<T> = Result<T, RuleError>;

/// Traversal phase a handler fires in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the node's children are visited
    Enter,
    /// After all of the node's children have been visited
    Exit,
}

/// A per-node-kind callback. Receives the rule's own context and the node;
/// reads everything else (tree, oracle, options, data) through the context.
pub type Handler = fn(&mut RuleContext<'_>, sift_ast::NodeId) -> RuleResult<()>;

/// Ordered handler registrations of one rule.
///
/// Registration order is preserved all the way into the dispatch table, so
/// diagnostics stay reproducible across runs of the same rule set.
#[derive(Default)]
pub struct Visitor {
    handlers: Vec<(NodeKind, Phase, Handler)>,
}

impl Visitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(mut self, kind: NodeKind, handler: Handler) -> Self {
        self.handlers.push((kind, Phase::Enter, handler));
        self
    }

    pub fn on_exit(mut self, kind: NodeKind, handler: Handler) -> Self {
        self.handlers.push((kind, Phase::Exit, handler));
        self
    }

    pub fn handlers(&self) -> &[(NodeKind, Phase, Handler)] {
        &self.handlers
    }
}

/// A lint rule
///
/// Rules register per-node-kind callbacks through [`Rule::visitor`]; the
/// engine merges every active rule's registrations into one dispatch table
/// and walks the tree once. Stateful rules declare a fresh per-traversal
/// data cell via [`Rule::create_data`] and thread it across callbacks
/// through their context.
pub trait Rule: Send + Sync {
    /// The rule code (e.g., "SIFT001")
    fn code(&self) -> RuleCode;

    /// The rule category
    fn category(&self) -> Category;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Description of what this rule checks
    fn description(&self) -> &'static str;

    /// Normalize raw options into this rule's options value.
    ///
    /// Must be pure: the engine calls it once per rule instance per run and
    /// reuses the result for the whole traversal. Unrecognized or absent
    /// fields fall back to documented defaults.
    fn parse_options(&self, _raw: Option<&serde_json::Value>) -> Box<dyn Any> {
        Box::new(())
    }

    /// Fresh per-traversal state for stateful rules.
    fn create_data(&self) -> Option<Box<dyn Any>> {
        None
    }

    /// The rule's handler registrations.
    fn visitor(&self) -> Visitor;
}

/// A rule instance bound to its raw options.
///
/// The same rule may appear several times with different option sets; each
/// instance gets its own context and data cell.
pub struct ConfiguredRule {
    pub rule: Box<dyn Rule>,
    pub options: Option<serde_json::Value>,
}

impl ConfiguredRule {
    pub fn new(rule: Box<dyn Rule>) -> Self {
        Self {
            rule,
            options: None,
        }
    }

    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = Some(options);
        self
    }
}
