//! Sift Engine - single-pass rule dispatch and traversal
//!
//! This crate is the core of the analyzer:
//! 1. Every active rule registers per-node-kind callbacks ([`Visitor`])
//! 2. The [`DispatchTable`] merges all registrations into one lookup
//! 3. One depth-first walk fires enter/exit callbacks per node
//! 4. Rules consult the type oracle through their [`RuleContext`] and
//!    report diagnostics, optionally carrying fix suggestions
//!
//! Rules never communicate with each other: each instance owns its context
//! and data cell, and only the diagnostic collector is shared.

mod context;
mod dispatch;
mod rule;
pub mod rules;
#[cfg(test)]
pub mod test_utils;
mod traversal;

pub use context::RuleContext;
pub use dispatch::{DispatchTable, RuleId};
pub use rule::{
    ConfiguredRule, Handler, Phase, Rule, RuleCode, RuleError, RuleResult, Visitor,
};
pub use traversal::run_rules;

pub use sift_diagnostics::{
    apply_changes, apply_suggestion, Category, Change, Diagnostic, Location, PatchError,
    Severity, Suggestion,
};

use sift_ast::SyntaxTree;
use sift_semantic::TypeOracle;

/// Run every built-in rule with default options over one tree.
pub fn run_default_rules(
    tree: &SyntaxTree,
    source: &str,
    file_path: &str,
    oracle: &dyn TypeOracle,
) -> RuleResult<Vec<Diagnostic>> {
    let rules: Vec<ConfiguredRule> = rules::all_rules()
        .into_iter()
        .map(ConfiguredRule::new)
        .collect();
    run_rules(tree, source, file_path, oracle, &rules)
}
