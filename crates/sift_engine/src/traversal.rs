//! Single-pass depth-first traversal
//!
//! One walk over the tree serves every active rule: at each node the
//! dispatch table's enter handlers fire in registration order, children are
//! visited in source order, then the exit handlers fire. No node is ever
//! visited twice. A handler returning `Err` short-circuits the remaining
//! walk and the whole run fails; there is no partial-results mode.

use std::cell::RefCell;

use sift_ast::{NodeId, SyntaxTree};
use sift_diagnostics::Diagnostic;
use sift_semantic::TypeOracle;

use crate::context::{RuleContext, SourceInfo};
use crate::dispatch::DispatchTable;
use crate::rule::{ConfiguredRule, Rule as _, RuleResult};

struct Traversal<'a> {
    tree: &'a SyntaxTree,
    table: DispatchTable,
    contexts: Vec<RuleContext<'a>>,
}

impl<'a> Traversal<'a> {
    fn visit(&mut self, node: NodeId) -> RuleResult<()> {
        let kind = self.tree.kind(node);

        for &(rule, handler) in self.table.enter_handlers(kind) {
            handler(&mut self.contexts[rule.index()], node)?;
        }

        for child in self.tree.children(node) {
            self.visit(child)?;
        }

        for &(rule, handler) in self.table.exit_handlers(kind) {
            handler(&mut self.contexts[rule.index()], node)?;
        }

        Ok(())
    }
}

/// Run an ordered list of rule instances over one tree.
///
/// Each instance gets its own context (normalized options, fresh data cell);
/// all of them share the traversal and the diagnostic collector. Diagnostics
/// come back in `report`-call order, which is determined by traversal order
/// and handler-registration order and therefore reproducible.
pub fn run_rules(
    tree: &SyntaxTree,
    source: &str,
    file_path: &str,
    oracle: &dyn TypeOracle,
    rules: &[ConfiguredRule],
) -> RuleResult<Vec<Diagnostic>> {
    let info = SourceInfo::new(source, file_path);
    let sink = RefCell::new(Vec::with_capacity(16));

    let mut visitors = Vec::with_capacity(rules.len());
    let mut contexts = Vec::with_capacity(rules.len());
    for configured in rules {
        let options = configured.rule.parse_options(configured.options.as_ref());
        let data = configured.rule.create_data();
        contexts.push(RuleContext::new(
            configured.rule.code(),
            options,
            data,
            tree,
            oracle,
            &info,
            &sink,
        ));
        visitors.push(configured.rule.visitor());
    }

    let table = DispatchTable::build(&visitors);
    let mut traversal = Traversal {
        tree,
        table,
        contexts,
    };
    traversal.visit(tree.root())?;

    drop(traversal);
    Ok(sink.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Rule, RuleCode, RuleError, Visitor};
    use crate::test_utils::trace_tree;
    use sift_diagnostics::Category;
    use sift_semantic::NoTypeInfo;
    use std::any::Any;

    // Reports one hint per event so tests can read the event order back out
    // of the shared collector.
    struct TraceBlocks;

    fn trace(ctx: &mut RuleContext<'_>, node: NodeId, what: &str) {
        let location = ctx.location_of(node);
        let code = ctx.code();
        ctx.report(Diagnostic::hint(code.as_str(), what, location));
    }

    fn trace_block_enter(ctx: &mut RuleContext<'_>, node: NodeId) -> RuleResult<()> {
        trace(ctx, node, "enter block");
        Ok(())
    }

    fn trace_block_exit(ctx: &mut RuleContext<'_>, node: NodeId) -> RuleResult<()> {
        trace(ctx, node, "exit block");
        Ok(())
    }

    fn trace_literal(ctx: &mut RuleContext<'_>, node: NodeId) -> RuleResult<()> {
        trace(ctx, node, "literal");
        Ok(())
    }

    impl Rule for TraceBlocks {
        fn code(&self) -> RuleCode {
            RuleCode("TRACE")
        }

        fn category(&self) -> Category {
            Category::Info
        }

        fn name(&self) -> &'static str {
            "TraceBlocks"
        }

        fn description(&self) -> &'static str {
            "Records block enter/exit order"
        }

        fn visitor(&self) -> Visitor {
            Visitor::new()
                .on_enter(sift_ast::NodeKind::BlockStatement, trace_block_enter)
                .on_exit(sift_ast::NodeKind::BlockStatement, trace_block_exit)
                .on_enter(sift_ast::NodeKind::Literal, trace_literal)
        }
    }

    // Stateful rule: counts identifiers in its data cell, reports the total
    // on program exit. Two instances must not see each other's counts.
    struct CountIdentifiers;

    fn count_identifier(ctx: &mut RuleContext<'_>, _node: NodeId) -> RuleResult<()> {
        *ctx.data_mut::<u32>()? += 1;
        Ok(())
    }

    fn report_count(ctx: &mut RuleContext<'_>, node: NodeId) -> RuleResult<()> {
        let count = *ctx.data::<u32>()?;
        let location = ctx.location_of(node);
        let code = ctx.code();
        ctx.report(Diagnostic::hint(code.as_str(), format!("{count}"), location));
        Ok(())
    }

    impl Rule for CountIdentifiers {
        fn code(&self) -> RuleCode {
            RuleCode("COUNT")
        }

        fn category(&self) -> Category {
            Category::Info
        }

        fn name(&self) -> &'static str {
            "CountIdentifiers"
        }

        fn description(&self) -> &'static str {
            "Counts identifier nodes per traversal"
        }

        fn create_data(&self) -> Option<Box<dyn Any>> {
            Some(Box::new(0u32))
        }

        fn visitor(&self) -> Visitor {
            Visitor::new()
                .on_enter(sift_ast::NodeKind::Identifier, count_identifier)
                .on_exit(sift_ast::NodeKind::Program, report_count)
        }
    }

    struct FailOnLiteral;

    fn fail_literal(ctx: &mut RuleContext<'_>, _node: NodeId) -> RuleResult<()> {
        Err(RuleError::new(ctx.code(), "boom"))
    }

    impl Rule for FailOnLiteral {
        fn code(&self) -> RuleCode {
            RuleCode("FAIL")
        }

        fn category(&self) -> Category {
            Category::Error
        }

        fn name(&self) -> &'static str {
            "FailOnLiteral"
        }

        fn description(&self) -> &'static str {
            "Fails on the first literal"
        }

        fn visitor(&self) -> Visitor {
            Visitor::new().on_enter(sift_ast::NodeKind::Literal, fail_literal)
        }
    }

    fn messages(diagnostics: &[Diagnostic]) -> Vec<String> {
        diagnostics
            .iter()
            .map(|d| format!("{}:{}", d.code, d.message))
            .collect()
    }

    #[test]
    fn exit_fires_after_all_descendants() {
        let (tree, source) = trace_tree();
        let rules = vec![ConfiguredRule::new(Box::new(TraceBlocks))];
        let diagnostics = run_rules(&tree, &source, "test.js", &NoTypeInfo, &rules).unwrap();

        assert_eq!(
            messages(&diagnostics),
            vec![
                "TRACE:enter block",
                "TRACE:literal",
                "TRACE:literal",
                "TRACE:exit block",
            ]
        );
    }

    #[test]
    fn every_occurrence_dispatches_exactly_once_per_rule() {
        let (tree, source) = trace_tree();
        let rules = vec![
            ConfiguredRule::new(Box::new(TraceBlocks)),
            ConfiguredRule::new(Box::new(TraceBlocks)),
        ];
        let diagnostics = run_rules(&tree, &source, "test.js", &NoTypeInfo, &rules).unwrap();

        // Two instances, interleaved per node in registration order.
        assert_eq!(
            messages(&diagnostics),
            vec![
                "TRACE:enter block",
                "TRACE:enter block",
                "TRACE:literal",
                "TRACE:literal",
                "TRACE:literal",
                "TRACE:literal",
                "TRACE:exit block",
                "TRACE:exit block",
            ]
        );
    }

    #[test]
    fn data_cells_are_isolated_between_instances() {
        let (tree, source) = trace_tree();

        let alone = run_rules(
            &tree,
            &source,
            "test.js",
            &NoTypeInfo,
            &[ConfiguredRule::new(Box::new(CountIdentifiers))],
        )
        .unwrap();
        assert_eq!(messages(&alone), vec!["COUNT:1"]);

        let together = run_rules(
            &tree,
            &source,
            "test.js",
            &NoTypeInfo,
            &[
                ConfiguredRule::new(Box::new(CountIdentifiers)),
                ConfiguredRule::new(Box::new(CountIdentifiers)),
            ],
        )
        .unwrap();
        // Both instances report the same count: neither saw the other's cell.
        assert_eq!(messages(&together), vec!["COUNT:1", "COUNT:1"]);
    }

    #[test]
    fn failing_handler_aborts_the_whole_run() {
        let (tree, source) = trace_tree();
        let rules = vec![
            ConfiguredRule::new(Box::new(TraceBlocks)),
            ConfiguredRule::new(Box::new(FailOnLiteral)),
        ];
        let err = run_rules(&tree, &source, "test.js", &NoTypeInfo, &rules).unwrap_err();
        assert_eq!(err.code, "FAIL");
    }

    #[test]
    fn running_a_rule_alongside_others_does_not_change_its_output() {
        use crate::rules::{NoThisOutsideMethod, PreferContains, UnsafeAssignment};
        use crate::test_utils::index_of_fixture;
        use sift_semantic::{Database, TypeFlags};

        let fixture = index_of_fixture();
        let db = Database::new();
        let string = db.define_type("string", TypeFlags::STRING_LIKE);
        db.set_node_type(fixture.receiver, string);

        let alone = run_rules(
            &fixture.tree,
            &fixture.source,
            "test.js",
            &db,
            &[ConfiguredRule::new(Box::new(PreferContains))],
        )
        .unwrap();

        let together = run_rules(
            &fixture.tree,
            &fixture.source,
            "test.js",
            &db,
            &[
                ConfiguredRule::new(Box::new(NoThisOutsideMethod)),
                ConfiguredRule::new(Box::new(PreferContains)),
                ConfiguredRule::new(Box::new(UnsafeAssignment)),
            ],
        )
        .unwrap();

        let alone: Vec<_> = alone.iter().map(|d| (&d.code, &d.message)).collect();
        let together: Vec<_> = together
            .iter()
            .filter(|d| d.code == "SIFT001")
            .map(|d| (&d.code, &d.message))
            .collect();
        assert_eq!(alone, together);
    }

    #[test]
    fn rules_without_matching_kinds_stay_silent() {
        let (tree, source) = trace_tree();
        // FunctionDeclaration never occurs in the fixture tree.
        struct NeverFires;
        fn handler(ctx: &mut RuleContext<'_>, node: NodeId) -> RuleResult<()> {
            trace(ctx, node, "should not happen");
            Ok(())
        }
        impl Rule for NeverFires {
            fn code(&self) -> RuleCode {
                RuleCode("NEVER")
            }
            fn category(&self) -> Category {
                Category::Info
            }
            fn name(&self) -> &'static str {
                "NeverFires"
            }
            fn description(&self) -> &'static str {
                "Registers a kind absent from the tree"
            }
            fn visitor(&self) -> Visitor {
                Visitor::new().on_enter(sift_ast::NodeKind::FunctionDeclaration, handler)
            }
        }

        let rules = vec![ConfiguredRule::new(Box::new(NeverFires))];
        let diagnostics = run_rules(&tree, &source, "test.js", &NoTypeInfo, &rules).unwrap();
        assert!(diagnostics.is_empty());
    }
}
