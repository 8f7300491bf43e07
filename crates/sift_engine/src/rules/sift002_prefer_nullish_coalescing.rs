use std::any::Any;

use serde::Deserialize;

use sift_ast::{LogicalOp, Node, NodeId, SyntaxTree};
use sift_diagnostics::{Category, Change, Diagnostic, Suggestion};
use sift_semantic::TypeFlags;

use crate::context::RuleContext;
use crate::rule::{Rule, RuleCode, RuleResult, Visitor};

/// Primitive kinds exempted from the rule when they appear in the left
/// operand's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct IgnorePrimitives {
    pub string: bool,
    pub number: bool,
    pub boolean: bool,
    pub bigint: bool,
}

impl IgnorePrimitives {
    pub const fn all() -> Self {
        Self {
            string: true,
            number: true,
            boolean: true,
            bigint: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            string: false,
            number: false,
            boolean: false,
            bigint: false,
        }
    }
}

/// Normalized options of [`PreferNullishCoalescing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullishOptions {
    /// Skip `||` used directly as an `if`/ternary condition
    pub ignore_conditional_tests: bool,
    pub ignore_primitives: IgnorePrimitives,
}

impl Default for NullishOptions {
    fn default() -> Self {
        Self {
            ignore_conditional_tests: true,
            ignore_primitives: IgnorePrimitives::none(),
        }
    }
}

/// Raw options as users write them. `ignore_primitives` accepts either a
/// bare boolean (expanding to every sub-flag) or per-kind flags.
#[derive(Deserialize)]
#[serde(default)]
struct RawOptions {
    ignore_conditional_tests: bool,
    ignore_primitives: RawIgnorePrimitives,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            ignore_conditional_tests: true,
            ignore_primitives: RawIgnorePrimitives::PerKind(IgnorePrimitives::none()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIgnorePrimitives {
    Grouped(bool),
    PerKind(IgnorePrimitives),
}

/// Flags `a || b` defaults where the left operand may be nullish,
/// suggesting the `??` operator instead.
pub struct PreferNullishCoalescing;

impl Rule for PreferNullishCoalescing {
    fn code(&self) -> RuleCode {
        RuleCode("SIFT002")
    }

    fn category(&self) -> Category {
        Category::Warning
    }

    fn name(&self) -> &'static str {
        "PreferNullishCoalescing"
    }

    fn description(&self) -> &'static str {
        "Use `??` instead of `||` when only nullish values should fall through"
    }

    fn parse_options(&self, raw: Option<&serde_json::Value>) -> Box<dyn Any> {
        let raw: RawOptions = raw
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default();
        let ignore_primitives = match raw.ignore_primitives {
            RawIgnorePrimitives::Grouped(true) => IgnorePrimitives::all(),
            RawIgnorePrimitives::Grouped(false) => IgnorePrimitives::none(),
            RawIgnorePrimitives::PerKind(per_kind) => per_kind,
        };
        Box::new(NullishOptions {
            ignore_conditional_tests: raw.ignore_conditional_tests,
            ignore_primitives,
        })
    }

    fn visitor(&self) -> Visitor {
        Visitor::new().on_enter(sift_ast::NodeKind::LogicalExpression, check_logical)
    }
}

fn is_conditional_test(tree: &SyntaxTree, node: NodeId) -> bool {
    match tree.parent(node).map(|parent| tree.node(parent)) {
        Some(Node::IfStatement { condition, .. })
        | Some(Node::ConditionalExpression { condition, .. }) => *condition == node,
        _ => false,
    }
}

fn ignored_primitive(flags: TypeFlags, ignore: IgnorePrimitives) -> bool {
    (ignore.string && flags.contains(TypeFlags::STRING_LIKE))
        || (ignore.number && flags.contains(TypeFlags::NUMBER_LIKE))
        || (ignore.boolean && flags.contains(TypeFlags::BOOLEAN_LIKE))
        || (ignore.bigint && flags.contains(TypeFlags::BIGINT_LIKE))
}

fn check_logical(ctx: &mut RuleContext<'_>, node: NodeId) -> RuleResult<()> {
    let tree = ctx.tree();
    let Node::LogicalExpression { op: LogicalOp::Or, left, right } = tree.node(node) else {
        return Ok(());
    };

    let options = *ctx.options::<NullishOptions>()?;
    if options.ignore_conditional_tests && is_conditional_test(tree, node) {
        return Ok(());
    }

    let Some(left_ty) = ctx.oracle().narrowed_type_of(*left) else {
        return Ok(());
    };
    let flags = ctx.oracle().flags(left_ty);
    if !flags.contains(TypeFlags::NULLISH) {
        return Ok(());
    }
    if ignored_primitive(flags, options.ignore_primitives) {
        return Ok(());
    }

    // The `||` token sits between the operands.
    let left_end = tree.span(*left).end;
    let right_start = tree.span(*right).start;
    let gap = &ctx.source()[left_end as usize..right_start as usize];
    let Some(pos) = gap.find("||") else {
        return Ok(());
    };
    let op_start = left_end + pos as u32;

    let location = ctx.location(tree.span(node));
    let code = ctx.code();
    ctx.report(
        Diagnostic::warning(
            code.as_str(),
            "Prefer `??` over `||` when the left operand may be nullish",
            location,
        )
        .with_suggestion(Suggestion::new(
            "Replace `||` with `??`",
            vec![Change::replace(op_start, op_start + 2, "??")],
        )),
    );
    Ok(())
}
