use sift_ast::{BinaryOp, LiteralValue, Node, NodeId, SyntaxTree, UnaryOp};
use sift_diagnostics::{Category, Change, Diagnostic, Suggestion};
use sift_semantic::TypeFlags;

use crate::context::RuleContext;
use crate::rule::{Rule, RuleCode, RuleResult, Visitor};

/// Flags `x.indexOf(y) !== -1` (and the `==`/`!=`/`===` variants) on
/// receivers that have a containment method, suggesting `x.includes(y)`.
pub struct PreferContains;

impl Rule for PreferContains {
    fn code(&self) -> RuleCode {
        RuleCode("SIFT001")
    }

    fn category(&self) -> Category {
        Category::Style
    }

    fn name(&self) -> &'static str {
        "PreferContains"
    }

    fn description(&self) -> &'static str {
        "Use a containment check instead of comparing `indexOf()` to -1"
    }

    fn visitor(&self) -> Visitor {
        Visitor::new().on_enter(sift_ast::NodeKind::BinaryExpression, check_comparison)
    }
}

fn is_minus_one(tree: &SyntaxTree, node: NodeId) -> bool {
    match tree.node(node) {
        Node::UnaryExpression { op: UnaryOp::Minus, operand } => matches!(
            tree.node(*operand),
            Node::Literal { value: LiteralValue::Number(n) } if *n == 1.0
        ),
        Node::Literal { value: LiteralValue::Number(n) } => *n == -1.0,
        _ => false,
    }
}

fn check_comparison(ctx: &mut RuleContext<'_>, node: NodeId) -> RuleResult<()> {
    let tree = ctx.tree();
    let Node::BinaryExpression { op, left, right } = tree.node(node) else {
        return Ok(());
    };

    // `!== -1` asks "contains", `=== -1` asks "does not contain"
    let negated = match op {
        BinaryOp::StrictNotEq | BinaryOp::NotEq => true,
        BinaryOp::StrictEq | BinaryOp::Eq => false,
        _ => return Ok(()),
    };

    if !is_minus_one(tree, *right) {
        return Ok(());
    }

    let Node::CallExpression { callee, arguments } = tree.node(*left) else {
        return Ok(());
    };
    if arguments.len() != 1 {
        return Ok(());
    }
    let Node::MemberExpression { object, property, property_span } = tree.node(*callee) else {
        return Ok(());
    };
    if property != "indexOf" {
        return Ok(());
    }

    // Only sequence-like receivers have a containment method. Oracle
    // silence means we cannot decide, therefore no report.
    let Some(receiver_ty) = ctx.oracle().type_of(*object) else {
        return Ok(());
    };
    let receiver_flags = ctx.oracle().flags(receiver_ty);
    if !receiver_flags.intersects(TypeFlags::STRING_LIKE | TypeFlags::OBJECT) {
        return Ok(());
    }

    let property_span = *property_span;
    let call_end = tree.span(*left).end;
    let cmp_span = tree.span(node);
    let location = ctx.location(cmp_span);
    let code = ctx.code();

    // The rewrite is cheap here, but suggestions stay deferred so consumers
    // that never apply fixes pay nothing.
    let suggestion = Suggestion::deferred("Replace with a containment check", move || {
        let mut changes = vec![
            Change::replace(property_span.start, property_span.end, "includes"),
            Change::delete(call_end, cmp_span.end),
        ];
        if !negated {
            changes.push(Change::insert(cmp_span.start, "!"));
        }
        changes
    });

    ctx.report(
        Diagnostic::style(
            code.as_str(),
            "Use `includes()` instead of comparing the result of `indexOf()` to -1",
            location,
        )
        .with_suggestion(suggestion),
    );
    Ok(())
}
