use sift_ast::{AssignOp, Node, NodeId};
use sift_diagnostics::{Category, Diagnostic};
use sift_semantic::TypeFlags;

use crate::context::RuleContext;
use crate::rule::{Rule, RuleCode, RuleResult, Visitor};

/// Flags assignments that launder `any` into a typed slot, and assignments
/// the oracle knows to be type-incompatible.
pub struct UnsafeAssignment;

impl Rule for UnsafeAssignment {
    fn code(&self) -> RuleCode {
        RuleCode("SIFT004")
    }

    fn category(&self) -> Category {
        Category::Error
    }

    fn name(&self) -> &'static str {
        "UnsafeAssignment"
    }

    fn description(&self) -> &'static str {
        "Assignments must not defeat the declared type of their target"
    }

    fn visitor(&self) -> Visitor {
        Visitor::new().on_enter(sift_ast::NodeKind::AssignmentExpression, check_assignment)
    }
}

fn check_assignment(ctx: &mut RuleContext<'_>, node: NodeId) -> RuleResult<()> {
    let tree = ctx.tree();
    let Node::AssignmentExpression { op: AssignOp::Assign, target, value } = tree.node(node)
    else {
        return Ok(());
    };

    let oracle = ctx.oracle();
    // Either side without type information means we cannot decide.
    let Some(value_ty) = oracle.narrowed_type_of(*value) else {
        return Ok(());
    };
    let Some(target_ty) = oracle.type_of(*target) else {
        return Ok(());
    };

    let value_flags = oracle.flags(value_ty);
    let target_flags = oracle.flags(target_ty);

    let location = ctx.location(tree.span(node));
    let code = ctx.code();

    if value_flags.contains(TypeFlags::ANY) {
        if !target_flags.intersects(TypeFlags::ANY | TypeFlags::UNKNOWN) {
            let target_name = oracle.display(target_ty);
            ctx.report(Diagnostic::error(
                code.as_str(),
                format!("Unsafe assignment of an `any` value to `{target_name}`"),
                location,
            ));
        }
        return Ok(());
    }

    if !oracle.is_assignable(value_ty, target_ty) {
        let value_name = oracle.display(value_ty);
        let target_name = oracle.display(target_ty);
        ctx.report(Diagnostic::error(
            code.as_str(),
            format!("Type `{value_name}` is not assignable to `{target_name}`"),
            location,
        ));
    }
    Ok(())
}
