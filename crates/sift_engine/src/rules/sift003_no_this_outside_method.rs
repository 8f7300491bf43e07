use std::any::Any;

use sift_ast::NodeId;
use sift_diagnostics::{Category, Diagnostic};

use crate::context::RuleContext;
use crate::rule::{Rule, RuleCode, RuleResult, Visitor};

/// Per-traversal state: how many method bodies enclose the current node.
#[derive(Debug, Default)]
struct EnclosingMethods {
    depth: u32,
}

/// Flags `this` used outside a class method body.
///
/// The engine gives scope-boundary kinds no special treatment; the rule
/// tracks the enclosing method itself, pushing on enter and popping on the
/// matching exit.
pub struct NoThisOutsideMethod;

impl Rule for NoThisOutsideMethod {
    fn code(&self) -> RuleCode {
        RuleCode("SIFT003")
    }

    fn category(&self) -> Category {
        Category::Error
    }

    fn name(&self) -> &'static str {
        "NoThisOutsideMethod"
    }

    fn description(&self) -> &'static str {
        "`this` is only meaningful inside a class method"
    }

    fn create_data(&self) -> Option<Box<dyn Any>> {
        Some(Box::new(EnclosingMethods::default()))
    }

    fn visitor(&self) -> Visitor {
        Visitor::new()
            .on_enter(sift_ast::NodeKind::MethodDefinition, enter_method)
            .on_exit(sift_ast::NodeKind::MethodDefinition, exit_method)
            .on_enter(sift_ast::NodeKind::ThisExpression, check_this)
    }
}

fn enter_method(ctx: &mut RuleContext<'_>, _node: NodeId) -> RuleResult<()> {
    ctx.data_mut::<EnclosingMethods>()?.depth += 1;
    Ok(())
}

fn exit_method(ctx: &mut RuleContext<'_>, _node: NodeId) -> RuleResult<()> {
    ctx.data_mut::<EnclosingMethods>()?.depth -= 1;
    Ok(())
}

fn check_this(ctx: &mut RuleContext<'_>, node: NodeId) -> RuleResult<()> {
    if ctx.data::<EnclosingMethods>()?.depth > 0 {
        return Ok(());
    }
    let location = ctx.location_of(node);
    let code = ctx.code();
    ctx.report(Diagnostic::error(
        code.as_str(),
        "`this` used outside of a class method",
        location,
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_codes, run_single};
    use sift_ast::{Node, Span, SyntaxTree, TreeBuilder};
    use sift_semantic::NoTypeInfo;

    /// `class C { m() { this; } } this;`
    fn class_then_top_level_this() -> (SyntaxTree, String) {
        let source = "class C { m() { this; } } this;".to_string();
        let mut b = TreeBuilder::new();
        let inner_this = b.add(Node::ThisExpression, Span::new(16, 20));
        let inner_stmt = b.add(
            Node::ExpressionStatement { expression: inner_this },
            Span::new(16, 21),
        );
        let body = b.add(
            Node::BlockStatement { statements: vec![inner_stmt] },
            Span::new(14, 23),
        );
        let method = b.add(
            Node::MethodDefinition { name: "m".into(), params: vec![], body },
            Span::new(10, 23),
        );
        let class = b.add(
            Node::ClassDeclaration { name: "C".into(), members: vec![method] },
            Span::new(0, 25),
        );
        let outer_this = b.add(Node::ThisExpression, Span::new(26, 30));
        let outer_stmt = b.add(
            Node::ExpressionStatement { expression: outer_this },
            Span::new(26, 31),
        );
        let program = b.add(
            Node::Program { statements: vec![class, outer_stmt] },
            Span::new(0, 31),
        );
        (b.finish(program), source)
    }

    #[test]
    fn this_inside_a_method_is_fine_but_top_level_this_is_not() {
        let (tree, source) = class_then_top_level_this();
        let diagnostics =
            run_single(Box::new(NoThisOutsideMethod), &tree, &source, &NoTypeInfo);

        // Only the `this` after the class body, proving the exit handler
        // popped the method scope.
        assert_codes(&diagnostics, &["SIFT003"]);
        assert_eq!(diagnostics[0].location.start, 26);
    }

    #[test]
    fn bare_this_is_reported() {
        let source = "this;".to_string();
        let mut b = TreeBuilder::new();
        let this = b.add(Node::ThisExpression, Span::new(0, 4));
        let stmt = b.add(Node::ExpressionStatement { expression: this }, Span::new(0, 5));
        let program = b.add(Node::Program { statements: vec![stmt] }, Span::new(0, 5));
        let tree = b.finish(program);

        let diagnostics =
            run_single(Box::new(NoThisOutsideMethod), &tree, &source, &NoTypeInfo);
        assert_codes(&diagnostics, &["SIFT003"]);
    }
}
