use sift_ast::{
    BinaryOp, LiteralValue, Node, NodeId, Span, SyntaxTree, TreeBuilder, UnaryOp,
};
use sift_diagnostics::Diagnostic;
use sift_semantic::TypeOracle;

use crate::rule::{ConfiguredRule, Rule};
use crate::traversal::run_rules;

/// Run one rule with default options over a tree.
pub fn run_single(
    rule: Box<dyn Rule>,
    tree: &SyntaxTree,
    source: &str,
    oracle: &dyn TypeOracle,
) -> Vec<Diagnostic> {
    let rules = vec![ConfiguredRule::new(rule)];
    match run_rules(tree, source, "test.js", oracle, &rules) {
        Ok(diagnostics) => diagnostics,
        Err(e) => panic!("rule run failed: {e}"),
    }
}

/// Run one rule with raw options over a tree.
pub fn run_single_with_options(
    rule: Box<dyn Rule>,
    options: serde_json::Value,
    tree: &SyntaxTree,
    source: &str,
    oracle: &dyn TypeOracle,
) -> Vec<Diagnostic> {
    let rules = vec![ConfiguredRule::new(rule).with_options(options)];
    match run_rules(tree, source, "test.js", oracle, &rules) {
        Ok(diagnostics) => diagnostics,
        Err(e) => panic!("rule run failed: {e}"),
    }
}

pub fn assert_codes(diagnostics: &[Diagnostic], expected: &[&str]) {
    let codes: Vec<&str> = diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, expected, "diagnostic codes mismatch");
}

/// `{ x; 1; 2; }` - one block, one identifier, two literals.
pub fn trace_tree() -> (SyntaxTree, String) {
    let source = "{ x; 1; 2; }".to_string();
    let mut b = TreeBuilder::new();
    let x = b.add(Node::Identifier { name: "x".into() }, Span::new(2, 3));
    let x_stmt = b.add(Node::ExpressionStatement { expression: x }, Span::new(2, 4));
    let one = b.add(
        Node::Literal { value: LiteralValue::Number(1.0) },
        Span::new(5, 6),
    );
    let one_stmt = b.add(Node::ExpressionStatement { expression: one }, Span::new(5, 7));
    let two = b.add(
        Node::Literal { value: LiteralValue::Number(2.0) },
        Span::new(8, 9),
    );
    let two_stmt = b.add(Node::ExpressionStatement { expression: two }, Span::new(8, 10));
    let block = b.add(
        Node::BlockStatement { statements: vec![x_stmt, one_stmt, two_stmt] },
        Span::new(0, 12),
    );
    let program = b.add(Node::Program { statements: vec![block] }, Span::new(0, 12));
    (b.finish(program), source)
}

/// Key nodes of the `a.indexOf(b) !== -1;` fixture.
pub struct IndexOfFixture {
    pub tree: SyntaxTree,
    pub source: String,
    /// The `a` identifier (the call receiver)
    pub receiver: NodeId,
}

/// `a.indexOf(b) !== -1;` - the containment-check rewrite fixture.
pub fn index_of_fixture() -> IndexOfFixture {
    index_of_fixture_with_op(BinaryOp::StrictNotEq, "!==")
}

/// Same shape with a configurable comparison operator.
pub fn index_of_fixture_with_op(op: BinaryOp, op_text: &str) -> IndexOfFixture {
    //  a.indexOf(b) !== -1;
    //  0         1         2
    //  0123456789012345678901
    let source = format!("a.indexOf(b) {op_text} -1;");
    let cmp_start = 13;
    let rhs_start = cmp_start + op_text.len() as u32 + 1;

    let mut b = TreeBuilder::new();
    let receiver = b.add(Node::Identifier { name: "a".into() }, Span::new(0, 1));
    let member = b.add(
        Node::MemberExpression {
            object: receiver,
            property: "indexOf".into(),
            property_span: Span::new(2, 9),
        },
        Span::new(0, 9),
    );
    let arg = b.add(Node::Identifier { name: "b".into() }, Span::new(10, 11));
    let call = b.add(
        Node::CallExpression { callee: member, arguments: vec![arg] },
        Span::new(0, 12),
    );
    let one = b.add(
        Node::Literal { value: LiteralValue::Number(1.0) },
        Span::new(rhs_start + 1, rhs_start + 2),
    );
    let minus_one = b.add(
        Node::UnaryExpression { op: UnaryOp::Minus, operand: one },
        Span::new(rhs_start, rhs_start + 2),
    );
    let cmp = b.add(
        Node::BinaryExpression { op, left: call, right: minus_one },
        Span::new(0, rhs_start + 2),
    );
    let stmt = b.add(
        Node::ExpressionStatement { expression: cmp },
        Span::new(0, rhs_start + 3),
    );
    let program = b.add(
        Node::Program { statements: vec![stmt] },
        Span::new(0, rhs_start + 3),
    );

    IndexOfFixture {
        tree: b.finish(program),
        source,
        receiver,
    }
}
