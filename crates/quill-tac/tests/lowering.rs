// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lowering tests over hand-built ASTs. These assert the ordering
//! guarantees of the output, not its exact byte layout.

use pretty_assertions::assert_eq;
use quill_ast::{BinOp, Expr, ExprKind, Program, Span, Stmt, StmtKind, UnaryOp};
use quill_tac::lower_program;

fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::DUMMY)
}

fn stmt(kind: StmtKind) -> Stmt {
    Stmt::new(kind, Span::DUMMY)
}

fn int(n: i64) -> Expr {
    expr(ExprKind::Int(n))
}

fn ident(name: &str) -> Expr {
    expr(ExprKind::Ident(name.to_string()))
}

fn bin(op: BinOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn paren(inner: Expr) -> Expr {
    expr(ExprKind::Paren(Box::new(inner)))
}

fn assign(name: &str, value: Expr) -> Stmt {
    stmt(StmtKind::Assign {
        name: name.to_string(),
        value,
    })
}

fn program(stmts: Vec<Stmt>) -> Program {
    Program { stmts }
}

/// Index of `needle` in `haystack`, with a readable panic.
fn pos(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("`{}` not found in:\n{}", needle, haystack))
}

#[test]
fn simple_statements_pass_through() {
    let out = lower_program(&program(vec![
        assign("a", int(1)),
        assign("b", ident("a")),
    ]));
    assert_eq!(out, "a = 1;\nb = a;\n");
}

#[test]
fn compound_expression_becomes_a_hoisted_temporary() {
    let out = lower_program(&program(vec![assign(
        "x",
        bin(BinOp::Add, int(2), int(3)),
    )]));
    assert_eq!(out, "__t0 = 2 + 3;\nx = __t0;\n");
}

#[test]
fn dependencies_are_emitted_before_dependents() {
    // x = (a + b) * c
    let out = lower_program(&program(vec![assign(
        "x",
        bin(
            BinOp::Mul,
            paren(bin(BinOp::Add, ident("a"), ident("b"))),
            ident("c"),
        ),
    )]));

    let sum = pos(&out, "__t0 = a + b");
    let product = pos(&out, "__t1 = __t0 * c");
    let store = pos(&out, "x = __t1");
    assert!(sum < product);
    assert!(product < store);
    assert_eq!(out.matches("__t0 = a + b").count(), 1);
}

#[test]
fn right_associative_chain_lowers_inner_first() {
    // 10 - 5 - 2 arrives as 10 - (5 - 2): the inner difference is the
    // older temporary and must be emitted first.
    let out = lower_program(&program(vec![assign(
        "x",
        bin(BinOp::Sub, int(10), bin(BinOp::Sub, int(5), int(2))),
    )]));

    let inner = pos(&out, "__t0 = 5 - 2");
    let outer = pos(&out, "__t1 = 10 - __t0");
    assert!(inner < outer);
    assert!(outer < pos(&out, "x = __t1"));
}

#[test]
fn unary_operand_is_a_dependency() {
    // x = -(a + b)
    let out = lower_program(&program(vec![assign(
        "x",
        expr(ExprKind::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(paren(bin(BinOp::Add, ident("a"), ident("b")))),
        }),
    )]));

    assert!(pos(&out, "__t0 = a + b") < pos(&out, "__t1 = -__t0"));
    assert!(pos(&out, "__t1 = -__t0") < pos(&out, "x = __t1"));
}

#[test]
fn writeln_hoists_its_expression() {
    let out = lower_program(&program(vec![stmt(StmtKind::Output(bin(
        BinOp::Add,
        ident("a"),
        int(1),
    )))]));
    assert_eq!(out, "__t0 = a + 1;\nwriteln(__t0);\n");
}

#[test]
fn condition_temporaries_precede_the_if() {
    let out = lower_program(&program(vec![stmt(StmtKind::If {
        cond: bin(BinOp::Lt, ident("a"), ident("b")),
        then_branch: Box::new(stmt(StmtKind::Block(vec![assign("x", int(1))]))),
        else_branch: Some(Box::new(stmt(StmtKind::Block(vec![assign("x", int(2))])))),
    })]));

    assert!(pos(&out, "__t0 = a < b") < pos(&out, "if (__t0) then begin"));
    assert!(pos(&out, "else begin") > pos(&out, "if (__t0)"));
}

#[test]
fn loop_condition_stays_as_source_text() {
    let out = lower_program(&program(vec![stmt(StmtKind::Loop {
        cond: bin(BinOp::Lt, ident("i"), int(3)),
        body: Box::new(stmt(StmtKind::Block(vec![assign(
            "i",
            bin(BinOp::Add, ident("i"), int(1)),
        )]))),
    })]));

    // The re-tested condition is reproduced verbatim, not hoisted.
    assert!(out.contains("loop if (i < 3) begin"));
    assert!(pos(&out, "__t0 = i + 1") < pos(&out, "i = __t0"));
}

#[test]
fn blocks_absorb_their_statements_hoists() {
    let out = lower_program(&program(vec![stmt(StmtKind::Block(vec![
        assign("x", bin(BinOp::Add, int(1), int(2))),
        stmt(StmtKind::Output(ident("x"))),
    ]))]));
    assert_eq!(out, "begin\n__t0 = 1 + 2;\nx = __t0;\nwriteln(x);\nend;\n");
}

#[test]
fn function_definition_carries_signature_and_lowered_body() {
    let out = lower_program(&program(vec![stmt(StmtKind::FnDef {
        name: "double".to_string(),
        params: vec!["n".to_string()],
        body: Box::new(stmt(StmtKind::Block(vec![stmt(StmtKind::Return(bin(
            BinOp::Mul,
            ident("n"),
            int(2),
        )))]))),
    })]));

    assert!(out.starts_with("function double(n) begin\n"));
    assert!(pos(&out, "__t0 = n * 2") < pos(&out, "return __t0"));
}

#[test]
fn function_declaration_lowers_to_a_signature() {
    let out = lower_program(&program(vec![stmt(StmtKind::FnDecl {
        name: "f".to_string(),
        params: vec!["a".to_string(), "b".to_string()],
    })]));
    assert_eq!(out, "function f(a, b);\n");
}

#[test]
fn call_arguments_hoist_left_to_right_before_the_call() {
    // writeln(f(a + 1, b + 2))
    let out = lower_program(&program(vec![stmt(StmtKind::Output(expr(
        ExprKind::Call {
            name: "f".to_string(),
            args: vec![
                bin(BinOp::Add, ident("a"), int(1)),
                bin(BinOp::Add, ident("b"), int(2)),
            ],
        },
    )))]));

    let first = pos(&out, "__t0 = a + 1");
    let second = pos(&out, "__t1 = b + 2");
    let call = pos(&out, "writeln(f(__t0, __t1))");
    assert!(first < second);
    assert!(second < call);
}

#[test]
fn each_temporary_is_emitted_exactly_once() {
    // Two statements, three temporaries; every assignment appears once.
    let out = lower_program(&program(vec![
        assign("x", bin(BinOp::Add, ident("a"), ident("b"))),
        assign(
            "y",
            bin(BinOp::Mul, paren(bin(BinOp::Add, ident("a"), ident("b"))), ident("x")),
        ),
    ]));

    assert_eq!(out.matches("__t0 = a + b").count(), 1);
    assert_eq!(out.matches("__t1 = a + b").count(), 1);
    assert_eq!(out.matches("__t2 = __t1 * x").count(), 1);
}

#[test]
fn empty_program_lowers_to_empty_text() {
    assert_eq!(lower_program(&program(vec![])), "");
}
