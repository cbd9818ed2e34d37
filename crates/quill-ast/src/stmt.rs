// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement AST nodes.

use crate::expr::Expr;
use crate::Span;

/// A complete parsed program.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

/// A statement in the AST.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of statement.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Assignment; also declares the variable on first use.
    Assign {
        name: String,
        value: Expr,
    },
    /// Output statement (writeln)
    Output(Expr),
    /// Return statement
    Return(Expr),
    /// Conditional. Else-if chains arrive as an `If` in `else_branch`.
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// Pre-test loop; the condition is re-checked every iteration.
    Loop {
        cond: Expr,
        body: Box<Stmt>,
    },
    /// Compound block (begin .. end)
    Block(Vec<Stmt>),
    /// Function declaration: name and parameters, no body yet.
    FnDecl {
        name: String,
        params: Vec<String>,
    },
    /// Function definition: declaration plus body in one step.
    FnDef {
        name: String,
        params: Vec<String>,
        body: Box<Stmt>,
    },
    /// Expression statement (bare function call)
    Expr(Expr),
}
