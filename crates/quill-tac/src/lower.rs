// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! AST → three-address-code lowering.
//!
//! Every visit returns a `Lowered` pair: statements that must be
//! emitted first (`hoist`), and the value text to reference — a
//! literal, an identifier, or the name of a freshly created
//! temporary. The hoist chain for a temporary is materialized at the
//! statement that consumes it, never at the expression that built it.

use quill_ast::{Expr, ExprKind, Program, Stmt, StmtKind};

use crate::render;
use crate::temp::{join, TempTable};

/// Lower a whole program to linearized text.
pub fn lower_program(program: &Program) -> String {
    TacLowerer::new().lower(program)
}

/// Result of one visit: zero or more already-linearized statements,
/// and the text that stands for the visited node's value.
struct Lowered {
    hoist: String,
    text: String,
}

impl Lowered {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            hoist: String::new(),
            text: text.into(),
        }
    }
}

/// The lowering pass. Owns the temporary table for exactly one
/// compilation.
pub struct TacLowerer {
    table: TempTable,
}

impl TacLowerer {
    pub fn new() -> Self {
        Self {
            table: TempTable::new(),
        }
    }

    pub fn lower(mut self, program: &Program) -> String {
        let mut out = String::new();
        for stmt in &program.stmts {
            let lowered = self.lower_stmt(stmt);
            out = join(&out, &lowered.hoist);
            out = join(&out, &lowered.text);
        }
        if !out.is_empty() {
            out.push_str(";\n");
        }
        out
    }

    fn lower_stmt(&mut self, stmt: &Stmt) -> Lowered {
        match &stmt.kind {
            StmtKind::Assign { name, value } => {
                let value = self.lower_expr(value);
                let chain = self.table.hoist(&value.text);
                Lowered {
                    hoist: join(&value.hoist, &chain),
                    text: format!("{} = {}", name, value.text),
                }
            }

            StmtKind::Output(expr) => {
                let value = self.lower_expr(expr);
                let chain = self.table.hoist(&value.text);
                Lowered {
                    hoist: join(&value.hoist, &chain),
                    text: format!("writeln({})", value.text),
                }
            }

            StmtKind::Return(expr) => {
                let value = self.lower_expr(expr);
                let chain = self.table.hoist(&value.text);
                Lowered {
                    hoist: join(&value.hoist, &chain),
                    text: format!("return {}", value.text),
                }
            }

            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.lower_expr(cond);
                let chain = self.table.hoist(&cond.text);
                let then_l = self.lower_stmt(then_branch);
                let else_l = else_branch.as_deref().map(|e| self.lower_stmt(e));

                let mut hoist = join(&cond.hoist, &chain);
                hoist = join(&hoist, &then_l.hoist);
                let mut text = format!("if ({}) then {}", cond.text, then_l.text);
                if let Some(else_l) = else_l {
                    hoist = join(&hoist, &else_l.hoist);
                    text.push_str("\nelse ");
                    text.push_str(&else_l.text);
                }
                Lowered { hoist, text }
            }

            // The loop condition is re-tested every iteration, so it
            // stays as source text rather than a once-hoisted chain.
            StmtKind::Loop { cond, body } => {
                let body = self.lower_stmt(body);
                Lowered {
                    hoist: body.hoist,
                    text: format!("loop if ({}) {}", render::source(cond), body.text),
                }
            }

            StmtKind::Block(stmts) => {
                let mut inner = String::new();
                for stmt in stmts {
                    let lowered = self.lower_stmt(stmt);
                    inner = join(&inner, &lowered.hoist);
                    inner = join(&inner, &lowered.text);
                }
                let text = if inner.is_empty() {
                    "begin\nend".to_string()
                } else {
                    format!("begin\n{};\nend", inner)
                };
                Lowered::plain(text)
            }

            StmtKind::FnDecl { name, params } => {
                Lowered::plain(format!("function {}({})", name, params.join(", ")))
            }

            StmtKind::FnDef { name, params, body } => {
                let body = self.lower_stmt(body);
                let body_text = join(&body.hoist, &body.text);
                Lowered::plain(format!(
                    "function {}({}) {}",
                    name,
                    params.join(", "),
                    body_text
                ))
            }

            StmtKind::Expr(expr) => {
                let value = self.lower_expr(expr);
                let chain = self.table.hoist(&value.text);
                Lowered {
                    hoist: join(&value.hoist, &chain),
                    text: value.text,
                }
            }
        }
    }

    fn lower_expr(&mut self, expr: &Expr) -> Lowered {
        match &expr.kind {
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Bool(_)
            | ExprKind::Char(_)
            | ExprKind::Str(_)
            | ExprKind::Ident(_) => Lowered::plain(render::source(expr)),

            ExprKind::Paren(inner) => self.lower_expr(inner),

            ExprKind::Binary { op, left, right } => {
                // Left operand, then the whole right-hand chain —
                // the same right-associative order the interpreter
                // evaluates in.
                let left = self.lower_expr(left);
                let right = self.lower_expr(right);

                let mut deps = Vec::new();
                if let Some(id) = self.table.lookup(&left.text) {
                    deps.push(id);
                }
                if let Some(id) = self.table.lookup(&right.text) {
                    deps.push(id);
                }

                let name = self.table.push(
                    format!(" = {} {} {}", left.text, op, right.text),
                    deps,
                );
                Lowered {
                    hoist: join(&left.hoist, &right.hoist),
                    text: name,
                }
            }

            ExprKind::Unary { op, operand } => {
                let operand = self.lower_expr(operand);
                let mut deps = Vec::new();
                if let Some(id) = self.table.lookup(&operand.text) {
                    deps.push(id);
                }
                let name = self
                    .table
                    .push(format!(" = {}{}", op, operand.text), deps);
                Lowered {
                    hoist: operand.hoist,
                    text: name,
                }
            }

            ExprKind::Call { name, args } => {
                let mut hoist = String::new();
                let mut texts = Vec::with_capacity(args.len());
                for arg in args {
                    let arg = self.lower_expr(arg);
                    let chain = self.table.hoist(&arg.text);
                    hoist = join(&hoist, &arg.hoist);
                    hoist = join(&hoist, &chain);
                    texts.push(arg.text);
                }
                Lowered {
                    hoist,
                    text: format!("{}({})", name, texts.join(", ")),
                }
            }
        }
    }
}

impl Default for TacLowerer {
    fn default() -> Self {
        Self::new()
    }
}
