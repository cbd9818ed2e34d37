// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression evaluation.
//!
//! Chained operators are right-associative: `a - b - c` arrives from
//! the parser as `a - (b - c)` and is evaluated that way. That changes
//! results for non-associative operators and is language behavior, not
//! something to normalize.

use quill_ast::{Expr, ExprKind};

use crate::value::{Payload, Value};

use super::{Interpreter, RuntimeDiagnostic};

impl Interpreter {
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeDiagnostic> {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::new(Payload::Int(*n))),
            ExprKind::Float(n) => Ok(Value::new(Payload::Float(*n))),
            ExprKind::Bool(b) => Ok(Value::new(Payload::Bool(*b))),
            ExprKind::Char(c) => Ok(Value::new(Payload::Char(*c))),
            ExprKind::Str(s) => Ok(Value::new(Payload::Str(s.clone()))),

            ExprKind::Ident(name) => self
                .read_variable(name)
                .map_err(|e| RuntimeDiagnostic::new(e, expr.span)),

            ExprKind::Paren(inner) => self.eval_expr(inner),

            ExprKind::Binary { op, left, right } => {
                // Left operand first, then the whole right-hand chain,
                // then the operator.
                let lhs = self.eval_expr(left)?;
                let rhs = self.eval_expr(right)?;
                Value::binary(*op, &lhs, &rhs)
                    .map_err(|e| RuntimeDiagnostic::new(e, expr.span))
            }

            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                Value::unary(*op, &value).map_err(|e| RuntimeDiagnostic::new(e, expr.span))
            }

            ExprKind::Call { name, args } => self.call_function(name, args, expr.span),
        }
    }
}
