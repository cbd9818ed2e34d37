// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source-text rendering of expressions.
//!
//! Used for leaf operands and for loop conditions, which are re-tested
//! every iteration and therefore reproduced verbatim instead of being
//! hoisted into temporaries.

use quill_ast::{Expr, ExprKind};

/// Render an expression back to surface syntax.
pub(crate) fn source(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Int(n) => n.to_string(),
        ExprKind::Float(n) => n.to_string(),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Char(c) => format!("'{}'", c),
        ExprKind::Str(s) => format!("\"{}\"", s),
        ExprKind::Ident(name) => name.clone(),
        ExprKind::Binary { op, left, right } => {
            format!("{} {} {}", source(left), op, source(right))
        }
        ExprKind::Unary { op, operand } => format!("{}{}", op, source(operand)),
        ExprKind::Call { name, args } => {
            let args: Vec<String> = args.iter().map(source).collect();
            format!("{}({})", name, args.join(", "))
        }
        ExprKind::Paren(inner) => format!("({})", source(inner)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_ast::{BinOp, Span};

    fn expr(kind: ExprKind) -> Expr {
        Expr::new(kind, Span::DUMMY)
    }

    #[test]
    fn renders_nested_expressions() {
        let e = expr(ExprKind::Binary {
            op: BinOp::Lt,
            left: Box::new(expr(ExprKind::Ident("i".to_string()))),
            right: Box::new(expr(ExprKind::Paren(Box::new(expr(ExprKind::Binary {
                op: BinOp::Add,
                left: Box::new(expr(ExprKind::Int(1))),
                right: Box::new(expr(ExprKind::Int(2))),
            }))))),
        });
        assert_eq!(source(&e), "i < (1 + 2)");
    }

    #[test]
    fn renders_literals() {
        assert_eq!(source(&expr(ExprKind::Char('a'))), "'a'");
        assert_eq!(source(&expr(ExprKind::Str("hi".to_string()))), "\"hi\"");
        assert_eq!(source(&expr(ExprKind::Bool(true))), "true");
    }
}
