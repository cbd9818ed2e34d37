// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Quill language.
//!
//! This crate defines the AST nodes the parser produces and that both
//! back ends (the tree-walk interpreter and the TAC lowering pass)
//! consume read-only.

pub mod span;
pub mod expr;
pub mod stmt;

pub use span::Span;
pub use expr::{BinOp, Expr, ExprKind, UnaryOp};
pub use stmt::{Program, Stmt, StmtKind};
