// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The interpreter implementation.
//!
//! This is a tree-walk interpreter that directly evaluates the AST.
//! The non-local `return` travels as `Flow::Returning`, a visible
//! variant threaded through every statement, so each block pops its
//! own frame before re-propagating instead of relying on unwinding.

use std::sync::{Arc, Mutex};

mod exec_stmt;
mod eval_expr;
mod call;

use quill_ast::{Program, Span};

use crate::frames::CallStack;
use crate::value::{Payload, Value};

/// How a statement finished.
#[derive(Debug)]
pub enum Flow {
    /// Normal completion, with the statement's value.
    Completed(Value),
    /// A `return` is propagating toward the nearest call boundary.
    Returning(Value),
}

/// The tree-walk interpreter.
pub struct Interpreter {
    /// Scope frames (bottom frame = global scope).
    pub(crate) stack: CallStack,
    /// Optional output buffer for capturing writeln output (used in tests).
    output_buffer: Option<Arc<Mutex<String>>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            stack: CallStack::new(),
            output_buffer: None,
        }
    }

    /// Returns interpreter and output buffer reference.
    pub fn with_captured_output() -> (Self, Arc<Mutex<String>>) {
        let buffer = Arc::new(Mutex::new(String::new()));
        let interp = Self {
            stack: CallStack::new(),
            output_buffer: Some(buffer.clone()),
        };
        (interp, buffer)
    }

    /// Execute a whole program and yield the last statement's value.
    ///
    /// A `return` that reaches here never crossed a call boundary, so
    /// it is the one fatal misuse of the return signal.
    pub fn run(&mut self, program: &Program) -> Result<Value, RuntimeDiagnostic> {
        let mut last = Value::new(Payload::Empty);
        for stmt in &program.stmts {
            match self.exec_stmt(stmt)? {
                Flow::Completed(value) => last = value,
                Flow::Returning(_) => {
                    return Err(RuntimeDiagnostic::new(
                        RuntimeError::ReturnOutsideFunction,
                        stmt.span,
                    ));
                }
            }
        }
        Ok(last)
    }

    /// Current call-stack depth (global frame included).
    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Non-normative tracing facility: render the variables and
    /// function signatures still live in the global frame.
    pub fn dump_globals(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for var in self.stack.global_variables() {
            let name = var.name.as_deref().unwrap_or("<unnamed>");
            lines.push(format!(
                "{} {} = {}",
                var.payload.type_name(),
                name,
                var.to_display_string()
            ));
        }
        for func in self.stack.global_functions() {
            lines.push(format!("function {}({})", func.name, func.params.join(", ")));
        }
        tracing::debug!(lines = lines.len(), "global dump");
        lines
    }

    pub(crate) fn write_output_line(&self, text: &str) {
        if let Some(buf) = &self.output_buffer {
            if let Ok(mut buf) = buf.lock() {
                buf.push_str(text);
                buf.push('\n');
            }
        } else {
            println!("{}", text);
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// A runtime error.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("variable `{0}` has no value")]
    NoValue(String),

    #[error("no viable conversion from {0} to {1}")]
    NoViableConversion(&'static str, &'static str),

    #[error("invalid operation for types {0} and {1}")]
    InvalidOperation(&'static str, &'static str),

    #[error("{0}")]
    TypeError(String),

    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),

    #[error("undefined function `{0}`")]
    UndefinedFunction(String),

    #[error("expected {expected} argument{}, got {got}", if *.expected == 1 { "" } else { "s" })]
    ArityMismatch { expected: usize, got: usize },

    #[error("function `{0}` is already defined")]
    Redefinition(String),

    #[error("return outside of a function")]
    ReturnOutsideFunction,

    #[error("division by zero; check divisor before dividing")]
    DivisionByZero,
}

/// Runtime error with source location for diagnostic display.
#[derive(Debug)]
pub struct RuntimeDiagnostic {
    pub error: RuntimeError,
    pub span: Span,
}

impl RuntimeDiagnostic {
    pub fn new(error: RuntimeError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for RuntimeDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for RuntimeDiagnostic {}
