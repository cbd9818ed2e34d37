// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Function calls and variable reads.

use quill_ast::{Expr, Span};

use crate::value::{Payload, Value};

use super::{Flow, Interpreter, RuntimeDiagnostic, RuntimeError};

impl Interpreter {
    /// Read a variable's current value. Absence is `UndefinedVariable`;
    /// a declared-but-never-assigned slot is `NoValue`.
    pub(super) fn read_variable(&self, name: &str) -> Result<Value, RuntimeError> {
        let id = self
            .stack
            .find_variable(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))?;
        let value = self.stack.var(id);
        if value.is_empty() {
            return Err(RuntimeError::NoValue(name.to_string()));
        }
        Ok(value.clone())
    }

    /// Resolve and call a function.
    ///
    /// Arguments are evaluated left to right in the caller's frame and
    /// passed by value. The callee runs in exactly one new frame; its
    /// `return` is caught here, after any intervening block frames
    /// have already popped themselves.
    pub(super) fn call_function(
        &mut self,
        name: &str,
        args: &[Expr],
        span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let id = self
            .stack
            .find_function(name)
            .ok_or_else(|| {
                RuntimeDiagnostic::new(RuntimeError::UndefinedFunction(name.to_string()), span)
            })?;
        let func = self.stack.function(id).clone();

        // Declared but never given a body.
        let body = func.body.ok_or_else(|| {
            RuntimeDiagnostic::new(RuntimeError::UndefinedFunction(name.to_string()), span)
        })?;

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.eval_expr(arg)?);
        }

        if arg_values.len() != func.params.len() {
            return Err(RuntimeDiagnostic::new(
                RuntimeError::ArityMismatch {
                    expected: func.params.len(),
                    got: arg_values.len(),
                },
                span,
            ));
        }

        tracing::trace!(function = name, args = arg_values.len(), "call");

        self.stack.push_frame();
        for (param, arg) in func.params.iter().zip(arg_values) {
            self.stack
                .declare_variable(Value::named(param.clone(), arg.payload));
        }

        let result = self.exec_stmt(&body);
        self.stack.pop_frame();

        match result? {
            Flow::Returning(value) => Ok(value),
            Flow::Completed(_) => Ok(Value::new(Payload::Empty)),
        }
    }
}
