// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement execution.

use quill_ast::{Expr, Stmt, StmtKind};

use crate::frames::Function;
use crate::value::{Payload, Value};

use super::{Flow, Interpreter, RuntimeDiagnostic, RuntimeError};

impl Interpreter {
    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeDiagnostic> {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                let value = self.eval_expr(expr)?;
                Ok(Flow::Completed(value))
            }

            StmtKind::Assign { name, value } => {
                let val = self.eval_expr(value)?;
                match self.stack.find_variable(name) {
                    Some(id) => self.stack.var_mut(id).assign(&val),
                    // Implicit declaration on first assignment, always
                    // in the innermost frame.
                    None => {
                        self.stack
                            .declare_variable(Value::named(name.clone(), val.payload.clone()));
                    }
                }
                Ok(Flow::Completed(val))
            }

            StmtKind::Output(expr) => {
                let value = self.eval_expr(expr)?;
                let text = value.to_display_string();
                self.write_output_line(&text);
                Ok(Flow::Completed(Value::new(Payload::Str(text))))
            }

            StmtKind::Return(expr) => {
                let value = self.eval_expr(expr)?;
                Ok(Flow::Returning(value))
            }

            StmtKind::Block(stmts) => {
                self.stack.push_frame();
                let result = self.exec_block_body(stmts);
                self.stack.pop_frame();
                result
            }

            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond)? {
                    self.exec_in_frame(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_in_frame(else_branch)
                } else {
                    // No matching branch and no else: defined no-op.
                    Ok(Flow::Completed(Value::new(Payload::Empty)))
                }
            }

            StmtKind::Loop { cond, body } => loop {
                // Each iteration gets a fresh frame; the condition is
                // evaluated inside it.
                self.stack.push_frame();
                let keep_going = match self.eval_condition(cond) {
                    Ok(b) => b,
                    Err(e) => {
                        self.stack.pop_frame();
                        return Err(e);
                    }
                };
                if !keep_going {
                    self.stack.pop_frame();
                    break Ok(Flow::Completed(Value::new(Payload::Empty)));
                }
                match self.exec_stmt(body) {
                    Ok(Flow::Completed(_)) => {}
                    other => {
                        self.stack.pop_frame();
                        break other;
                    }
                }
                self.stack.pop_frame();
            },

            StmtKind::FnDecl { name, params } => {
                self.stack
                    .declare_function(Function {
                        name: name.clone(),
                        params: params.clone(),
                        body: None,
                    })
                    .map_err(|e| RuntimeDiagnostic::new(e, stmt.span))?;
                Ok(Flow::Completed(Value::new(Payload::Empty)))
            }

            StmtKind::FnDef { name, params, body } => {
                match self.stack.find_function(name) {
                    Some(id) => {
                        self.stack
                            .define_function_body(id, params.clone(), (**body).clone())
                            .map_err(|e| RuntimeDiagnostic::new(e, stmt.span))?;
                    }
                    None => {
                        self.stack
                            .declare_function(Function {
                                name: name.clone(),
                                params: params.clone(),
                                body: Some((**body).clone()),
                            })
                            .map_err(|e| RuntimeDiagnostic::new(e, stmt.span))?;
                    }
                }
                Ok(Flow::Completed(Value::new(Payload::Empty)))
            }
        }
    }

    /// Execute a statement inside its own frame, popping on every exit
    /// path before the result (or a propagating `return`) moves on.
    fn exec_in_frame(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeDiagnostic> {
        self.stack.push_frame();
        let result = self.exec_stmt(stmt);
        self.stack.pop_frame();
        result
    }

    /// Execute block statements; stops at the first propagating
    /// `return` or error. The caller owns the surrounding frame.
    pub(super) fn exec_block_body(&mut self, stmts: &[Stmt]) -> Result<Flow, RuntimeDiagnostic> {
        let mut last = Value::new(Payload::Empty);
        for stmt in stmts {
            match self.exec_stmt(stmt)? {
                Flow::Completed(value) => last = value,
                returning => return Ok(returning),
            }
        }
        Ok(Flow::Completed(last))
    }

    /// Conditions must evaluate to a boolean.
    fn eval_condition(&mut self, cond: &Expr) -> Result<bool, RuntimeDiagnostic> {
        let value = self.eval_expr(cond)?;
        match value.payload {
            Payload::Bool(b) => Ok(b),
            _ => Err(RuntimeDiagnostic::new(
                RuntimeError::TypeError("condition must be boolean".to_string()),
                cond.span,
            )),
        }
    }
}
