// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Scope frames and the call stack.
//!
//! Variables and functions live in flat slot arenas; a frame is a pair
//! of high-water marks into them. Lookup returns indices rather than
//! references, so nothing can dangle across a frame pop.

use quill_ast::Stmt;

use crate::interp::RuntimeError;
use crate::value::Value;

/// A declared function. `body` is attached by a later definition; a
/// call before that is an error.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Option<Stmt>,
}

/// Index of a variable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarId(usize);

/// Index of a function slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunId(usize);

/// Arena lengths at frame entry; popping truncates back to these.
#[derive(Debug, Clone, Copy)]
struct FrameMark {
    vars: usize,
    funcs: usize,
}

/// The ordered stack of scope frames. The bottom frame is the global
/// scope and lives for the whole program run.
#[derive(Debug)]
pub struct CallStack {
    vars: Vec<Value>,
    funcs: Vec<Function>,
    marks: Vec<FrameMark>,
}

impl CallStack {
    pub fn new() -> Self {
        Self {
            vars: Vec::new(),
            funcs: Vec::new(),
            marks: vec![FrameMark { vars: 0, funcs: 0 }],
        }
    }

    /// Number of active frames, global frame included.
    pub fn depth(&self) -> usize {
        self.marks.len()
    }

    pub fn push_frame(&mut self) {
        tracing::trace!(depth = self.marks.len() + 1, "push frame");
        self.marks.push(FrameMark {
            vars: self.vars.len(),
            funcs: self.funcs.len(),
        });
    }

    /// Discard the innermost frame and everything declared in it.
    /// The global frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.marks.len() > 1 {
            let mark = self.marks.pop().unwrap_or(FrameMark { vars: 0, funcs: 0 });
            self.vars.truncate(mark.vars);
            self.funcs.truncate(mark.funcs);
            tracing::trace!(depth = self.marks.len(), "pop frame");
        }
    }

    /// Declare a variable in the innermost frame. Repeated names are
    /// allowed; the newest declaration shadows older ones.
    pub fn declare_variable(&mut self, value: Value) -> VarId {
        self.vars.push(value);
        VarId(self.vars.len() - 1)
    }

    /// Reverse scan over all frames, newest declaration first.
    /// Absence is not an error here; callers decide what it means.
    pub fn find_variable(&self, name: &str) -> Option<VarId> {
        self.vars
            .iter()
            .rposition(|v| v.name.as_deref() == Some(name))
            .map(VarId)
    }

    pub fn var(&self, id: VarId) -> &Value {
        &self.vars[id.0]
    }

    pub fn var_mut(&mut self, id: VarId) -> &mut Value {
        &mut self.vars[id.0]
    }

    /// Declare a function in the innermost frame. The name must be
    /// unique within that frame.
    pub fn declare_function(&mut self, func: Function) -> Result<FunId, RuntimeError> {
        let frame_start = self.marks.last().map(|m| m.funcs).unwrap_or(0);
        if self.funcs[frame_start..].iter().any(|f| f.name == func.name) {
            return Err(RuntimeError::Redefinition(func.name));
        }
        self.funcs.push(func);
        Ok(FunId(self.funcs.len() - 1))
    }

    /// Reverse scan over all frames, newest declaration first.
    pub fn find_function(&self, name: &str) -> Option<FunId> {
        self.funcs
            .iter()
            .rposition(|f| f.name == name)
            .map(FunId)
    }

    pub fn function(&self, id: FunId) -> &Function {
        &self.funcs[id.0]
    }

    /// Attach a body to an already-declared function. Attaching a
    /// second body is an error.
    pub fn define_function_body(
        &mut self,
        id: FunId,
        params: Vec<String>,
        body: Stmt,
    ) -> Result<(), RuntimeError> {
        let func = &mut self.funcs[id.0];
        if func.body.is_some() {
            return Err(RuntimeError::Redefinition(func.name.clone()));
        }
        func.params = params;
        func.body = Some(body);
        Ok(())
    }

    /// Variables still live in the global frame, declaration order.
    pub fn global_variables(&self) -> &[Value] {
        let end = self.marks.get(1).map(|m| m.vars).unwrap_or(self.vars.len());
        &self.vars[..end]
    }

    /// Functions still live in the global frame, declaration order.
    pub fn global_functions(&self) -> &[Function] {
        let end = self
            .marks
            .get(1)
            .map(|m| m.funcs)
            .unwrap_or(self.funcs.len());
        &self.funcs[..end]
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Payload;

    fn var(name: &str, n: i64) -> Value {
        Value::named(name, Payload::Int(n))
    }

    #[test]
    fn newest_declaration_shadows() {
        let mut stack = CallStack::new();
        stack.declare_variable(var("x", 1));
        stack.push_frame();
        stack.declare_variable(var("x", 2));

        let id = stack.find_variable("x").unwrap();
        assert_eq!(stack.var(id).payload, Payload::Int(2));

        stack.pop_frame();
        let id = stack.find_variable("x").unwrap();
        assert_eq!(stack.var(id).payload, Payload::Int(1));
    }

    #[test]
    fn shadowing_within_one_frame_is_allowed() {
        let mut stack = CallStack::new();
        stack.declare_variable(var("x", 1));
        stack.declare_variable(var("x", 2));
        let id = stack.find_variable("x").unwrap();
        assert_eq!(stack.var(id).payload, Payload::Int(2));
    }

    #[test]
    fn pop_discards_frame_contents() {
        let mut stack = CallStack::new();
        stack.push_frame();
        stack.declare_variable(var("local", 9));
        stack.pop_frame();
        assert!(stack.find_variable("local").is_none());
    }

    #[test]
    fn function_names_are_unique_per_frame() {
        let mut stack = CallStack::new();
        stack
            .declare_function(Function {
                name: "f".to_string(),
                params: vec![],
                body: None,
            })
            .unwrap();
        let err = stack
            .declare_function(Function {
                name: "f".to_string(),
                params: vec![],
                body: None,
            })
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Redefinition(name) if name == "f"));
    }

    #[test]
    fn global_frame_is_never_popped() {
        let mut stack = CallStack::new();
        stack.declare_variable(var("g", 1));
        stack.pop_frame();
        assert_eq!(stack.depth(), 1);
        assert!(stack.find_variable("g").is_some());
    }
}
