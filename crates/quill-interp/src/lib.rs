// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tree-walk interpreter for the Quill language.
//!
//! Executes the AST directly without compilation.

mod value;
mod frames;
mod interp;

pub use frames::{CallStack, Function};
pub use interp::{Flow, Interpreter, RuntimeDiagnostic, RuntimeError};
pub use value::{Payload, Value};
