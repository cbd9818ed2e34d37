// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Three-address-code lowering for the Quill language.
//!
//! Walks the same AST the interpreter executes and flattens every
//! compound expression into uniquely named temporaries, hoisted in
//! dependency order immediately before their first use.

mod temp;
mod render;
mod lower;

pub use lower::{lower_program, TacLowerer};
pub use temp::{TempId, TempTable, Temporary};
