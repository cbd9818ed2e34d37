// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The temporary-variable table.
//!
//! One flat, append-only table per compilation. Temporaries are never
//! scoped or reused; a name stays unique for the whole run of the
//! lowering pass.

use indexmap::IndexMap;

/// Index of a temporary in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempId(usize);

/// One compiler-generated temporary: its rhs text (starting with
/// `" = "`) and the temporaries that text uses.
#[derive(Debug)]
pub struct Temporary {
    pub expr: String,
    pub deps: Vec<TempId>,
    emitted: bool,
}

/// Insertion-ordered name → temporary table with a monotone counter
/// for fresh names.
#[derive(Debug, Default)]
pub struct TempTable {
    temps: IndexMap<String, Temporary>,
    counter: usize,
}

impl TempTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a temporary and return its fresh name.
    pub fn push(&mut self, expr: String, deps: Vec<TempId>) -> String {
        let name = format!("__t{}", self.counter);
        self.counter += 1;
        tracing::trace!(name = %name, deps = deps.len(), "new temporary");
        self.temps.insert(
            name.clone(),
            Temporary {
                expr,
                deps,
                emitted: false,
            },
        );
        name
    }

    /// Resolve a value text to a temporary, if it names one.
    /// Literals and plain identifiers resolve to `None`.
    pub fn lookup(&self, text: &str) -> Option<TempId> {
        self.temps.get_index_of(text).map(TempId)
    }

    pub fn len(&self) -> usize {
        self.temps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temps.is_empty()
    }

    /// Emit the assignment statements a value text depends on:
    /// depth-first, every dependency strictly before its dependent,
    /// each temporary at most once for the whole compilation.
    ///
    /// Returns empty text when `text` is not a temporary name.
    pub fn hoist(&mut self, text: &str) -> String {
        match self.lookup(text) {
            Some(id) => self.hoist_id(id),
            None => String::new(),
        }
    }

    fn hoist_id(&mut self, id: TempId) -> String {
        let Some((name, temp)) = self.temps.get_index_mut(id.0) else {
            return String::new();
        };
        if temp.emitted {
            return String::new();
        }
        temp.emitted = true;

        let name = name.clone();
        let expr = temp.expr.clone();
        let deps = temp.deps.clone();

        let mut out = String::new();
        for dep in deps {
            out = join(&out, &self.hoist_id(dep));
        }
        join(&out, &format!("{}{}", name, expr))
    }
}

/// Join two statement fragments with a terminator between them.
pub(crate) fn join(a: &str, b: &str) -> String {
    if a.is_empty() {
        b.to_string()
    } else if b.is_empty() {
        a.to_string()
    } else {
        format!("{};\n{}", a, b)
    }
}
