// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Runtime values and the coercion rules shared by every operator.

use std::fmt;

use quill_ast::{BinOp, UnaryOp};

use crate::interp::RuntimeError;

/// The concrete kind of a runtime value.
///
/// `Empty` marks a variable that has never been assigned; reading one
/// is a `NoValue` error.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Integer (i64 for all integers)
    Int(i64),
    /// Float (f64 for all floats)
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Character
    Char(char),
    /// String
    Str(String),
    /// Never assigned
    Empty,
}

impl Payload {
    pub fn type_name(&self) -> &'static str {
        match self {
            Payload::Int(_) => "int",
            Payload::Float(_) => "float",
            Payload::Bool(_) => "boolean",
            Payload::Char(_) => "char",
            Payload::Str(_) => "string",
            Payload::Empty => "empty",
        }
    }
}

/// A runtime value: a payload plus the name it is bound to, if any.
///
/// The name is advisory — it feeds diagnostics and the global dump,
/// and is never part of equality.
#[derive(Debug, Clone)]
pub struct Value {
    pub name: Option<String>,
    pub payload: Payload,
}

impl Value {
    pub fn new(payload: Payload) -> Self {
        Self { name: None, payload }
    }

    pub fn named(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: Some(name.into()),
            payload,
        }
    }

    /// A named variable slot with no value yet.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::named(name, Payload::Empty)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.payload, Payload::Empty)
    }

    fn no_value(&self) -> RuntimeError {
        RuntimeError::NoValue(
            self.name.clone().unwrap_or_else(|| "<temporary>".to_string()),
        )
    }

    /// Convert two operands to a common payload kind.
    ///
    /// Same kinds pass through. Int widens to Float when paired with
    /// one. A Str on either side absorbs both operands to their
    /// display rendering. Char and Bool have no conversion to anything
    /// else — that pair falls through to `NoViableConversion`, which
    /// is language behavior, not an omission.
    pub fn coerce_pair(lhs: &Value, rhs: &Value) -> Result<(Payload, Payload), RuntimeError> {
        if lhs.is_empty() {
            return Err(lhs.no_value());
        }
        if rhs.is_empty() {
            return Err(rhs.no_value());
        }

        match (&lhs.payload, &rhs.payload) {
            (a, b) if std::mem::discriminant(a) == std::mem::discriminant(b) => {
                Ok((a.clone(), b.clone()))
            }
            (Payload::Int(a), Payload::Float(b)) => {
                Ok((Payload::Float(*a as f64), Payload::Float(*b)))
            }
            (Payload::Float(a), Payload::Int(b)) => {
                Ok((Payload::Float(*a), Payload::Float(*b as f64)))
            }
            (a, b) if matches!(a, Payload::Str(_)) || matches!(b, Payload::Str(_)) => Ok((
                Payload::Str(lhs.to_display_string()),
                Payload::Str(rhs.to_display_string()),
            )),
            (a, b) => Err(RuntimeError::NoViableConversion(
                a.type_name(),
                b.type_name(),
            )),
        }
    }

    /// Apply a binary operator, coercing the operands first.
    pub fn binary(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
        let (l, r) = Self::coerce_pair(lhs, rhs)?;

        let payload = match (op, &l, &r) {
            (BinOp::Add, Payload::Int(a), Payload::Int(b)) => Payload::Int(a + b),
            (BinOp::Add, Payload::Float(a), Payload::Float(b)) => Payload::Float(a + b),
            (BinOp::Add, Payload::Bool(a), Payload::Bool(b)) => {
                Payload::Int(i64::from(*a) + i64::from(*b))
            }
            (BinOp::Add, Payload::Str(a), Payload::Str(b)) => {
                Payload::Str(format!("{}{}", a, b))
            }

            (BinOp::Sub, Payload::Int(a), Payload::Int(b)) => Payload::Int(a - b),
            (BinOp::Sub, Payload::Float(a), Payload::Float(b)) => Payload::Float(a - b),
            (BinOp::Mul, Payload::Int(a), Payload::Int(b)) => Payload::Int(a * b),
            (BinOp::Mul, Payload::Float(a), Payload::Float(b)) => Payload::Float(a * b),

            (BinOp::Div, Payload::Int(a), Payload::Int(b)) => {
                if *b == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                Payload::Int(a / b)
            }
            // IEEE semantics: infinities and NaN propagate.
            (BinOp::Div, Payload::Float(a), Payload::Float(b)) => Payload::Float(a / b),

            (BinOp::Eq, _, _) => Payload::Bool(Self::payload_eq(&l, &r)?),
            (BinOp::Ne, _, _) => Payload::Bool(!Self::payload_eq(&l, &r)?),

            (BinOp::Lt, Payload::Int(a), Payload::Int(b)) => Payload::Bool(a < b),
            (BinOp::Le, Payload::Int(a), Payload::Int(b)) => Payload::Bool(a <= b),
            (BinOp::Gt, Payload::Int(a), Payload::Int(b)) => Payload::Bool(a > b),
            (BinOp::Ge, Payload::Int(a), Payload::Int(b)) => Payload::Bool(a >= b),
            (BinOp::Lt, Payload::Float(a), Payload::Float(b)) => Payload::Bool(a < b),
            (BinOp::Le, Payload::Float(a), Payload::Float(b)) => Payload::Bool(a <= b),
            (BinOp::Gt, Payload::Float(a), Payload::Float(b)) => Payload::Bool(a > b),
            (BinOp::Ge, Payload::Float(a), Payload::Float(b)) => Payload::Bool(a >= b),
            (BinOp::Lt, Payload::Char(a), Payload::Char(b)) => Payload::Bool(a < b),
            (BinOp::Le, Payload::Char(a), Payload::Char(b)) => Payload::Bool(a <= b),
            (BinOp::Gt, Payload::Char(a), Payload::Char(b)) => Payload::Bool(a > b),
            (BinOp::Ge, Payload::Char(a), Payload::Char(b)) => Payload::Bool(a >= b),

            _ => {
                return Err(RuntimeError::InvalidOperation(
                    l.type_name(),
                    r.type_name(),
                ))
            }
        };

        Ok(Value::new(payload))
    }

    /// Equality over a coerced pair. `ne` is defined as the negation
    /// of this, never as a per-type check of its own.
    fn payload_eq(l: &Payload, r: &Payload) -> Result<bool, RuntimeError> {
        match (l, r) {
            (Payload::Int(a), Payload::Int(b)) => Ok(a == b),
            (Payload::Float(a), Payload::Float(b)) => Ok(a == b),
            (Payload::Bool(a), Payload::Bool(b)) => Ok(a == b),
            (Payload::Char(a), Payload::Char(b)) => Ok(a == b),
            (Payload::Str(a), Payload::Str(b)) => Ok(a == b),
            _ => Err(RuntimeError::InvalidOperation(
                l.type_name(),
                r.type_name(),
            )),
        }
    }

    /// Apply unary plus or minus. Defined for Int and Float only.
    pub fn unary(op: UnaryOp, operand: &Value) -> Result<Value, RuntimeError> {
        if operand.is_empty() {
            return Err(operand.no_value());
        }

        let payload = match (op, &operand.payload) {
            (UnaryOp::Plus, Payload::Int(n)) => Payload::Int(*n),
            (UnaryOp::Plus, Payload::Float(n)) => Payload::Float(*n),
            (UnaryOp::Neg, Payload::Int(n)) => Payload::Int(-n),
            (UnaryOp::Neg, Payload::Float(n)) => Payload::Float(-n),
            (_, p) => {
                return Err(RuntimeError::InvalidOperation(p.type_name(), p.type_name()))
            }
        };

        Ok(Value::new(payload))
    }

    /// Overwrite this value's payload with `source`'s, verbatim.
    ///
    /// No int/float coercion happens here: the variable's kind follows
    /// its last assignment.
    pub fn assign(&mut self, source: &Value) {
        self.payload = source.payload.clone();
    }

    /// Canonical textual rendering, used by the output statement and
    /// by string coercion in arithmetic.
    pub fn to_display_string(&self) -> String {
        match &self.payload {
            Payload::Int(n) => n.to_string(),
            Payload::Float(n) => n.to_string(),
            Payload::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Payload::Char(c) => c.to_string(),
            Payload::Str(s) => s.clone(),
            Payload::Empty => "<empty>".to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}
