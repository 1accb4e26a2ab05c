/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Result values of evaluated code.
//!
//! When a code part prints nothing, its result value is printed in its place.
//! Only scalar values have a printed form; everything else prints as nothing.

use std::fmt;

/// The value a code part evaluated to.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value (a statement, or whitespace-only code).
    #[default]
    Unit,

    Bool(bool),

    Int(i64),

    UInt(u64),

    Float(f64),

    String(String),

    /// A value with no printed form (functions, maps, lists, ...).
    Opaque,
}

impl Value {
    /// True for values that print as something when written implicitly.
    pub fn is_printable(&self) -> bool {
        !matches!(self, Value::Unit | Value::Opaque)
    }

    /// The text written for this value when the code printed nothing itself.
    pub fn implicit_output(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit | Value::Opaque => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::UInt(u)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
