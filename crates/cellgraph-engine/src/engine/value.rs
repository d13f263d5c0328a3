//! Computed cell values.
//!
//! - [`ErrorKind`] - The closed set of value-level formula failures
//! - [`Value`] - What a cell evaluates to: text, a number, or an error

use serde::{Deserialize, Serialize};
use std::fmt;

use super::format::format_number;

/// A value-level formula failure. These are stored and displayed like any
/// other value; they are not structural errors.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Dangling or invalid reference.
    Ref,
    /// Non-numeric operand where a number is required.
    Value,
    /// Division by zero.
    Div0,
    /// Parse or internal failure.
    Unknown,
}

impl ErrorKind {
    /// Fixed display token for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Ref => "#REF!",
            ErrorKind::Value => "#VALUE!",
            ErrorKind::Div0 => "#DIV0!",
            ErrorKind::Unknown => "#Unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The computed value of a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Number(f64),
    Error(ErrorKind),
}

impl Value {
    pub fn empty() -> Value {
        Value::Text(String::new())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<ErrorKind> {
        match self {
            Value::Error(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<ErrorKind> for Value {
    fn from(kind: ErrorKind) -> Self {
        Value::Error(kind)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Error(kind) => write!(f, "{}", kind),
        }
    }
}
