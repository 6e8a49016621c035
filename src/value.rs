//! Runtime values flowing through the renderer
//!
//! Everything the scope stores, every helper argument, and every cycle
//! sequence element is a `Value`. Maps keep the order in which their
//! entries were written, which is what makes `{0: 'odd', 1: 'even'}`
//! a usable cycle sequence.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    /// Order-preserving mapping; entries render and normalize in written order
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Short noun for error messages ("expected a sequence, got a boolean")
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render this value as template output text
    ///
    /// Null renders empty. Sequences and maps render their elements
    /// comma-separated; the renderer performs no escaping of any kind.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Str(s) => s.clone(),
            Value::Seq(items) => items
                .iter()
                .map(Value::render)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Map(entries) => entries
                .iter()
                .map(|(_, v)| v.render())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Format a float without unnecessary decimal points
fn format_float(num: f64) -> String {
    if num.fract() == 0.0 && num.abs() < 1e15 {
        format!("{}", num as i64)
    } else {
        format!("{}", num)
    }
}
