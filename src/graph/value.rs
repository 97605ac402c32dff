//! Filter parameter values and their script literal form.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// A loosely typed filter parameter value.
///
/// Values are not checked against the target plugin's signature; they are
/// rendered as literals in the order the node stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ParamValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Render this value as a script literal.
    pub fn to_literal(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_literal(&mut out);
        out
    }

    /// Write this value as a script literal into `out`.
    pub fn write_literal(&self, out: &mut impl Write) -> fmt::Result {
        match self {
            ParamValue::Bool(true) => out.write_str("True"),
            ParamValue::Bool(false) => out.write_str("False"),
            ParamValue::Int(v) => write!(out, "{}", v),
            ParamValue::Float(v) => write_float_literal(*v, out),
            ParamValue::String(s) => write_string_literal(s, out),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::String(v)
    }
}

/// Floats keep a decimal point so the runtime never reads them back as ints.
fn write_float_literal(v: f64, out: &mut impl Write) -> fmt::Result {
    if v.is_nan() {
        return out.write_str("float(\"nan\")");
    }
    if v.is_infinite() {
        return if v > 0.0 {
            out.write_str("float(\"inf\")")
        } else {
            out.write_str("float(\"-inf\")")
        };
    }

    let text = v.to_string();
    out.write_str(&text)?;
    if !text.contains(['.', 'e', 'E']) {
        out.write_str(".0")?;
    }
    Ok(())
}

/// Double-quoted string literal with backslash escapes.
pub(crate) fn write_string_literal(s: &str, out: &mut impl Write) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '\\' => out.write_str("\\\\")?,
            '"' => out.write_str("\\\"")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if c.is_ascii_control() => write!(out, "\\x{:02x}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}
