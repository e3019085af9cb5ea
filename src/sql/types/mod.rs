use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

mod coerce;

pub use coerce::coerce;

/// Supported column data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Integer,
    String,
    Boolean,
}

impl DataType {
    /// Parses the type tag used in `name:type` column specs
    pub fn from_tag(tag: &str) -> Option<DataType> {
        Some(match tag {
            "int" => DataType::Integer,
            "str" => DataType::String,
            "bool" => DataType::Boolean,
            _ => return None,
        })
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            DataType::Integer => "int",
            DataType::String => "str",
            DataType::Boolean => "bool",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_tag())
    }
}

/// Scalar value, as parsed from a literal or stored in a record
///
/// Persisted untagged, so a record document holds plain JSON scalars.
/// `Float` only comes out of the value parser; coercion never stores one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Numeric view used by ordering comparisons
    ///
    /// Booleans count as 1 and 0, strings are parsed after trimming.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(v) => write!(f, "{}", v),
            // Whole floats keep their decimal point so 3.0 never reads as 3
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

/// A record maps column name to value, `ID` included
pub type Record = BTreeMap<String, Value>;
