use std::{collections::BTreeMap, fmt::Display};

use crate::sql::types::Value;

/// Comparison operators accepted in a WHERE clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl Operator {
    /// Scan order: two-character operators before their one-character prefixes
    pub const SCAN_ORDER: [Operator; 6] = [
        Operator::GreaterThanOrEqual,
        Operator::LessThanOrEqual,
        Operator::NotEqual,
        Operator::Equal,
        Operator::GreaterThan,
        Operator::LessThan,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThanOrEqual => "<=",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Parsed WHERE clause: `column operator value`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub operator: Operator,
    pub value: Value,
}

impl Condition {
    pub fn new(column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.column, self.operator, self.value)
    }
}

/// Parsed SET clause: column to new value
pub type Assignments = BTreeMap<String, Value>;
