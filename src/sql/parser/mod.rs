//! Clause parsing: literal values, WHERE, SET and VALUES clauses

use crate::{
    error::{Error, Result},
    sql::{
        parser::ast::{Assignments, Condition, Operator},
        types::Value,
    },
};

pub mod ast;
pub mod lexer;

use lexer::Lexer;

/// Parses a literal token into a typed value; never fails
///
/// First match wins:
/// 1. wrapped in matching `"` or `'` quotes: the inner text as a string
/// 2. `true` / `false` in any case: boolean
/// 3. only ASCII digits: integer
/// 4. only digits and dots: float
/// 5. anything else: the token itself as a string
pub fn parse_value(token: &str) -> Value {
    if let Some(inner) = strip_quotes(token) {
        return Value::String(inner.to_string());
    }
    if token.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if token.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(i) = token.parse() {
            return Value::Integer(i);
        }
    }
    // Same test as above once dots are removed; "1.2.3" does not parse and stays a string
    if token.chars().any(|c| c.is_ascii_digit())
        && token.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        if let Ok(f) = token.parse() {
            return Value::Float(f);
        }
    }
    Value::String(token.to_string())
}

fn strip_quotes(token: &str) -> Option<&str> {
    ['"', '\'']
        .into_iter()
        .filter(|_| token.len() >= 2)
        .find_map(|q| token.strip_prefix(q)?.strip_suffix(q))
}

/// Parses `column op value`; empty input means no filter
///
/// The first operator of [`Operator::SCAN_ORDER`] found anywhere in the text
/// wins, and the text is split on its first occurrence.
pub fn parse_where_clause(text: &str) -> Result<Option<Condition>> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let operator = Operator::SCAN_ORDER
        .into_iter()
        .find(|op| text.contains(op.to_str()))
        .ok_or_else(|| {
            Error::MalformedClause(format!(
                "no comparison operator in WHERE clause \"{}\", supported: >=, <=, !=, =, >, <",
                text
            ))
        })?;

    let (column, value) = split_sides(text, operator.to_str(), "WHERE")?;
    Ok(Some(Condition {
        column: column.to_string(),
        operator,
        value: parse_value(value),
    }))
}

/// Parses `column = value` into a single assignment
pub fn parse_set_clause(text: &str) -> Result<Assignments> {
    let (column, value) = split_sides(text, "=", "SET")?;
    Ok(Assignments::from([(column.to_string(), parse_value(value))]))
}

/// Parses a parenthesised, comma-separated list of literals
pub fn parse_values(text: &str) -> Result<Vec<Value>> {
    let text = text.trim();
    let interior = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(|| Error::MalformedClause(format!("VALUES must be wrapped in (): {}", text)))?;

    Lexer::values(interior)
        .map(|token| token.map(|t| parse_value(&t)))
        .collect()
}

/// Splits on the first `separator` into two trimmed, non-empty sides
fn split_sides<'a>(text: &'a str, separator: &str, clause: &str) -> Result<(&'a str, &'a str)> {
    match text.split_once(separator) {
        Some((left, right)) if !left.trim().is_empty() && !right.trim().is_empty() => {
            Ok((left.trim(), right.trim()))
        }
        _ => Err(Error::MalformedClause(format!(
            "malformed {} clause: {}",
            clause, text
        ))),
    }
}
