use std::cmp::Ordering;

use crate::sql::{
    parser::ast::{Condition, Operator},
    types::{Record, Value},
};

/// Decides whether a record satisfies an optional condition
///
/// No condition matches everything. A record without the condition's column
/// never matches.
///
/// `=` and `!=` compare display strings, and booleans display lowercase:
/// `active = true` and `active = 'true'` match a stored `true`, while
/// `active = 'True'` does not.
pub fn matches(record: &Record, condition: Option<&Condition>) -> bool {
    let Some(condition) = condition else {
        return true;
    };
    let Some(value) = record.get(&condition.column) else {
        return false;
    };

    match condition.operator {
        Operator::Equal => value.to_string() == condition.value.to_string(),
        Operator::NotEqual => value.to_string() != condition.value.to_string(),
        Operator::GreaterThan => compare(value, &condition.value).is_some_and(Ordering::is_gt),
        Operator::LessThan => compare(value, &condition.value).is_some_and(Ordering::is_lt),
        Operator::GreaterThanOrEqual => compare(value, &condition.value).is_some_and(Ordering::is_ge),
        Operator::LessThanOrEqual => compare(value, &condition.value).is_some_and(Ordering::is_le),
    }
}

/// Orders two values numerically when both convert to f64, otherwise by their
/// display strings
///
/// The fallback is loose on mixed data: `"10" > 9` compares numerically while
/// `"abc" > 9` compares `"abc"` with `"9"`. NaN compares as not ordered and
/// never satisfies an ordering operator.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l.partial_cmp(&r),
        _ => Some(left.to_string().cmp(&right.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::matches;
    use crate::sql::{
        parser::{ast::{Condition, Operator}, parse_where_clause},
        types::{Record, Value},
    };

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_no_condition_matches_all() {
        assert!(matches(&Record::new(), None));
    }

    #[test]
    fn test_missing_column_never_matches() {
        let r = record(&[("ID", Value::Integer(1))]);
        let cond = Condition::new("age", Operator::NotEqual, Value::Integer(1));
        assert!(!matches(&r, Some(&cond)));
    }

    #[test]
    fn test_equality_is_by_display_string() {
        let r = record(&[("code", Value::from("42")), ("ok", Value::Boolean(true))]);
        assert!(matches(&r, Some(&Condition::new("code", Operator::Equal, Value::Integer(42)))));
        assert!(matches(&r, Some(&Condition::new("ok", Operator::Equal, "true"))));
        assert!(matches(&r, Some(&Condition::new("code", Operator::NotEqual, "43"))));
        // Booleans display lowercase, so a capitalised literal does not match
        assert!(!matches(&r, Some(&Condition::new("ok", Operator::Equal, "True"))));
        assert!(matches(&r, Some(&Condition::new("ok", Operator::NotEqual, "True"))));
        // 5 and 5.0 display differently
        let r = record(&[("n", Value::Integer(5))]);
        assert!(!matches(&r, Some(&Condition::new("n", Operator::Equal, Value::Float(5.0)))));
    }

    #[test]
    fn test_ordering_numeric() -> crate::error::Result<()> {
        let r = record(&[("age", Value::Integer(20))]);
        for (clause, expected) in [
            ("age > 15", true),
            ("age > 20", false),
            ("age >= 20", true),
            ("age < 100", true),
            ("age <= 19", false),
            ("age > 9.5", true),
        ] {
            let cond = parse_where_clause(clause)?;
            assert_eq!(matches(&r, cond.as_ref()), expected, "{}", clause);
        }

        // Numeric strings compare as numbers, not lexicographically
        let r = record(&[("v", Value::from("10"))]);
        assert!(matches(&r, Some(&Condition::new("v", Operator::GreaterThan, Value::Integer(9)))));
        Ok(())
    }

    #[test]
    fn test_ordering_falls_back_to_strings() {
        let r = record(&[("name", Value::from("bob"))]);
        assert!(matches(&r, Some(&Condition::new("name", Operator::GreaterThan, "alice"))));
        assert!(matches(&r, Some(&Condition::new("name", Operator::LessThan, "carol"))));
        assert!(matches(&r, Some(&Condition::new("name", Operator::GreaterThanOrEqual, "bob"))));
        // "bob" vs 9 compares "bob" with "9"
        assert!(matches(&r, Some(&Condition::new("name", Operator::GreaterThan, Value::Integer(9)))));
    }
}
