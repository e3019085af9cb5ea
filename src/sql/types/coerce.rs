use crate::error::{Error, Result};

use super::{DataType, Value};

/// Converts a parsed value into the declared type of the column it is written to
///
/// - `int`: a native integer, or a string made only of ASCII digits
/// - `str`: anything, through its display form
/// - `bool`: a native boolean, or `true`/`1`/`false`/`0` as a string (any case)
pub fn coerce(value: Value, datatype: DataType) -> Result<Value> {
    match (datatype, value) {
        (DataType::Integer, Value::Integer(i)) => Ok(Value::Integer(i)),
        (DataType::Integer, Value::String(s)) if is_digits(&s) => s
            .parse()
            .map(Value::Integer)
            .map_err(|_| mismatch(datatype, &Value::String(s))),
        (DataType::String, Value::String(s)) => Ok(Value::String(s)),
        (DataType::String, v) => Ok(Value::String(v.to_string())),
        (DataType::Boolean, Value::Boolean(b)) => Ok(Value::Boolean(b)),
        (DataType::Boolean, Value::String(s)) => match s.to_lowercase().as_str() {
            "true" | "1" => Ok(Value::Boolean(true)),
            "false" | "0" => Ok(Value::Boolean(false)),
            _ => Err(mismatch(datatype, &Value::String(s))),
        },
        (datatype, v) => Err(mismatch(datatype, &v)),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn mismatch(datatype: DataType, value: &Value) -> Error {
    Error::TypeMismatch {
        expected: datatype.to_tag().to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::coerce;
    use crate::{
        error::{Error, Result},
        sql::types::{DataType, Value},
    };

    #[test]
    fn test_coerce_integer() -> Result<()> {
        assert_eq!(coerce(Value::Integer(5), DataType::Integer)?, Value::Integer(5));
        assert_eq!(coerce(Value::from("0042"), DataType::Integer)?, Value::Integer(42));

        for bad in [
            Value::from("abc"),
            Value::from("-3"),
            Value::from(""),
            Value::Float(1.5),
            Value::Boolean(true),
        ] {
            assert!(matches!(
                coerce(bad, DataType::Integer),
                Err(Error::TypeMismatch { .. })
            ));
        }
        Ok(())
    }

    #[test]
    fn test_coerce_string() -> Result<()> {
        assert_eq!(coerce(Value::from("x"), DataType::String)?, Value::from("x"));
        assert_eq!(coerce(Value::Integer(10), DataType::String)?, Value::from("10"));
        assert_eq!(coerce(Value::Boolean(false), DataType::String)?, Value::from("false"));
        assert_eq!(coerce(Value::Float(2.0), DataType::String)?, Value::from("2.0"));
        Ok(())
    }

    #[test]
    fn test_coerce_boolean() -> Result<()> {
        assert_eq!(coerce(Value::Boolean(true), DataType::Boolean)?, Value::Boolean(true));
        assert_eq!(coerce(Value::from("TRUE"), DataType::Boolean)?, Value::Boolean(true));
        assert_eq!(coerce(Value::from("1"), DataType::Boolean)?, Value::Boolean(true));
        assert_eq!(coerce(Value::from("False"), DataType::Boolean)?, Value::Boolean(false));
        assert_eq!(coerce(Value::from("0"), DataType::Boolean)?, Value::Boolean(false));

        // An unquoted 1 parses as an integer and is not accepted
        assert!(coerce(Value::Integer(1), DataType::Boolean).is_err());
        assert!(coerce(Value::from("yes"), DataType::Boolean).is_err());
        Ok(())
    }
}
