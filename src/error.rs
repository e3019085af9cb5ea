use thiserror::Error;

/// Custom Result type for primdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds reported by primdb operations
///
/// None of these is fatal: every operation returns the error to its caller,
/// which decides whether to keep going.
#[derive(Error, Debug)]
pub enum Error {
    #[error("table \"{0}\" does not exist")]
    TableNotFound(String),

    #[error("table \"{0}\" already exists")]
    TableAlreadyExists(String),

    /// Table name that is empty or would leave the data directory
    #[error("invalid table name \"{0}\"")]
    InvalidTableName(String),

    /// Column spec that is not exactly `name:type`
    #[error("malformed column spec \"{0}\", expected name:type")]
    MalformedColumnSpec(String),

    #[error("unsupported data type \"{data_type}\" for column \"{column}\"")]
    UnsupportedColumnType { column: String, data_type: String },

    /// WHERE / SET / VALUES syntax errors, and command lines the planner rejects
    #[error("malformed clause: {0}")]
    MalformedClause(String),

    #[error("expected {expected} values, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("type mismatch: expected {expected}, got {value}")]
    TypeMismatch { expected: String, value: String },

    #[error("table \"{0}\" has no identifiers left")]
    IdExhausted(String),

    /// A persisted document exists but cannot be read back
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Serialization(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::TableNotFound("users".into()).to_string(),
            "table \"users\" does not exist"
        );
        assert_eq!(
            Error::ArityMismatch { expected: 2, actual: 3 }.to_string(),
            "expected 2 values, got 3"
        );
        assert_eq!(
            Error::UnsupportedColumnType {
                column: "age".into(),
                data_type: "float".into()
            }
            .to_string(),
            "unsupported data type \"float\" for column \"age\""
        );
        assert_eq!(
            Error::InvalidTableName("../up".into()).to_string(),
            "invalid table name \"../up\""
        );
    }
}
