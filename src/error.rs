use thiserror::Error;

/// Unified error type for the crate.
///
/// Two conditions are fatal: values that must coerce but cannot
/// (`MalformedInput`) and callers handing the engine tables it cannot
/// compute year bounds from (`Precondition`). Unsupported questions and
/// empty filter results are ordinary values, not errors.
#[derive(Error, Debug)]
pub enum QaError {
    /// A column that must coerce (year, month) held a non-coercible value,
    /// or a required identity column was missing entirely.
    #[error("malformed input: column `{column}` has unusable value `{value}`")]
    MalformedInput { column: String, value: String },

    /// Caller violated an engine precondition (e.g. both tables empty).
    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QaError {
    pub fn malformed(column: &str, value: &str) -> Self {
        QaError::MalformedInput {
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type QaResult<T> = Result<T, QaError>;
