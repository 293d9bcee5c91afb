use thiserror::Error;

/// Canonical result for core and operators.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Union/minus over tables that differ in arity or per-position domain.
    #[error("schema mismatch between '{left}' and '{right}': {reason}")]
    SchemaMismatch {
        left: String,
        right: String,
        reason: String,
    },

    #[error("attribute '{attribute}' not found in table '{table}'")]
    AttributeNotFound { table: String, attribute: String },

    #[error("arity mismatch: expected {expected} values, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("type mismatch at position {position}: expected {expected}, got {got}")]
    TypeMismatch {
        position: usize,
        expected: String,
        got: String,
    },

    #[error("duplicate key {key} in table '{table}'")]
    DuplicateKey { table: String, key: String },

    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("join attribute lists differ in length: {left} vs {right}")]
    JoinArity { left: usize, right: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("planning error: {0}")]
    Plan(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
