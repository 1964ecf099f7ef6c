//! Error types for filter parsing.

use thiserror::Error;

/// Result type alias for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while parsing a filter specification.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// The operator in the first array slot is not part of the filter language.
    #[error("unknown filter operator: {0}")]
    UnknownOperator(String),

    /// An operator received the wrong number of operands.
    #[error("filter operator {op} expects {expected} operands, found {found}")]
    InvalidArity {
        /// The operator.
        op: String,
        /// Human readable description of the accepted operand count.
        expected: &'static str,
        /// Number of operands actually present.
        found: usize,
    },

    /// A property key operand was not a string.
    #[error("filter key must be a string, found {found}")]
    InvalidKey {
        /// JSON type name of the offending operand.
        found: &'static str,
    },

    /// The filter is not an array, boolean, or null.
    #[error("invalid filter: {message}")]
    InvalidFilter {
        /// Description of what went wrong.
        message: String,
    },
}

impl FilterError {
    /// Create an invalid arity error.
    #[inline]
    pub fn invalid_arity(op: impl Into<String>, expected: &'static str, found: usize) -> Self {
        FilterError::InvalidArity {
            op: op.into(),
            expected,
            found,
        }
    }

    /// Create an invalid filter error.
    #[inline]
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        FilterError::InvalidFilter {
            message: message.into(),
        }
    }
}

/// Get the type name of a JSON value.
#[inline]
pub(crate) fn value_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
