use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MethodError {
    #[error("method `{name}` not found")]
    NotFound { name: String },

    #[error("invalid argument at index {index}: {reason}")]
    InvalidArgument { index: usize, reason: String },

    #[error("invalid property `{name}`: {reason}")]
    InvalidProperty { name: String, reason: String },

    #[error("{message}")]
    Custom { message: String },
}

impl MethodError {
    pub fn not_found<S: ToString>(name: S) -> Self {
        Self::NotFound { name: name.to_string() }
    }

    pub fn invalid_argument<S: ToString>(index: usize, reason: S) -> Self {
        Self::InvalidArgument { index, reason: reason.to_string() }
    }

    pub fn invalid_property<N: ToString, S: ToString>(name: N, reason: S) -> Self {
        Self::InvalidProperty { name: name.to_string(), reason: reason.to_string() }
    }

    pub fn custom<S: ToString>(message: S) -> Self {
        Self::Custom { message: message.to_string() }
    }
}

/// Returns the argument at `index`, or [`MethodError::InvalidArgument`] when the caller passed fewer.
pub fn argument(args: &[Value], index: usize) -> Result<&Value, MethodError> {
    args.get(index).ok_or_else(|| MethodError::invalid_argument(index, format!("expected at least {} arguments", index + 1)))
}

/// Like [`argument`], additionally requiring an integer.
pub fn int_argument(args: &[Value], index: usize) -> Result<i64, MethodError> {
    let value = argument(args, index)?;
    value.as_i64().ok_or_else(|| MethodError::invalid_argument(index, format!("expected integer, found {value}")))
}

/// Reads an integer out of a method result.
pub fn int_value(value: &Value) -> Result<i64, MethodError> {
    value.as_i64().ok_or_else(|| MethodError::custom(format!("expected integer, found {value}")))
}
