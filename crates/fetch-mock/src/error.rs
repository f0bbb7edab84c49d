//! Error types surfaced through a call's failure channel.

use std::fmt;
use std::sync::Arc;

/// Boxed error used by user predicates and real `Fetch` implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The value a test-declared rejection fails with.
///
/// A rejection either carries an error object or a raw value. Raw values are
/// surfaced as-is so assertions against plain strings keep working.
#[derive(Debug, Clone)]
pub enum RejectValue {
    Error(Arc<dyn std::error::Error + Send + Sync + 'static>),
    Raw(serde_json::Value),
}

impl RejectValue {
    /// Wrap a concrete error.
    pub fn error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RejectValue::Error(Arc::new(err))
    }

    /// Raw string payload, if this rejection carries one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RejectValue::Raw(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RejectValue::Error(_))
    }
}

impl fmt::Display for RejectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectValue::Error(err) => write!(f, "{err}"),
            RejectValue::Raw(serde_json::Value::String(s)) => f.write_str(s),
            RejectValue::Raw(other) => write!(f, "{other}"),
        }
    }
}

impl PartialEq for RejectValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RejectValue::Raw(a), RejectValue::Raw(b)) => a == b,
            (RejectValue::Error(a), RejectValue::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for RejectValue {
    fn from(value: &str) -> Self {
        RejectValue::Raw(serde_json::Value::String(value.to_string()))
    }
}

impl From<String> for RejectValue {
    fn from(value: String) -> Self {
        RejectValue::Raw(serde_json::Value::String(value))
    }
}

impl From<serde_json::Value> for RejectValue {
    fn from(value: serde_json::Value) -> Self {
        RejectValue::Raw(value)
    }
}

/// Failure of a single fetch call.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The call input could not be turned into a request.
    #[error("unable to parse input: {0}")]
    Normalization(String),

    /// Cancellation was observed before a response was produced.
    #[error("The operation was aborted.")]
    Aborted,

    /// A rejection registered by the test.
    #[error("{0}")]
    Rejected(RejectValue),

    /// The declared outcome cannot form a valid response.
    #[error("invalid mock response: {0}")]
    InvalidResponse(String),

    /// A match predicate failed while being evaluated.
    #[error("match predicate failed: {0}")]
    Predicate(#[source] BoxError),

    /// Raised by a real (non-mocked) fetch implementation.
    #[error(transparent)]
    Delegation(BoxError),
}

impl FetchError {
    pub fn is_abort(&self) -> bool {
        matches!(self, FetchError::Aborted)
    }

    pub fn is_normalization(&self) -> bool {
        matches!(self, FetchError::Normalization(_))
    }

    /// The rejection value, if this failure was declared by the test.
    pub fn rejection(&self) -> Option<&RejectValue> {
        match self {
            FetchError::Rejected(value) => Some(value),
            _ => None,
        }
    }

    /// Build a delegation error from any message, for real implementations.
    pub fn delegation(message: impl Into<String>) -> Self {
        let message: String = message.into();
        FetchError::Delegation(message.into())
    }
}
