//! Validation Error Types

use thiserror::Error;

/// A client-side precondition was violated.
///
/// Raised before any request leaves the process. `field` names the offending
/// argument so callers can point at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid argument `{field}`: {reason}")]
pub struct InvalidArgument {
    /// Name of the rejected field.
    pub field: String,
    /// Human-readable description of the constraint.
    pub reason: String,
}

impl InvalidArgument {
    /// Create a new error for `field`.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for validation.
pub type Result<T> = std::result::Result<T, InvalidArgument>;
