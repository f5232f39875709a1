//! Shared Error Types
//!
//! Failures detected on the client before anything is sent: a form field that
//! does not pass its checks, or a value that does not name a known variant.
//!
//! # Usage
//!
//! ```rust
//! use bookworm::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title is required");
//! assert_eq!(error.user_message(), "Title is required");
//! assert_eq!(error.field(), "title");
//! ```
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A form or argument failed validation; nothing was sent
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// Wire name of the offending field
        field: String,
        /// Shown to the user as is
        message: String,
    },

    /// Text that should name a shelf, role or similar closed set did not
    #[error("Unknown {kind} '{value}': expected {expected}")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl SharedError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unknown_variant(kind: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
            expected,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
            Self::UnknownVariant { kind, .. } => kind,
        }
    }

    /// Text suitable for a transient notification
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
            unknown @ Self::UnknownVariant { .. } => unknown.to_string(),
        }
    }
}
