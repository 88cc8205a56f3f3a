//! Error types for xmlschema-core
//!
//! Datatype constructors fail with [`Error::InvalidValue`]; the context walker
//! reports structural problems as [`ValidationError`]s and misuse of a closed
//! context as [`Error::InvalidOperation`]. The DFA itself never fails.

use std::fmt;
use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xmlschema-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A string or number outside the lexical/value space of a datatype
    #[error("\"{value}\" is an invalid {kind}.")]
    InvalidValue {
        /// The offending (possibly normalized) value or component
        value: String,
        /// Short name of the datatype or component that rejected it
        kind: String,
    },

    /// An operation requested in a state that forbids it
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Structural validation error
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Grammar table (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an [`Error::InvalidValue`] for `value` rejected by `kind`
    pub fn invalid_value(value: impl Into<String>, kind: impl Into<String>) -> Self {
        Error::InvalidValue {
            value: value.into(),
            kind: kind.into(),
        }
    }

    /// Whether this is an [`Error::InvalidValue`]
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Error::InvalidValue { .. })
    }
}

/// Structural validation error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Path to the element that failed validation
    pub path: Option<String>,
    /// Rendered list of what was expected instead
    pub expected: Option<String>,
    /// Original reason (e.g. the datatype error message)
    pub reason: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            expected: None,
            reason: None,
        }
    }

    /// Set the path where validation failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the expected items
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " Expected: {}.", expected)?;
        }

        if let Some(ref reason) = self.reason {
            write!(f, "\n\nReason: {}", reason)?;
        }

        if let Some(ref path) = self.path {
            write!(f, "\n\nPath: {}", path)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}
