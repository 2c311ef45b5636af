//! Error types for the nomen-rs library.
//!
//! The naming core itself is total and never fails. Errors only arise at the
//! edges: reading configuration or type models from disk, deserializing them,
//! and parsing type expressions supplied as text.

use std::io;

use thiserror::Error;

/// Main result type for nomen operations.
pub type Result<T> = std::result::Result<T, NomenError>;

/// Error type for all fallible nomen operations.
#[derive(Error, Debug)]
pub enum NomenError {
    /// I/O related errors (reading config, type models, subject files)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Type expression parsing errors
    #[error("Parse error at byte {position} in `{input}`: {message}")]
    Parse {
        /// Error description
        message: String,
        /// The type expression being parsed
        input: String,
        /// Byte offset where parsing stopped
        position: usize,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data format being handled
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl NomenError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new type expression parse error
    pub fn parse(message: impl Into<String>, input: impl Into<String>, position: usize) -> Self {
        Self::Parse {
            message: message.into(),
            input: input.into(),
            position,
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error with field context
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Field the error refers to, when known
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Config { field, .. } | Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

impl From<io::Error> for NomenError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for NomenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for NomenError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}
