//! Error types for firehose-transform
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for firehose-transform
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Record Errors
    // ============================================================================
    #[error("Failed to decode record '{record_id}': {message}")]
    Decode { record_id: String, message: String },

    #[error("Unsupported {kind} value in field '{field}'")]
    UnsupportedValue { field: String, kind: String },

    #[error("Invalid SQL identifier: '{identifier}'")]
    InvalidIdentifier { identifier: String },

    #[error("Payload for table '{table}' has no fields")]
    EmptyPayload { table: String },

    // ============================================================================
    // Routing Errors
    // ============================================================================
    #[error("Unknown stream '{stream}' (suffix '{suffix}')")]
    UnknownStream { stream: String, suffix: String },

    // ============================================================================
    // Execution Errors
    // ============================================================================
    #[error("Statement execution failed for table '{table}': {message}")]
    Execution { table: String, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a decode error for a record
    pub fn decode(record_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            record_id: record_id.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported value error
    pub fn unsupported_value(field: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            field: field.into(),
            kind: kind.into(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(identifier: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
        }
    }

    /// Create an unknown stream error
    pub fn unknown_stream(stream: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::UnknownStream {
            stream: stream.into(),
            suffix: suffix.into(),
        }
    }

    /// Create an execution error
    pub fn execution(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Whether the failure came from the execution engine
    pub fn is_execution(&self) -> bool {
        matches!(self, Error::Execution { .. })
    }
}

/// Result type alias for firehose-transform
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for prefixing errors with what was being attempted
pub trait ResultExt<T> {
    /// Add a fixed context message
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add a context message built only on failure
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        let message = message.into();
        self.with_context(|| message)
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", f(), e.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::decode("rec-1", "invalid base64");
        assert_eq!(
            err.to_string(),
            "Failed to decode record 'rec-1': invalid base64"
        );

        let err = Error::execution("rtcstats", "relation does not exist");
        assert_eq!(
            err.to_string(),
            "Statement execution failed for table 'rtcstats': relation does not exist"
        );
    }

    #[test]
    fn test_is_execution() {
        assert!(Error::execution("t", "boom").is_execution());
        assert!(!Error::decode("r", "bad").is_execution());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
