//! Error types for fraud-etl
//!
//! This module defines the error hierarchy for the whole pipeline.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Only the invocation handler flattens these into a status code and body.

use thiserror::Error;

/// The main error type for fraud-etl
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // Trigger Errors
    // ============================================================================
    #[error("Invalid trigger event: {message}")]
    InvalidEvent { message: String },

    // ============================================================================
    // Source Errors
    // ============================================================================
    #[error("Source unavailable ({location}): {message}")]
    SourceUnavailable { location: String, message: String },

    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    // ============================================================================
    // Persistence Errors
    // ============================================================================
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

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

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid event error
    pub fn invalid_event(message: impl Into<String>) -> Self {
        Self::InvalidEvent {
            message: message.into(),
        }
    }

    /// Create a source unavailable error
    pub fn source_unavailable(location: impl ToString, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            location: location.to_string(),
            message: message.into(),
        }
    }

    /// Create a malformed input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Short stable tag for structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. } => "config",
            Error::InvalidEvent { .. } => "invalid_event",
            Error::SourceUnavailable { .. } => "source_unavailable",
            Error::MalformedInput { .. } => "malformed_input",
            Error::Persistence { .. } => "persistence",
            Error::JsonParse(_) => "json",
            Error::Io(_) => "io",
            Error::Other(_) => "other",
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        let position = err
            .position()
            .map(|pos| format!(" (line {}, record {})", pos.line(), pos.record()));

        match err.into_kind() {
            csv::ErrorKind::Io(io) => Error::Io(io),
            kind => Error::malformed(format!(
                "{}{}",
                describe_csv_error(&kind),
                position.unwrap_or_default()
            )),
        }
    }
}

/// Render a CSV error kind without the position prefix csv adds itself
fn describe_csv_error(kind: &csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields but found {len}"),
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {err}"),
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => format!("field {}: {}", field + 1, err.kind()),
            None => err.kind().to_string(),
        },
        other => format!("{other:?}"),
    }
}

/// Result type alias for fraud-etl
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("RDS_HOST");
        assert_eq!(err.to_string(), "Missing required config field: RDS_HOST");

        let err = Error::source_unavailable("bucket/key.csv", "not found");
        assert_eq!(
            err.to_string(),
            "Source unavailable (bucket/key.csv): not found"
        );

        let err = Error::persistence("connection refused");
        assert_eq!(err.to_string(), "Persistence error: connection refused");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::malformed("x").kind(), "malformed_input");
        assert_eq!(Error::persistence("x").kind(), "persistence");
        assert_eq!(
            Error::source_unavailable("b/k", "x").kind(),
            "source_unavailable"
        );
        assert_eq!(Error::invalid_event("x").kind(), "invalid_event");
        assert_eq!(Error::missing_field("x").kind(), "config");
    }

    #[test]
    fn test_csv_error_is_malformed() {
        let data = "a,b\n1,2\n3\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let err = reader
            .records()
            .find_map(std::result::Result::err)
            .expect("ragged row should fail");

        let err = Error::from(err);
        assert_eq!(err.kind(), "malformed_input");
        assert!(err.to_string().contains("expected 2 fields but found 1"));
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
