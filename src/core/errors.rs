//! Error types for the phash-rs library.
//!
//! The similarity primitives themselves are total over their inputs, so the
//! error taxonomy here covers the surfaces around them: configuration,
//! fingerprint validation, parsing of user-supplied hashes and I/O.

use std::io;

use thiserror::Error;

/// Main result type for phash operations.
pub type Result<T> = std::result::Result<T, PhashError>;

/// Error type for all phash operations.
#[derive(Error, Debug)]
pub enum PhashError {
    /// I/O related errors (reading fingerprint files, writing configs)
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

    /// Parse errors for hashes and coefficient lists
    #[error("Parse error: {message}")]
    Parse {
        /// Error description
        message: String,
        /// The raw input that failed to parse
        input: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data format being processed
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },
}

impl PhashError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error naming the offending field
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new parse error
    pub fn parse(message: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            input: Some(input.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error naming the offending field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Prefix the error message with context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        match &mut self {
            Self::Io { message, .. }
            | Self::Config { message, .. }
            | Self::Parse { message, .. }
            | Self::Serialization { message, .. }
            | Self::Validation { message, .. } => {
                *message = format!("{}: {}", context.into(), message);
            }
        }
        self
    }
}

impl From<io::Error> for PhashError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for PhashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for PhashError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Result extension trait for adding context to errors
pub trait PhashResultExt<T> {
    /// Add lazily built context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> PhashResultExt<T> for std::result::Result<T, E>
where
    E: Into<PhashError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PhashError::config_field("must be positive", "max_threads");
        assert!(matches!(
            err,
            PhashError::Config { field: Some(ref f), .. } if f == "max_threads"
        ));

        let err = PhashError::parse("not a hash", "0xZZ");
        assert!(matches!(err, PhashError::Parse { .. }));
    }

    #[test]
    fn test_config_context_prefixes_message() {
        let err = PhashError::config_field("must be at most 64", "max_hamming_distance")
            .with_context("phash.yml");
        assert_eq!(
            err.to_string(),
            "Configuration error: phash.yml: must be at most 64"
        );
    }

    #[test]
    fn test_validation_context_prefixes_message() {
        let err = PhashError::validation("empty coefficients").with_context("photo-1");
        assert_eq!(
            err.to_string(),
            "Validation error: photo-1: empty coefficients"
        );
    }

    #[test]
    fn test_result_extension() {
        let result: std::result::Result<i32, std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ));

        let err = result.context("Failed to read fingerprints").unwrap_err();
        assert!(matches!(err, PhashError::Io { .. }));
        assert!(err.to_string().contains("Failed to read fingerprints"));
    }

    #[test]
    fn test_yaml_conversion() {
        let err: PhashError = serde_yaml::from_str::<Vec<u8>>("{ not: [a list")
            .unwrap_err()
            .into();
        assert!(matches!(
            err,
            PhashError::Serialization { data_type: Some(ref kind), .. } if kind == "YAML"
        ));
    }
}
