//! # Embed Error Types
//!
//! Typed error handling for the card-embed SDK.
//! Every fallible operation returns `Result<T, EmbedError>`.

use thiserror::Error;

/// Core error type for link construction, mounting and configuration
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Mount target given by id does not exist in the document
    #[error("Invalid mount target: no element with id '{id}'")]
    InvalidMountTarget { id: String },

    /// Base URL or path could not be combined into a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration errors (bad env values, unparsable config file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Inbound message could not be decoded
    #[error("Message parse error: {0}")]
    MessageParse(String),

    /// A DOM call failed (element creation, listener registration)
    #[error("DOM error: {0}")]
    Dom(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EmbedError {
    /// Returns true if the error was caused by the caller's input rather
    /// than the environment
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            EmbedError::InvalidMountTarget { .. } | EmbedError::InvalidUrl(_)
        )
    }
}

impl From<url::ParseError> for EmbedError {
    fn from(err: url::ParseError) -> Self {
        EmbedError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for EmbedError {
    fn from(err: serde_json::Error) -> Self {
        EmbedError::Serialization(err.to_string())
    }
}

/// Result type alias for embed operations
pub type EmbedResult<T> = Result<T, EmbedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_errors() {
        assert!(EmbedError::InvalidMountTarget {
            id: "missing".into()
        }
        .is_caller_error());
        assert!(EmbedError::InvalidUrl("relative URL without a base".into()).is_caller_error());
        assert!(!EmbedError::Dom("createElement failed".into()).is_caller_error());
    }

    #[test]
    fn test_display() {
        let err = EmbedError::InvalidMountTarget {
            id: "checkout".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid mount target: no element with id 'checkout'"
        );
    }

    #[test]
    fn test_from_parse_error() {
        let err: EmbedError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, EmbedError::InvalidUrl(_)));
    }
}
