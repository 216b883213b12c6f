//! Error types for acento

use thiserror::Error;

/// Main error type for acento
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown or unsupported region: {0}")]
    InvalidRegion(String),

    #[error("Input text is empty")]
    EmptyInput,

    #[error("Malformed audio: {0}")]
    MalformedAudio(String),

    #[error("Audio processing error: {0}")]
    Audio(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Result type for acento operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        Error::Audio(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(_: regex::Error) -> Self {
        // Pattern text stays internal
        Error::Config("invalid rewrite pattern".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        let err = Error::InvalidRegion("klingon".into());
        assert_eq!(err.to_string(), "Unknown or unsupported region: klingon");
        assert_eq!(Error::EmptyInput.to_string(), "Input text is empty");
    }

    #[test]
    fn test_regex_error_hides_pattern() {
        let bad = regex::Regex::new("(unclosed").unwrap_err();
        let err: Error = bad.into();
        assert!(!err.to_string().contains("unclosed"));
    }
}
