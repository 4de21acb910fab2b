//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Input is not a recognized video URL. Expected outcome; the caller re-prompts.
    #[error("Not a recognized YouTube video URL: {0}")]
    Parse(String),

    /// Identifier is well-formed but the video does not exist or is private.
    #[error("Video not found: {0}")]
    NotFound(String),

    /// Network failure, timeout or rate limit. Eligible for retry with backoff.
    #[error("Transient I/O failure: {0}")]
    Transient(String),

    /// Model artifacts missing or corrupt. Fatal at startup.
    #[error("Failed to load sentiment model: {0}")]
    ModelLoad(String),

    #[error("Sentiment classification failed: {0}")]
    Classifier(String),

    #[error("YouTube API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    /// True for failures worth retrying at the fetcher/reader boundary.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Transient(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_errors_are_retryable() {
        assert!(DomainError::Transient("timeout".into()).is_transient());
        assert!(!DomainError::NotFound("abc".into()).is_transient());
        assert!(!DomainError::Parse("x".into()).is_transient());
        assert!(!DomainError::Api("bad request".into()).is_transient());
    }
}
