//! Unified error types for Feedline
//!
//! This module defines error types for each layer:
//! - `RepositoryError`: Data source failures (recoverable, surfaced as feed state)
//! - `FeedError`: View model failures that are logged and swallowed
//! - `ObserverError`: A single observer failing during a notification pass
//! - `ParseError`: Console command parsing

use thiserror::Error;

use crate::domain::entities::PostId;

/// Data source errors
///
/// Cloneable so the view model can keep the last one in its state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// View model errors - never cross the view model boundary
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Post {0} is not in the current feed")]
    UnknownPost(PostId),
}

/// Errors raised by an observer while handling a notification
#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("Render failed: {0}")]
    Render(String),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Observer panicked: {0}")]
    Panicked(String),
}

/// Parse error for console commands
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing argument for: {0}")]
    MissingArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_error_wraps_into_feed_error() {
        let err: FeedError = RepositoryError::Unavailable("timeout".to_string()).into();

        assert!(matches!(err, FeedError::Repository(_)));
        assert_eq!(
            err.to_string(),
            "Repository error: Data source unavailable: timeout"
        );
    }

    #[test]
    fn observer_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ObserverError = io.into();

        assert!(err.to_string().starts_with("Output error:"));
    }
}
