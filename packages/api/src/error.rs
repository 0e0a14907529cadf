//! # Error taxonomy for API calls
//!
//! | Variant | Meaning | Shown to the user? |
//! |---------|---------|--------------------|
//! | [`ApiError::Transport`] | the request never got a response | generic message |
//! | [`ApiError::Request`] | the server answered with a non-success status | resolved server message |
//! | [`ApiError::Cancelled`] | the caller aborted the request | never |
//! | [`ApiError::Decode`] | a body did not match the expected shape | generic message |
//! | [`ApiError::Config`] | bad client configuration | as-is |
//!
//! Views call [`ApiError::user_message`] and render nothing when it returns
//! `None`. No variant is retried anywhere in this crate.

use serde_json::Value as JsonValue;

/// A non-success HTTP response, normalized.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    /// HTTP status code.
    pub status: u16,
    /// Resolved from `detail`, then `error`, then the body, then the status text.
    pub message: String,
    /// Parsed response body, when there was one.
    pub body: Option<JsonValue>,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("request cancelled")]
    Cancelled,

    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether the caller aborted this request on purpose.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status for server-side failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => Some(e.status),
            _ => None,
        }
    }

    /// Text to display, or `None` when nothing should be displayed.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Cancelled => None,
            Self::Request(e) => Some(e.message.clone()),
            Self::Transport(_) => {
                Some("Could not reach the server. Check your connection and try again.".into())
            }
            Self::Decode(_) => Some("The server sent an unexpected response.".into()),
            Self::Config(msg) => Some(msg.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_silent() {
        let err = ApiError::Cancelled;
        assert!(err.is_cancelled());
        assert_eq!(err.user_message(), None);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_request_error_surfaces_message() {
        let err = ApiError::from(RequestError {
            status: 404,
            message: "Recipe not found.".into(),
            body: None,
        });
        assert!(!err.is_cancelled());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message().as_deref(), Some("Recipe not found."));
        assert_eq!(err.to_string(), "Recipe not found.");
    }
}
