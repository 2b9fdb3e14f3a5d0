//! Error types for client operations.
//!
//! Provides the failure taxonomy shared by the transport and the
//! data-access layer: authentication failures handled globally, local
//! validation failures that never reach the network, structured server
//! errors, and transport-level failures. No failure is fatal to the
//! process; every error is scoped to the operation that produced it.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the request with 401, or an authenticated
    /// operation was invoked without a session. By the time the caller
    /// sees this, the session store has already been cleared.
    #[error("authentication required")]
    Unauthorized,

    /// A local precondition failed before any request was sent.
    /// Recoverable: fix the input and retry.
    #[error("{0}")]
    Validation(String),

    /// The server reported a failure (4xx/5xx other than 401) with a
    /// structured message body.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Timeout, connection failure, or malformed response body.
    /// Not retried; retry policy belongs to the caller.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Reading or writing the persisted session file failed.
    #[error("session storage error at '{path}': {source}")]
    SessionStorage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error body shape used by the server: `message` is either a single
/// string or a list of strings (the first one is shown).
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: ErrorMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorBody {
    /// First message in the body, or a fallback when the list is empty.
    pub fn first_message(self) -> String {
        match self.message {
            ErrorMessage::One(msg) => msg,
            ErrorMessage::Many(msgs) => msgs
                .into_iter()
                .next()
                .unwrap_or_else(|| "request failed".to_string()),
        }
    }
}
