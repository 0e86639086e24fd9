//! Errors crossing the controller boundary.

use thiserror::Error;

/// Status reported when a failed request carries none.
pub const DEFAULT_ERROR_STATUS: u16 = 501;

/// HTTP status signalling that the request needs a fresh authentication.
pub const UNAUTHORIZED_STATUS: u16 = 401;

/// Failure of a remote request (authentication, storage status, pricing).
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{}", self.message_or_default())]
pub struct RequestError {
    pub status: Option<u16>,
    pub message: Option<String>,
}

impl RequestError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: Some(message.into()),
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            message: None,
        }
    }

    pub fn status_or_default(&self) -> u16 {
        self.status.unwrap_or(DEFAULT_ERROR_STATUS)
    }

    /// The error's own message, or `ERROR <status>`.
    pub fn message_or_default(&self) -> String {
        match &self.message {
            Some(message) if !message.is_empty() => message.clone(),
            _ => format!("ERROR {}", self.status_or_default()),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(UNAUTHORIZED_STATUS)
    }
}

/// Failure of a clipboard write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Failure talking to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("controller was disposed")]
    Disposed,
}
