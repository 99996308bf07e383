//! Client Error Types
//!
//! Closed taxonomy of failures surfaced by [`ApiClient`](crate::client::ApiClient).
//! The four status-mapped variants display as their fixed tag strings so
//! callers that only look at the message still see `AUTHENTICATION_FAILED`
//! and friends.

use thiserror::Error;

use crate::session::SessionError;

/// Fallback message when a failed response carries neither `error` nor `message`
pub const GENERIC_FAILURE_MESSAGE: &str = "API request failed";

/// Coarse failure kind callers can match exhaustively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 401: token expired or invalid, token has been cleared
    AuthenticationFailed,
    /// 403: authenticated but not allowed, token retained
    AccessDenied,
    /// 404
    UserNotFound,
    /// 5xx
    ServerError,
    /// Anything else: unmapped 4xx, transport, decoding
    Generic,
}

impl ErrorKind {
    /// Wire-style tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AuthenticationFailed => "AUTHENTICATION_FAILED",
            ErrorKind::AccessDenied => "ACCESS_DENIED",
            ErrorKind::UserNotFound => "USER_NOT_FOUND",
            ErrorKind::ServerError => "SERVER_ERROR",
            ErrorKind::Generic => "GENERIC",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by every client call
#[derive(Error, Debug)]
pub enum ApiError {
    /// 401 response; the stored token was cleared as a side effect
    #[error("AUTHENTICATION_FAILED")]
    AuthenticationFailed { message: String },

    /// 403 response
    #[error("ACCESS_DENIED")]
    AccessDenied { message: String },

    /// 404 response
    #[error("USER_NOT_FOUND")]
    NotFound { message: String },

    /// 5xx response
    #[error("SERVER_ERROR")]
    Server { status: u16, message: String },

    /// Any other non-success status, carrying the server-supplied message
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport failure (DNS, connect, TLS, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Success body was not valid JSON, or did not match the requested type
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Success body decoded as neither a `{ data }` envelope nor a bare payload
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// Token store failure
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Request body could not be encoded
    #[error("Failed to encode request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// Map this error onto the closed kind taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::AuthenticationFailed { .. } => ErrorKind::AuthenticationFailed,
            ApiError::AccessDenied { .. } => ErrorKind::AccessDenied,
            ApiError::NotFound { .. } => ErrorKind::UserNotFound,
            ApiError::Server { .. } => ErrorKind::ServerError,
            ApiError::Api { .. }
            | ApiError::Network(_)
            | ApiError::Decode(_)
            | ApiError::UnexpectedShape(_)
            | ApiError::Session(_)
            | ApiError::Encode(_) => ErrorKind::Generic,
        }
    }

    /// HTTP status that produced this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthenticationFailed { .. } => Some(401),
            ApiError::AccessDenied { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Server { status, .. } | ApiError::Api { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message the server sent alongside the failure, when there was one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::AuthenticationFailed { message }
            | ApiError::AccessDenied { message }
            | ApiError::NotFound { message }
            | ApiError::Server { message, .. }
            | ApiError::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Build the error for a non-success status.
    ///
    /// `message` is whatever the error body yielded (or the synthesized
    /// `HTTP <code>: <reason>` text).
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ApiError::AuthenticationFailed { message },
            403 => ApiError::AccessDenied { message },
            404 => ApiError::NotFound { message },
            s if s >= 500 => ApiError::Server { status: s, message },
            s => ApiError::Api { status: s, message },
        }
    }
}

/// Result type for client operations
pub type ApiResult<T> = Result<T, ApiError>;
