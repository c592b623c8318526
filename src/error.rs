//! Error taxonomy for registration and dispatch.
//!
//! # Design Decisions
//! - One tagged enum per failure class; callers pattern match on variants
//! - Builder-phase and parameter errors occur strictly before any network call
//! - `Request`/`RequestAuth` are raised only by success-checking response
//!   handlers; the default handler returns the raw response regardless of status

use serde_json::Value;
use thiserror::Error;

use crate::transport::decode_json_lossy;

/// Errors surfaced by the client. Nothing is retried or swallowed internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller misuse of the builder surface: registering against a started
    /// tree, a non-method symbolic name while building, a duplicate sibling
    /// name, or an empty method list.
    #[error("usage error: {0}")]
    Usage(String),

    /// The requested method, route, or operation does not exist in the
    /// current mode.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// A required or path parameter was missing at call time.
    #[error("required parameter {param} is missing")]
    ParamValidation {
        /// Bare name for declared required parameters, `:name` for path
        /// template tokens.
        param: String,
    },

    /// The server reported a non-success status.
    #[error("request to {url} failed with status {code}")]
    Request {
        code: u16,
        content: Vec<u8>,
        url: String,
    },

    /// The server rejected the request with 401 or 403.
    #[error("authentication failed")]
    RequestAuth { code: u16, content: Vec<u8> },

    /// The transport collaborator failed before producing a response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Wrap a transport collaborator failure.
    pub(crate) fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// HTTP status carried by `Request`/`RequestAuth` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { code, .. } | Self::RequestAuth { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Best-effort structured decode of the response body carried by
    /// `Request`/`RequestAuth` errors. Falls back to a string of the raw
    /// bytes when the body is not valid JSON.
    pub fn response_body(&self) -> Option<Value> {
        match self {
            Self::Request { content, .. } | Self::RequestAuth { content, .. } => {
                Some(decode_json_lossy(content))
            }
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
