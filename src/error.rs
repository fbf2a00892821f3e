//! Error types for the Postmark client.

use crate::models::{PostmarkResponse, PostmarkStatus};
use thiserror::Error;

/// Errors that can occur when talking to Postmark or preparing a request.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure: connection, TLS, timeout, or body read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A response body or request payload could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading attachment content from a file or stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Postmark rejected the call.
    ///
    /// The full response is carried so callers can branch on
    /// [`PostmarkResponse::error_code`] without re-parsing the message.
    #[error("Postmark {:?} (code {}): {}", .response.status, .response.error_code, .response.message)]
    Api {
        /// The classified response returned by the service.
        response: Box<PostmarkResponse>,
    },

    /// A batch mixed body messages with templated messages.
    #[error("a batch must contain only body messages or only templated messages")]
    MixedBatch,

    /// The configured base URL cannot be parsed or cannot carry a path.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A configured token cannot be sent as an HTTP header value.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
}

impl Error {
    /// Classification of the failure, when it has one.
    ///
    /// Transport failures count as [`PostmarkStatus::ServerError`].
    pub fn status(&self) -> Option<PostmarkStatus> {
        match self {
            Error::Api { response } => Some(response.status),
            Error::Request(_) => Some(PostmarkStatus::ServerError),
            _ => None,
        }
    }

    /// The service response carried by an [`Error::Api`].
    pub fn response(&self) -> Option<&PostmarkResponse> {
        match self {
            Error::Api { response } => Some(response),
            _ => None,
        }
    }

    /// Postmark error code carried by an [`Error::Api`].
    pub fn error_code(&self) -> Option<i64> {
        self.response().map(|r| r.error_code)
    }
}
