//! Outcome of an API call.

use crate::json::date;
use chrono::{DateTime, FixedOffset};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// How a call ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostmarkStatus {
    #[default]
    Success,
    /// The service rejected the request: bad token, unverified sender,
    /// malformed recipient and the like.
    UserError,
    /// The service failed or could not be reached; retrying later may help.
    ServerError,
}

impl PostmarkStatus {
    /// Classify an HTTP status together with Postmark's `ErrorCode`.
    pub fn classify(http: StatusCode, error_code: i64) -> Self {
        if http.is_success() {
            if error_code == 0 {
                PostmarkStatus::Success
            } else {
                PostmarkStatus::UserError
            }
        } else if http.is_client_error() {
            PostmarkStatus::UserError
        } else {
            PostmarkStatus::ServerError
        }
    }
}

/// Postmark's generic response: send results, deletions, and error bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PostmarkResponse {
    /// Derived locally; never present on the wire.
    #[serde(skip)]
    pub status: PostmarkStatus,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub error_code: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub message: String,
    #[serde(rename = "MessageID")]
    pub message_id: Option<String>,
    #[serde(with = "date::option")]
    pub submitted_at: Option<DateTime<FixedOffset>>,
    pub to: Option<String>,
}

impl PostmarkResponse {
    /// Set [`status`](Self::status) from the HTTP status and error code.
    pub fn classified(mut self, http: StatusCode) -> Self {
        self.status = PostmarkStatus::classify(http, self.error_code);
        self
    }

    /// Build the response for a failed call from its raw body.
    ///
    /// Bodies that are not Postmark error JSON (proxies, gateways) are kept
    /// verbatim as the message.
    pub fn from_error_body(http: StatusCode, body: &str) -> Self {
        let response = crate::json::try_from_str::<PostmarkResponse>(body).unwrap_or_else(|| {
            PostmarkResponse {
                message: if body.trim().is_empty() {
                    http.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    body.to_string()
                },
                ..Default::default()
            }
        });
        response.classified(http)
    }

    pub fn is_success(&self) -> bool {
        self.status == PostmarkStatus::Success
    }
}
