//! Webhook configuration.

use super::headers::HeaderCollection;
use serde::{Deserialize, Serialize};

/// Basic-auth credentials Postmark sends with each webhook call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HttpAuth {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub password: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EnabledTrigger {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OpenTrigger {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub post_first_open_only: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContentTrigger {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub include_content: bool,
}

/// Which events fire the webhook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WebhookTriggers {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub open: OpenTrigger,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub click: EnabledTrigger,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub delivery: EnabledTrigger,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub bounce: ContentTrigger,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub spam_complaint: ContentTrigger,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub subscription_change: EnabledTrigger,
}

/// A webhook attached to a message stream.
///
/// `id` is assigned by Postmark and omitted when creating one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Webhook {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_stream: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_auth: Option<HttpAuth>,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub http_headers: HeaderCollection,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub triggers: WebhookTriggers,
}

impl Webhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn message_stream(mut self, stream: impl Into<String>) -> Self {
        self.message_stream = Some(stream.into());
        self
    }

    pub fn http_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.http_auth = Some(HttpAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn http_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_headers.insert(name, value);
        self
    }

    pub fn triggers(mut self, triggers: WebhookTriggers) -> Self {
        self.triggers = triggers;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WebhookListing {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub webhooks: Vec<Webhook>,
}
