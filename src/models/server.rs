//! Server administration.

use super::message::TrackLinks;
use serde::{Deserialize, Serialize};

/// Settings of the server the token belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Server {
    #[serde(rename = "ID", deserialize_with = "crate::json::null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub api_tokens: Vec<String>,
    pub color: Option<String>,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub smtp_api_activated: bool,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub raw_email_enabled: bool,
    pub delivery_type: Option<String>,
    pub server_link: Option<String>,
    pub inbound_address: Option<String>,
    pub inbound_hook_url: Option<String>,
    pub bounce_hook_url: Option<String>,
    pub open_hook_url: Option<String>,
    pub delivery_hook_url: Option<String>,
    pub click_hook_url: Option<String>,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub post_first_open_only: bool,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub track_opens: bool,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub track_links: TrackLinks,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub include_bounce_content_in_hook: bool,
    pub inbound_domain: Option<String>,
    pub inbound_hash: Option<String>,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub inbound_spam_threshold: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub enable_smtp_api_error_hooks: bool,
}

/// Partial server update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EditServerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_email_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_api_activated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_hook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounce_hook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_hook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_first_open_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_opens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_links: Option<TrackLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_spam_threshold: Option<i64>,
}
