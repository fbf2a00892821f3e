//! Outbound sending statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outbound overview for a server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OutboundStats {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub sent: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub bounced: i64,
    #[serde(rename = "SMTPApiErrors", deserialize_with = "crate::json::null_as_default")]
    pub smtp_api_errors: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub bounce_rate: f64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub spam_complaints: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub spam_complaints_rate: f64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub opens: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub unique_opens: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub tracked: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub with_client_recorded: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub with_platform_recorded: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub with_read_time_recorded: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub total_clicks: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub unique_links_clicked: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub total_tracked_links_sent: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub with_link_tracking: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub with_open_tracking: i64,
}

/// Optional filters for statistics endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "fromdate", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(rename = "todate", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    #[serde(rename = "messagestream", skip_serializing_if = "Option::is_none")]
    pub message_stream: Option<String>,
}

impl StatsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.from_date = Some(date);
        self
    }

    pub fn to_date(mut self, date: NaiveDate) -> Self {
        self.to_date = Some(date);
        self
    }

    pub fn message_stream(mut self, stream: impl Into<String>) -> Self {
        self.message_stream = Some(stream.into());
        self
    }
}
