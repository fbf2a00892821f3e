//! Bounce retrieval and activation.

use crate::json::date;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Bounce categories Postmark reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BounceType {
    HardBounce,
    Transient,
    Unsubscribe,
    Subscribe,
    AutoResponder,
    AddressChange,
    DnsError,
    SpamNotification,
    OpenRelayTest,
    Unknown,
    SoftBounce,
    VirusNotification,
    ChallengeVerification,
    BadEmailAddress,
    SpamComplaint,
    ManuallyDeactivated,
    Unconfirmed,
    Blocked,
    #[serde(rename = "SMTPApiError")]
    SmtpApiError,
    InboundError,
    #[serde(rename = "DMARCPolicy")]
    DmarcPolicy,
    TemplateRenderingFailed,
}

/// A single bounce record.
///
/// `bounce_type` is kept as text so new categories still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Bounce {
    #[serde(rename = "ID", deserialize_with = "crate::json::null_as_default")]
    pub id: i64,
    #[serde(rename = "Type", deserialize_with = "crate::json::null_as_default")]
    pub bounce_type: String,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub type_code: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub name: String,
    pub tag: Option<String>,
    #[serde(rename = "MessageID")]
    pub message_id: Option<String>,
    #[serde(rename = "ServerID")]
    pub server_id: Option<i64>,
    pub message_stream: Option<String>,
    pub description: Option<String>,
    pub details: Option<String>,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub email: String,
    pub from: Option<String>,
    #[serde(with = "date::option")]
    pub bounced_at: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub dump_available: bool,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub inactive: bool,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub can_activate: bool,
    pub subject: Option<String>,
    pub content: Option<String>,
}

/// One page of bounces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BouncesPage {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub total_count: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub bounces: Vec<Bounce>,
}

/// Per-type bounce count in [`DeliveryStats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BounceCount {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub count: i64,
    #[serde(rename = "Type")]
    pub bounce_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeliveryStats {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub inactive_mails: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub bounces: Vec<BounceCount>,
}

/// Raw SMTP source of a bounce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BounceDump {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BounceActivation {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub bounce: Bounce,
}

/// Filters for listing bounces. Unset fields are left out of the query.
///
/// ```
/// use postmark_client::{BounceQuery, BounceType};
///
/// let query = BounceQuery::new(50, 0)
///     .bounce_type(BounceType::HardBounce)
///     .inactive(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BounceQuery {
    pub count: u32,
    pub offset: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub bounce_type: Option<BounceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<bool>,
    #[serde(rename = "emailFilter", skip_serializing_if = "Option::is_none")]
    pub email_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "messageID", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(rename = "fromdate", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(rename = "todate", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    #[serde(rename = "messagestream", skip_serializing_if = "Option::is_none")]
    pub message_stream: Option<String>,
}

impl BounceQuery {
    /// Page of `count` bounces starting at `offset`.
    pub fn new(count: u32, offset: u32) -> Self {
        Self {
            count,
            offset,
            ..Default::default()
        }
    }

    pub fn bounce_type(mut self, bounce_type: BounceType) -> Self {
        self.bounce_type = Some(bounce_type);
        self
    }

    pub fn inactive(mut self, inactive: bool) -> Self {
        self.inactive = Some(inactive);
        self
    }

    pub fn email_filter(mut self, filter: impl Into<String>) -> Self {
        self.email_filter = Some(filter.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_omits_unset_filters() {
        let query = BounceQuery::new(25, 50)
            .bounce_type(BounceType::SmtpApiError)
            .from_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"count": 25, "offset": 50, "type": "SMTPApiError", "fromdate": "2024-03-01"})
        );
    }

    #[test]
    fn bounce_reads_unknown_types() {
        let bounce: Bounce = serde_json::from_value(json!({
            "ID": 692560173,
            "Type": "SomeFutureType",
            "TypeCode": 1,
            "Email": "anything@blackhole.postmarkapp.com",
            "BouncedAt": "2019-11-05T16:33:54.9070259Z",
            "DumpAvailable": true,
            "Inactive": true,
            "CanActivate": true,
        }))
        .unwrap();

        assert_eq!(bounce.id, 692560173);
        assert_eq!(bounce.bounce_type, "SomeFutureType");
        assert!(bounce.bounced_at.is_some());
        assert_eq!(bounce.tag, None);
    }
}
