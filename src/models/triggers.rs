//! Inbound rule triggers: sender addresses or domains blocked from inbound processing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InboundRule {
    #[serde(rename = "ID", deserialize_with = "crate::json::null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub rule: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InboundRuleListing {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub total_count: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub inbound_rules: Vec<InboundRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CreateInboundRule<'a> {
    pub rule: &'a str,
}
