//! Stored templates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateType {
    #[default]
    Standard,
    Layout,
}

/// Summary row from the template listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateInfo {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub template_id: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub name: String,
    pub alias: Option<String>,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub active: bool,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub template_type: TemplateType,
    pub layout_template: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateListing {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub total_count: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub templates: Vec<TemplateInfo>,
}

/// A template with its content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Template {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub template_id: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub name: String,
    pub alias: Option<String>,
    pub subject: Option<String>,
    pub html_body: Option<String>,
    pub text_body: Option<String>,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub active: bool,
    #[serde(rename = "AssociatedServerId", deserialize_with = "crate::json::null_as_default")]
    pub associated_server_id: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub template_type: TemplateType,
    pub layout_template: Option<String>,
}

/// Body for creating or editing a template; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_type: Option<TemplateType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_template: Option<String>,
}

impl TemplateRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn html_body(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }

    pub fn text_body(mut self, text: impl Into<String>) -> Self {
        self.text_body = Some(text.into());
        self
    }

    pub fn template_type(mut self, template_type: TemplateType) -> Self {
        self.template_type = Some(template_type);
        self
    }

    pub fn layout_template(mut self, alias: impl Into<String>) -> Self {
        self.layout_template = Some(alias.into());
        self
    }
}

/// Response to template creation and edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateSummary {
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub template_id: i64,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub name: String,
    pub alias: Option<String>,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub active: bool,
    #[serde(deserialize_with = "crate::json::null_as_default")]
    pub template_type: TemplateType,
}
