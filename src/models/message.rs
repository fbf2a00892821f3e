//! Outbound message model.

use super::attachment::Attachment;
use super::headers::HeaderCollection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Separator used when appending to the To, Cc and Bcc lists.
pub const RECIPIENT_SEPARATOR: &str = ", ";

/// Link tracking mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackLinks {
    #[default]
    None,
    HtmlAndText,
    HtmlOnly,
    TextOnly,
}

/// Reference to a stored template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TemplateRef {
    #[serde(rename = "TemplateId")]
    Id(i64),
    #[serde(rename = "TemplateAlias")]
    Alias(String),
}

/// What the message renders: literal bodies or a stored template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Body {
        #[serde(rename = "HtmlBody", skip_serializing_if = "Option::is_none")]
        html_body: Option<String>,
        #[serde(rename = "TextBody", skip_serializing_if = "Option::is_none")]
        text_body: Option<String>,
    },
    Template {
        #[serde(flatten)]
        template: TemplateRef,
        #[serde(rename = "TemplateModel")]
        model: serde_json::Value,
        #[serde(rename = "InlineCss", skip_serializing_if = "Option::is_none")]
        inline_css: Option<bool>,
    },
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Body {
            html_body: None,
            text_body: None,
        }
    }
}

/// An email to send through Postmark.
///
/// Build one with the chained setters, or convert a
/// [`MailMessage`](super::MailMessage) with `PostmarkMessage::from`.
/// A message without any body is not rejected locally; Postmark reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostmarkMessage {
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(flatten)]
    pub content: MessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_opens: Option<bool>,
    pub track_links: TrackLinks,
    pub headers: HeaderCollection,
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_stream: Option<String>,
}

impl PostmarkMessage {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            ..Default::default()
        }
    }

    /// Append a recipient to the To list.
    pub fn to(mut self, address: impl AsRef<str>) -> Self {
        append_recipient(&mut self.to, address.as_ref());
        self
    }

    /// Append a recipient to the Cc list.
    pub fn cc(mut self, address: impl AsRef<str>) -> Self {
        append_recipient(&mut self.cc, address.as_ref());
        self
    }

    /// Append a recipient to the Bcc list.
    pub fn bcc(mut self, address: impl AsRef<str>) -> Self {
        append_recipient(&mut self.bcc, address.as_ref());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the HTML body, switching a templated message back to literal bodies.
    pub fn html_body(mut self, html: impl Into<String>) -> Self {
        self.set_html_body(html.into());
        self
    }

    /// Set the plain-text body, switching a templated message back to literal bodies.
    pub fn text_body(mut self, text: impl Into<String>) -> Self {
        self.set_text_body(text.into());
        self
    }

    /// Set a single body, classified as HTML or plain text by
    /// [`looks_like_html`].
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.set_body(body.into());
        self
    }

    /// Render a stored template by numeric id.
    pub fn template_id(mut self, id: i64, model: serde_json::Value) -> Self {
        self.set_template(TemplateRef::Id(id), model);
        self
    }

    /// Render a stored template by alias.
    pub fn template_alias(mut self, alias: impl Into<String>, model: serde_json::Value) -> Self {
        self.set_template(TemplateRef::Alias(alias.into()), model);
        self
    }

    /// Ask Postmark to inline template CSS. Ignored for literal bodies.
    pub fn inline_css(mut self, inline: bool) -> Self {
        if let MessageContent::Template { inline_css, .. } = &mut self.content {
            *inline_css = Some(inline);
        }
        self
    }

    pub fn track_opens(mut self, track: bool) -> Self {
        self.track_opens = Some(track);
        self
    }

    pub fn track_links(mut self, mode: TrackLinks) -> Self {
        self.track_links = mode;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn message_stream(mut self, stream: impl Into<String>) -> Self {
        self.message_stream = Some(stream.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn is_templated(&self) -> bool {
        matches!(self.content, MessageContent::Template { .. })
    }

    pub fn html(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Body { html_body, .. } => html_body.as_deref(),
            MessageContent::Template { .. } => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Body { text_body, .. } => text_body.as_deref(),
            MessageContent::Template { .. } => None,
        }
    }

    pub(crate) fn set_body(&mut self, body: String) {
        if looks_like_html(&body) {
            self.set_html_body(body);
        } else {
            self.set_text_body(body);
        }
    }

    pub(crate) fn set_html_body(&mut self, html: String) {
        match &mut self.content {
            MessageContent::Body { html_body, .. } => *html_body = Some(html),
            MessageContent::Template { .. } => {
                self.content = MessageContent::Body {
                    html_body: Some(html),
                    text_body: None,
                }
            }
        }
    }

    pub(crate) fn set_text_body(&mut self, text: String) {
        match &mut self.content {
            MessageContent::Body { text_body, .. } => *text_body = Some(text),
            MessageContent::Template { .. } => {
                self.content = MessageContent::Body {
                    html_body: None,
                    text_body: Some(text),
                }
            }
        }
    }

    fn set_template(&mut self, template: TemplateRef, model: serde_json::Value) {
        self.content = MessageContent::Template {
            template,
            model,
            inline_css: None,
        };
    }

    /// Encode `bytes` and append them as an attachment.
    pub fn add_attachment_bytes(
        &mut self,
        bytes: &[u8],
        name: impl Into<String>,
        content_type: Option<&str>,
        content_id: Option<&str>,
    ) {
        self.attachments
            .push(Attachment::from_bytes(name, bytes, content_type, content_id));
    }

    /// Drain `reader` to the end and append its bytes as an attachment.
    pub fn add_attachment_reader<R: Read>(
        &mut self,
        mut reader: R,
        name: impl Into<String>,
        content_type: Option<&str>,
        content_id: Option<&str>,
    ) -> io::Result<()> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.add_attachment_bytes(&bytes, name, content_type, content_id);
        Ok(())
    }

    /// Read a file and append it as an attachment named after the file.
    pub fn add_attachment_path(
        &mut self,
        path: impl AsRef<Path>,
        content_type: Option<&str>,
        content_id: Option<&str>,
    ) -> io::Result<()> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no file name in path {}", path.display()),
                )
            })?;
        let file = File::open(path)?;
        self.add_attachment_reader(file, name, content_type, content_id)
    }
}

pub(crate) fn append_recipient(list: &mut Option<String>, address: &str) {
    let address = address.trim();
    if address.is_empty() {
        return;
    }
    match list {
        Some(existing) if !existing.is_empty() => {
            existing.push_str(RECIPIENT_SEPARATOR);
            existing.push_str(address);
        }
        _ => *list = Some(address.to_string()),
    }
}

/// Minimal HTML entity encoding of `&`, `<`, `>` and `"`.
pub fn html_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A body is HTML when HTML-encoding it would change it.
pub fn looks_like_html(body: &str) -> bool {
    html_encode(body) != body
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Cursor, Write};

    #[test]
    fn plain_body_goes_to_text() {
        let message = PostmarkMessage::new("a@example.com").body("Hello there");
        assert_eq!(message.text(), Some("Hello there"));
        assert_eq!(message.html(), None);
    }

    #[test]
    fn markup_body_goes_to_html() {
        let message = PostmarkMessage::new("a@example.com").body("<b>Hello there</b>");
        assert_eq!(message.html(), Some("<b>Hello there</b>"));
        assert_eq!(message.text(), None);
    }

    #[test]
    fn recipient_builders_share_join_rule() {
        let message = PostmarkMessage::new("a@example.com")
            .to("b@example.com")
            .to("C <c@example.com>")
            .cc("d@example.com")
            .cc("e@example.com")
            .bcc("f@example.com")
            .bcc("  ");

        assert_eq!(message.to.as_deref(), Some("b@example.com, C <c@example.com>"));
        assert_eq!(message.cc.as_deref(), Some("d@example.com, e@example.com"));
        assert_eq!(message.bcc.as_deref(), Some("f@example.com"));
    }

    #[test]
    fn serializes_body_message() {
        let message = PostmarkMessage::new("sender@example.com")
            .to("to@example.com")
            .subject("Hi")
            .html_body("<p>Hi</p>")
            .text_body("Hi")
            .track_opens(true)
            .track_links(TrackLinks::HtmlOnly)
            .header("X-Campaign", "spring")
            .metadata("order", "42");

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "From": "sender@example.com",
                "To": "to@example.com",
                "Subject": "Hi",
                "HtmlBody": "<p>Hi</p>",
                "TextBody": "Hi",
                "TrackOpens": true,
                "TrackLinks": "HtmlOnly",
                "Headers": [{"Name": "X-Campaign", "Value": "spring"}],
                "Attachments": [],
                "Metadata": {"order": "42"},
            })
        );
    }

    #[test]
    fn serializes_templated_message() {
        let message = PostmarkMessage::new("sender@example.com")
            .to("to@example.com")
            .template_alias("welcome", json!({"name": "Ada"}))
            .inline_css(true);

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["TemplateAlias"], "welcome");
        assert_eq!(value["TemplateModel"], json!({"name": "Ada"}));
        assert_eq!(value["InlineCss"], true);
        assert!(value.get("HtmlBody").is_none());
        assert!(value.get("TemplateId").is_none());
        assert!(message.is_templated());
    }

    #[test]
    fn body_setter_leaves_template_mode() {
        let message = PostmarkMessage::new("a@example.com")
            .template_id(7, json!({}))
            .text_body("fallback");
        assert!(!message.is_templated());
        assert_eq!(message.text(), Some("fallback"));
    }

    #[test]
    fn reader_attachment_drains_stream() {
        let mut message = PostmarkMessage::new("a@example.com");
        message
            .add_attachment_reader(Cursor::new(vec![1u8, 2, 3]), "data.bin", None, Some("cid1"))
            .unwrap();

        let attachment = &message.attachments[0];
        assert_eq!(attachment.decode().unwrap(), vec![1, 2, 3]);
        assert_eq!(attachment.content_id.as_deref(), Some("cid1"));
    }

    #[test]
    fn path_attachment_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"a,b\n1,2\n").unwrap();
        drop(file);

        let mut message = PostmarkMessage::new("a@example.com");
        message
            .add_attachment_path(&path, Some("text/csv"), None)
            .unwrap();

        let attachment = &message.attachments[0];
        assert_eq!(attachment.name, "report.csv");
        assert_eq!(attachment.content_type, "text/csv");
        assert_eq!(attachment.decode().unwrap(), b"a,b\n1,2\n");
    }

    #[test]
    fn missing_path_is_not_found() {
        let mut message = PostmarkMessage::new("a@example.com");
        let err = message
            .add_attachment_path("/definitely/not/here.txt", None, None)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(message.attachments.is_empty());
    }
}
