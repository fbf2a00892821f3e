//! Generic mail-message shape and its conversion into a [`PostmarkMessage`].

use super::attachment::Attachment;
use super::message::{PostmarkMessage, append_recipient};
use std::fmt;

/// Preferred header carrying the Postmark tag.
pub const TAG_HEADER: &str = "X-PM-Tag";
/// Older tag header, read only when [`TAG_HEADER`] is absent.
pub const LEGACY_TAG_HEADER: &str = "X-PostmarkTag";

/// An address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddress {
    pub address: String,
    pub display_name: Option<String>,
}

impl MailAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            display_name: None,
        }
    }

    pub fn with_name(address: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            display_name: Some(display_name.into()),
        }
    }
}

impl fmt::Display for MailAddress {
    /// `Display Name <address>`, or the bare address without a name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                if name.contains([',', '"', ';', '\\']) {
                    let quoted = name.replace('\\', "\\\\").replace('"', "\\\"");
                    write!(f, "\"{}\" <{}>", quoted, self.address)
                } else {
                    write!(f, "{} <{}>", name, self.address)
                }
            }
            _ => f.write_str(&self.address),
        }
    }
}

impl From<&str> for MailAddress {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

/// An alternate rendering of the body, e.g. `text/plain` or `text/html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateView {
    pub content_type: String,
    pub content: String,
}

impl AlternateView {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content_type: "text/plain".to_string(),
            content: content.into(),
        }
    }

    pub fn html(content: impl Into<String>) -> Self {
        Self {
            content_type: "text/html".to_string(),
            content: content.into(),
        }
    }

    fn media_type(&self) -> String {
        self.content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }
}

/// Raw attachment as held by a generic mail message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub name: String,
    pub content_type: Option<String>,
    pub content_id: Option<String>,
    pub data: Vec<u8>,
}

/// A generic mail message, independent of Postmark's wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailMessage {
    pub from: Option<MailAddress>,
    pub reply_to: Option<MailAddress>,
    pub to: Vec<MailAddress>,
    pub cc: Vec<MailAddress>,
    pub bcc: Vec<MailAddress>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub alternate_views: Vec<AlternateView>,
    pub headers: Vec<(String, String)>,
    pub attachments: Vec<MailAttachment>,
}

impl MailMessage {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Tag from [`TAG_HEADER`], falling back to [`LEGACY_TAG_HEADER`].
    pub fn tag(&self) -> Option<&str> {
        self.header(TAG_HEADER)
            .or_else(|| self.header(LEGACY_TAG_HEADER))
    }
}

impl From<MailMessage> for PostmarkMessage {
    fn from(mail: MailMessage) -> Self {
        let mut message = PostmarkMessage::new(
            mail.from.as_ref().map(ToString::to_string).unwrap_or_default(),
        );
        message.reply_to = mail.reply_to.as_ref().map(ToString::to_string);
        message.subject = mail.subject.clone();
        message.tag = mail.tag().map(str::to_string);

        for address in &mail.to {
            append_recipient(&mut message.to, &address.to_string());
        }
        for address in &mail.cc {
            append_recipient(&mut message.cc, &address.to_string());
        }
        for address in &mail.bcc {
            append_recipient(&mut message.bcc, &address.to_string());
        }

        if let Some(body) = mail.body {
            message.set_body(body);
        }
        let views = &mail.alternate_views;
        if let Some(view) = views.iter().find(|v| v.media_type() == "text/plain") {
            message.set_text_body(view.content.clone());
        }
        if let Some(view) = views.iter().find(|v| v.media_type() == "text/html") {
            message.set_html_body(view.content.clone());
        }

        for (name, value) in mail.headers {
            if !name.eq_ignore_ascii_case(TAG_HEADER) && !name.eq_ignore_ascii_case(LEGACY_TAG_HEADER)
            {
                message.headers.insert(name, value);
            }
        }

        message.attachments = mail
            .attachments
            .into_iter()
            .map(|a| {
                Attachment::from_bytes(
                    a.name,
                    &a.data,
                    a.content_type.as_deref(),
                    a.content_id.as_deref(),
                )
            })
            .collect();

        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> MailMessage {
        MailMessage {
            from: Some(MailAddress::with_name("sender@example.com", "Sender Name")),
            to: vec![
                MailAddress::new("a@example.com"),
                MailAddress::with_name("b@example.com", "Bee"),
            ],
            subject: Some("Subject".into()),
            ..Default::default()
        }
    }

    #[test]
    fn formats_addresses_with_display_names() {
        let message = PostmarkMessage::from(base());
        assert_eq!(message.from, "Sender Name <sender@example.com>");
        assert_eq!(message.to.as_deref(), Some("a@example.com, Bee <b@example.com>"));
        assert_eq!(message.cc, None);
    }

    #[test]
    fn quotes_display_names_with_commas() {
        let address = MailAddress::with_name("jd@example.com", "Doe, John");
        assert_eq!(address.to_string(), "\"Doe, John\" <jd@example.com>");
    }

    #[test]
    fn quoted_display_names_escape_backslashes() {
        let address = MailAddress::with_name("jd@example.com", "Doe, J\\");
        assert_eq!(address.to_string(), r#""Doe, J\\" <jd@example.com>"#);

        let address = MailAddress::with_name("jd@example.com", r#"a\"b"#);
        assert_eq!(address.to_string(), r#""a\\\"b" <jd@example.com>"#);
    }

    #[test]
    fn preferred_tag_header_wins() {
        let mut mail = base();
        mail.headers = vec![
            (LEGACY_TAG_HEADER.into(), "overridden".into()),
            (TAG_HEADER.into(), "correct".into()),
            ("X-Other".into(), "kept".into()),
        ];

        let message = PostmarkMessage::from(mail);
        assert_eq!(message.tag.as_deref(), Some("correct"));
        assert_eq!(message.headers.get("X-Other"), Some("kept"));
        assert_eq!(message.headers.get(TAG_HEADER), None);
        assert_eq!(message.headers.len(), 1);
    }

    #[test]
    fn legacy_tag_header_is_fallback() {
        let mut mail = base();
        mail.headers = vec![(LEGACY_TAG_HEADER.into(), "legacy".into())];
        assert_eq!(PostmarkMessage::from(mail).tag.as_deref(), Some("legacy"));
    }

    #[test]
    fn tag_headers_match_any_case() {
        let mut mail = base();
        mail.headers = vec![
            ("x-postmarktag".into(), "legacy".into()),
            ("x-pm-tag".into(), "welcome".into()),
            ("x-other".into(), "kept".into()),
        ];
        assert_eq!(mail.tag(), Some("welcome"));

        let message = PostmarkMessage::from(mail);
        assert_eq!(message.tag.as_deref(), Some("welcome"));
        assert_eq!(message.headers.get("x-pm-tag"), None);
        assert_eq!(message.headers.get("x-postmarktag"), None);
        assert_eq!(message.headers.len(), 1);

        let mut mail = base();
        mail.headers = vec![("X-POSTMARKTAG".into(), "legacy".into())];
        let message = PostmarkMessage::from(mail);
        assert_eq!(message.tag.as_deref(), Some("legacy"));
        assert!(message.headers.is_empty());
    }

    #[test]
    fn single_body_is_classified() {
        let mut mail = base();
        mail.body = Some("just text".into());
        let message = PostmarkMessage::from(mail);
        assert_eq!(message.text(), Some("just text"));
        assert_eq!(message.html(), None);

        let mut mail = base();
        mail.body = Some("<p>markup</p>".into());
        let message = PostmarkMessage::from(mail);
        assert_eq!(message.html(), Some("<p>markup</p>"));
        assert_eq!(message.text(), None);
    }

    #[test]
    fn alternate_views_override_body() {
        let mut mail = base();
        mail.body = Some("<p>body</p>".into());
        mail.alternate_views = vec![
            AlternateView::html("<p>view</p>"),
            AlternateView {
                content_type: "text/plain; charset=utf-8".into(),
                content: "view".into(),
            },
        ];

        let message = PostmarkMessage::from(mail);
        assert_eq!(message.html(), Some("<p>view</p>"));
        assert_eq!(message.text(), Some("view"));
    }

    #[test]
    fn attachments_are_encoded() {
        let mut mail = base();
        mail.attachments = vec![MailAttachment {
            name: "logo.png".into(),
            content_type: Some("image/png".into()),
            content_id: Some("logo".into()),
            data: vec![137, 80, 78, 71],
        }];

        let message = PostmarkMessage::from(mail);
        let attachment = &message.attachments[0];
        assert_eq!(attachment.decode().unwrap(), vec![137, 80, 78, 71]);
        assert!(attachment.is_inline());
    }
}
