//! Attachment encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Content type used when none is given.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file attached to a message, with its bytes stored as base64 text.
///
/// Attachments carrying a `content_id` are inline resources referenced from
/// the HTML body (`<img src="cid:...">`) rather than standalone downloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attachment {
    pub name: String,
    pub content: String,
    pub content_type: String,
    #[serde(rename = "ContentID", default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

impl Attachment {
    /// Encode `bytes` as an attachment.
    ///
    /// `content_type` falls back to [`DEFAULT_CONTENT_TYPE`]; a blank
    /// `content_id` is ignored.
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: &[u8],
        content_type: Option<&str>,
        content_id: Option<&str>,
    ) -> Self {
        let content_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);
        let content_id = content_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        Self {
            name: name.into(),
            content: STANDARD.encode(bytes),
            content_type: content_type.to_string(),
            content_id,
        }
    }

    /// Whether the attachment is referenced inline from the HTML body.
    pub fn is_inline(&self) -> bool {
        self.content_id.is_some()
    }

    /// Decode the stored content back to the original bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_decodes_to_original_bytes() {
        let samples: [&[u8]; 4] = [b"", b"a", b"hello world", &[0, 255, 128, 10, 13, 0]];
        for bytes in samples {
            let attachment = Attachment::from_bytes("f.bin", bytes, None, None);
            assert_eq!(attachment.decode().unwrap(), bytes);
        }
    }

    #[test]
    fn defaults_content_type_and_drops_blank_content_id() {
        let attachment = Attachment::from_bytes("f.bin", b"x", None, Some("   "));
        assert_eq!(attachment.content_type, DEFAULT_CONTENT_TYPE);
        assert!(!attachment.is_inline());
    }

    #[test]
    fn inline_attachment_serializes_content_id() {
        let attachment =
            Attachment::from_bytes("logo.png", b"png", Some("image/png"), Some("cid:logo"));
        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({
                "Name": "logo.png",
                "Content": "cG5n",
                "ContentType": "image/png",
                "ContentID": "cid:logo",
            })
        );
    }
}
