//! Wire JSON encoding.
//!
//! Request bodies are written as pure ASCII: besides the usual JSON escapes,
//! the forward slash and every code point outside printable ASCII (32..=126)
//! are escaped, the latter as `\uXXXX` UTF-16 units. The payload therefore
//! survives any transport that assumes a single-byte encoding.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::{Formatter, Serializer};
use std::fmt::Write as _;
use std::io;

/// `serde_json` formatter applying the ASCII-safe string rule.
///
/// `serde_json` already escapes quotes, backslashes, and control characters
/// before handing fragments over; everything else is handled here.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.chars().all(|ch| !needs_escape(ch)) {
            return writer.write_all(fragment.as_bytes());
        }
        let mut escaped = String::with_capacity(fragment.len() + 8);
        push_escaped(&mut escaped, fragment);
        writer.write_all(escaped.as_bytes())
    }
}

/// Serialize `value` to ASCII-only JSON bytes.
pub fn to_ascii_vec<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut out = Vec::with_capacity(256);
    let mut serializer = Serializer::with_formatter(&mut out, AsciiFormatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

/// Serialize `value` to an ASCII-only JSON string.
pub fn to_ascii_string<T>(value: &T) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
{
    let bytes = to_ascii_vec(value)?;
    // The formatter only ever emits ASCII.
    Ok(bytes.into_iter().map(char::from).collect())
}

/// Escape a string's contents (without surrounding quotes).
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    push_escaped(&mut out, value);
    out
}

/// Reverse [`escape_string`] by decoding the text as a JSON string literal.
pub fn unescape_string(value: &str) -> serde_json::Result<String> {
    serde_json::from_str(&format!("\"{value}\""))
}

/// Decode a JSON document. Unknown fields are ignored by every model type.
pub fn from_str<T: DeserializeOwned>(body: &str) -> serde_json::Result<T> {
    serde_json::from_str(body)
}

/// Decode a JSON document, reporting failure as `None`.
pub fn try_from_str<T: DeserializeOwned>(body: &str) -> Option<T> {
    serde_json::from_str(body).ok()
}

/// Field deserializer that reads an explicit `null` as the type's default.
///
/// Pair with a container-level `#[serde(default)]` so absent fields default too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn needs_escape(ch: char) -> bool {
    matches!(ch, '"' | '\\' | '/') || !(' '..='~').contains(&ch)
}

fn push_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            ' '..='~' => out.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
        }
    }
}

/// Date-time codec for Postmark timestamps.
///
/// Written as RFC 3339. On read, a trailing parenthetical zone note such as
/// `" (GMT)"` is dropped, and timestamps without an offset are taken as UTC.
pub mod date {
    use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Parse a Postmark timestamp.
    pub fn parse(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        let value = strip_zone_note(value.trim());
        DateTime::parse_from_rfc3339(value).or_else(|err| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc().fixed_offset())
                .map_err(|_| err)
        })
    }

    /// Format a timestamp the way it is sent on the wire.
    pub fn format(value: &DateTime<FixedOffset>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }

    fn strip_zone_note(value: &str) -> &str {
        if value.ends_with(')') {
            if let Some(idx) = value.rfind(" (") {
                return value[..idx].trim_end();
            }
        }
        value
    }

    pub fn serialize<S: Serializer>(
        value: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Same codec for optional fields; `null` and `""` read as `None`.
    pub mod option {
        use chrono::{DateTime, FixedOffset};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<FixedOffset>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_str(&super::format(dt)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.trim().is_empty() => super::parse(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn escapes_specials_and_non_ascii() {
        assert_eq!(escape_string("a/b"), "a\\/b");
        assert_eq!(escape_string("say \"hi\"\n"), "say \\\"hi\\\"\\n");
        assert_eq!(escape_string("caf\u{e9}"), "caf\\u00e9");
        assert_eq!(escape_string("\u{1}\u{7f}"), "\\u0001\\u007f");
        assert_eq!(escape_string("\u{8}\u{c}\t\r"), "\\b\\f\\t\\r");
    }

    #[test]
    fn escapes_astral_chars_as_surrogate_pairs() {
        assert_eq!(escape_string("\u{1F600}"), "\\ud83d\\ude00");
    }

    #[test]
    fn escape_round_trips() {
        let samples = [
            "",
            "plain ascii",
            "</script> & \\ \"quoted\"",
            "tabs\tand\r\nnewlines",
            "\u{0}\u{1f}\u{7f}\u{80}",
            "Gr\u{fc}\u{df}e aus M\u{fc}nchen \u{1F4E7}",
        ];
        for sample in samples {
            let escaped = escape_string(sample);
            assert!(escaped.is_ascii());
            assert_eq!(unescape_string(&escaped).unwrap(), sample);
        }
    }

    #[test]
    fn formatter_output_is_ascii_and_decodes_back() {
        let value = json!({
            "Subject": "R\u{e9}sum\u{e9} / CV",
            "HtmlBody": "<p>\u{2603}</p>",
        });
        let text = to_ascii_string(&value).unwrap();

        assert!(text.is_ascii());
        assert!(text.contains("R\\u00e9sum\\u00e9 \\/ CV"));
        assert!(text.contains("<\\/p>"));
        let back: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn try_from_str_reports_failure_as_none() {
        assert_eq!(try_from_str::<serde_json::Value>("{not json"), None);
        assert_eq!(try_from_str::<u32>("7"), Some(7));
    }

    #[test]
    fn null_fields_read_as_default() {
        #[derive(Deserialize, Default)]
        #[serde(default)]
        struct Row {
            #[serde(deserialize_with = "null_as_default")]
            name: String,
            #[serde(deserialize_with = "null_as_default")]
            tags: Vec<String>,
        }

        let row: Row = serde_json::from_str(r#"{"name": null, "tags": null}"#).unwrap();
        assert_eq!(row.name, "");
        assert!(row.tags.is_empty());

        let row: Row = serde_json::from_str(r#"{"tags": ["a"]}"#).unwrap();
        assert_eq!(row.tags, vec!["a"]);
    }

    #[test]
    fn date_parse_strips_zone_note() {
        let dt = date::parse("2014-02-17T07:25:01.4178645-05:00 (GMT)").unwrap();
        assert_eq!(dt.year(), 2014);
        assert_eq!(dt.hour(), 7);
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn date_without_offset_is_utc() {
        let dt = date::parse("2023-10-01T12:30:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn date_format_round_trips() {
        let dt = date::parse("2020-01-02T03:04:05.5+02:00").unwrap();
        assert_eq!(date::parse(&date::format(&dt)).unwrap(), dt);
    }

    #[test]
    fn date_rejects_garbage() {
        assert!(date::parse("yesterday").is_err());
    }
}
