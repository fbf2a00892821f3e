//! Custom message and webhook headers.

use serde::{Deserialize, Serialize};

/// One header as it appears on the wire: `{"Name": ..., "Value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

/// Header name to value mapping with unique names.
///
/// Names are compared exactly as provided. Serialized as a list of
/// [`MessageHeader`] pairs rather than a JSON object; a decoded list with a
/// repeated name keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<MessageHeader>", into = "Vec<MessageHeader>")]
pub struct HeaderCollection {
    headers: Vec<MessageHeader>,
}

impl HeaderCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header, overwriting the value of an existing one with that name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.headers.iter_mut().find(|h| h.name == name) {
            Some(existing) => existing.value = value,
            None => self.headers.push(MessageHeader { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.headers.iter().position(|h| h.name == name)?;
        Some(self.headers.remove(idx).value)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageHeader> {
        self.headers.iter()
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderCollection
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = HeaderCollection::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl From<Vec<MessageHeader>> for HeaderCollection {
    fn from(headers: Vec<MessageHeader>) -> Self {
        headers.into_iter().map(|h| (h.name, h.value)).collect()
    }
}

impl From<HeaderCollection> for Vec<MessageHeader> {
    fn from(collection: HeaderCollection) -> Self {
        collection.headers
    }
}
