//! Opaque hover payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The contents of a `hoverResult`, kept as the raw JSON text it arrived in.
///
/// The index never interprets a payload. Consumers either forward the JSON
/// as-is or call [`segments`](Self::segments) for a normalized view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverPayload(String);

impl HoverPayload {
    /// Wraps raw JSON text. The text is not validated.
    pub fn from_json(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw JSON text.
    pub fn as_json(&self) -> &str {
        &self.0
    }

    /// Parses the payload into a JSON value.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.0)
    }

    /// Normalizes the LSP hover content shapes into a flat list.
    ///
    /// Accepts a plain string, a `{language, value}` marked string, a
    /// `{kind, value}` markup content, or an array of strings and marked
    /// strings. Anything else yields an empty list.
    pub fn segments(&self) -> Vec<HoverSegment> {
        match self.to_value() {
            Ok(Value::Array(items)) => items
                .iter()
                .filter(|item| !item.is_array())
                .flat_map(segment_of)
                .collect(),
            Ok(value) => segment_of(&value).into_iter().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for HoverPayload {
    fn default() -> Self {
        Self("null".to_string())
    }
}

/// One piece of hover content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverSegment {
    /// Language of a code block; `None` for markdown or plain text.
    pub language: Option<String>,
    /// The text.
    pub value: String,
}

fn segment_of(value: &Value) -> Option<HoverSegment> {
    match value {
        Value::String(text) => Some(HoverSegment {
            language: None,
            value: text.clone(),
        }),
        Value::Object(map) => {
            let text = map.get("value")?.as_str()?;
            Some(HoverSegment {
                language: map
                    .get("language")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                value: text.to_string(),
            })
        }
        _ => None,
    }
}
