//! Inbound update model.
//!
//! An [`Update`] wraps the raw JSON delivered by the API and exposes dotted-path lookup
//! (`"message.chat.id"`, `"message.entities.0.type"`) with a default-value fallback.
//! Updates are immutable and cheap to clone.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::error::Result;

/// A single inbound event delivered to the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    raw: Arc<Value>,
}

impl Update {
    pub fn new(raw: Value) -> Self {
        Self { raw: Arc::new(raw) }
    }

    /// Parses an update from its JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// `update_id` of the update, if present.
    pub fn id(&self) -> Option<i64> {
        self.raw.get("update_id").and_then(Value::as_i64)
    }

    /// True when the update carries a `message` object.
    pub fn has_message(&self) -> bool {
        matches!(self.raw.get("message"), Some(Value::Object(_)))
    }

    /// Looks up a dot-separated path. Object members are matched by key, array elements by
    /// numeric index. An empty path returns the whole update.
    pub fn field(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.raw);
        }
        lookup(&self.raw, path.split('.'))
    }

    /// Typed lookup: returns `default` when the path is missing, null, or of another type.
    pub fn get_field<T: DeserializeOwned>(&self, path: &str, default: T) -> T {
        match self.field(path) {
            Some(Value::Null) | None => default,
            Some(value) => T::deserialize(value).unwrap_or(default),
        }
    }

    /// String lookup without allocation; `default` when missing or not a string.
    pub fn get_str<'a>(&'a self, path: &str, default: &'a str) -> &'a str {
        self.field(path).and_then(Value::as_str).unwrap_or(default)
    }

    /// `message.text`, or `""`.
    pub fn text(&self) -> &str {
        self.get_str("message.text", "")
    }

    /// `message.chat.id`, if present.
    pub fn chat_id(&self) -> Option<i64> {
        self.field("message.chat.id").and_then(Value::as_i64)
    }

    /// `message.from.id`, if present.
    pub fn user_id(&self) -> Option<i64> {
        self.field("message.from.id").and_then(Value::as_i64)
    }
}

impl From<Value> for Update {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

fn lookup<'a, 'p>(value: &'a Value, mut segments: impl Iterator<Item = &'p str>) -> Option<&'a Value> {
    let Some(segment) = segments.next() else {
        return Some(value);
    };
    let child = match value {
        Value::Object(map) => map.get(segment)?,
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
        _ => return None,
    };
    lookup(child, segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Update {
        Update::new(json!({
            "update_id": 42,
            "message": {
                "message_id": 7,
                "text": "/start hello",
                "chat": { "id": -100, "type": "group" },
                "from": { "id": 5, "is_bot": false, "first_name": "Ann" },
                "entities": [{ "type": "bot_command", "offset": 0, "length": 6 }]
            }
        }))
    }

    #[test]
    fn test_nested_lookup() {
        let update = sample();
        assert_eq!(update.id(), Some(42));
        assert!(update.has_message());
        assert_eq!(update.text(), "/start hello");
        assert_eq!(update.chat_id(), Some(-100));
        assert_eq!(update.user_id(), Some(5));
        assert_eq!(update.get_str("message.chat.type", "private"), "group");
    }

    #[test]
    fn test_array_index_lookup() {
        let update = sample();
        assert_eq!(
            update.get_str("message.entities.0.type", ""),
            "bot_command"
        );
        assert!(update.field("message.entities.1").is_none());
        assert!(update.field("message.entities.x").is_none());
    }

    #[test]
    fn test_defaults_for_missing_null_and_mismatched() {
        let update = Update::new(json!({ "message": { "text": null, "date": "soon" } }));
        assert_eq!(update.get_str("message.text", ""), "");
        assert_eq!(update.get_field("message.date", 0i64), 0);
        assert_eq!(update.get_field("message.caption", "none".to_string()), "none");
        assert_eq!(update.get_field::<Option<i64>>("message.reply_to", None), None);
    }

    #[test]
    fn test_typed_field() {
        let update = sample();
        assert_eq!(update.get_field("message.message_id", 0u32), 7);
        assert!(!update.get_field("message.from.is_bot", true));
    }

    #[test]
    fn test_has_message_requires_object() {
        assert!(!Update::new(json!({ "update_id": 1 })).has_message());
        assert!(!Update::new(json!({ "message": null })).has_message());
        assert!(!Update::new(json!({ "callback_query": { "id": "1" } })).has_message());
    }

    #[test]
    fn test_scalar_in_path_stops_lookup() {
        let update = sample();
        assert!(update.field("message.text.length").is_none());
    }

    #[test]
    fn test_empty_path_is_root() {
        let update = sample();
        assert_eq!(update.field(""), Some(update.raw()));
    }

    #[test]
    fn test_from_json() {
        let update = Update::from_json(r#"{"update_id": 3, "message": {"text": "hi"}}"#).unwrap();
        assert_eq!(update.id(), Some(3));
        assert_eq!(update.text(), "hi");
        assert!(Update::from_json("not json").is_err());
    }
}
