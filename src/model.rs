//! Post entity and request payloads.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl Post {
    /// New post with a fresh v4 id; both timestamps are the same instant.
    pub fn new(title: String, content: String) -> Self {
        let now = now();
        Post {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            content,
            created_at: now,
            last_modified: now,
        }
    }
}

/// Current time at microsecond precision, which is what survives a round trip through storage.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(TimeDelta::microseconds(1)).unwrap_or(now)
}

/// One field of a request body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Missing or `null`.
    #[default]
    Absent,
    Text(String),
    /// Present but not a string.
    Invalid,
}

impl FieldValue {
    fn from_json(v: Option<&Value>) -> Self {
        match v {
            None | Some(Value::Null) => FieldValue::Absent,
            Some(Value::String(s)) => FieldValue::Text(s.clone()),
            Some(_) => FieldValue::Invalid,
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, FieldValue::Absent)
    }

    /// Present, a string, and not empty.
    pub fn is_filled(&self) -> bool {
        matches!(self, FieldValue::Text(s) if !s.is_empty())
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldValue::Invalid)
    }

    fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Create or update body: `{title?, content?}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostInput {
    pub title: FieldValue,
    pub content: FieldValue,
}

impl PostInput {
    pub fn new(title: Option<&str>, content: Option<&str>) -> Self {
        let field = |v: Option<&str>| v.map_or(FieldValue::Absent, |s| FieldValue::Text(s.to_string()));
        PostInput {
            title: field(title),
            content: field(content),
        }
    }

    /// Bodies that are not a JSON object parse as an input with every field absent.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_json(&value),
            Err(e) => {
                tracing::debug!(error = %e, "request body is not JSON");
                PostInput::default()
            }
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => PostInput {
                title: FieldValue::from_json(map.get("title")),
                content: FieldValue::from_json(map.get("content")),
            },
            _ => PostInput::default(),
        }
    }

    /// Fields to write. Call only on validated input.
    pub fn into_changes(self) -> PostChanges {
        PostChanges {
            title: self.title.into_text(),
            content: self.content.into_text(),
        }
    }
}

/// Partial update: only the `Some` columns are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    /// (column, value) pairs in a fixed column order.
    pub fn columns(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::with_capacity(2);
        if let Some(title) = &self.title {
            out.push(("title", title.as_str()));
        }
        if let Some(content) = &self.content {
            out.push(("content", content.as_str()));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_counts_as_absent() {
        let input = PostInput::from_json(&json!({ "title": null, "content": "body" }));
        assert_eq!(input.title, FieldValue::Absent);
        assert_eq!(input.content, FieldValue::Text("body".into()));
    }

    #[test]
    fn non_string_is_invalid() {
        let input = PostInput::from_json(&json!({ "title": 5, "content": ["x"] }));
        assert!(input.title.is_invalid());
        assert!(input.content.is_invalid());
    }

    #[test]
    fn garbage_body_is_empty_input() {
        assert_eq!(PostInput::from_body(b"not json"), PostInput::default());
        assert_eq!(PostInput::from_body(b"[1, 2]"), PostInput::default());
        assert_eq!(PostInput::from_body(b""), PostInput::default());
    }

    #[test]
    fn changes_keep_only_supplied_columns() {
        let changes = PostInput::from_json(&json!({ "content": "new" })).into_changes();
        assert_eq!(changes.columns(), vec![("content", "new")]);
        assert!(!changes.is_empty());
        assert!(PostChanges::default().is_empty());
    }

    #[test]
    fn new_post_has_equal_timestamps() {
        let post = Post::new("A".into(), "B".into());
        assert_eq!(post.created_at, post.last_modified);
        assert!(uuid::Uuid::parse_str(&post.id).is_ok());
        assert_ne!(post.id, Post::new("A".into(), "B".into()).id);
    }
}
