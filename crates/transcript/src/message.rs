//! Transcript message model — one tagged JSON record per JSONL line.
//!
//! Records are discriminated by a `type` field.  Only `user` and `assistant`
//! carry content this system cares about; snapshot and summary records are
//! recognized so they can be skipped explicitly, and unknown types fall into
//! `Other` rather than failing the line.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum TranscriptRecord {
    #[serde(rename = "user")]
    User(UserRecord),
    #[serde(rename = "assistant")]
    Assistant(AssistantRecord),
    #[serde(rename = "file-history-snapshot")]
    FileHistorySnapshot,
    #[serde(rename = "summary")]
    Summary,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub message: Option<UserMessage>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMessage {
    #[serde(default)]
    pub content: Option<UserContent>,
}

/// User content arrives either as a bare string or as a block list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Blocks(Vec<UserBlock>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum UserBlock {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantRecord {
    #[serde(default)]
    pub message: Option<AssistantMessage>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Vec<AssistantItem>,
}

/// One item of an assistant turn: free text or a tool invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantItem {
    Text {
        #[serde(default)]
        text: String,
    },
    ToolUse {
        #[serde(alias = "name")]
        tool_name: String,
        #[serde(default, alias = "input")]
        tool_input: serde_json::Value,
    },
    #[serde(other)]
    Other,
}

impl TranscriptRecord {
    /// Records that carry no conversational content.
    pub fn is_noise(&self) -> bool {
        matches!(
            self,
            Self::FileHistorySnapshot | Self::Summary | Self::Other
        )
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant(_))
    }

    /// Parsed message timestamp, if one is present and parsable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = match self {
            Self::User(r) => r.timestamp.as_deref()?,
            Self::Assistant(r) => r.timestamp.as_deref()?,
            _ => return None,
        };
        parse_timestamp(raw)
    }

    /// The user message body, with block lists flattened to their text.
    pub fn user_text(&self) -> Option<String> {
        let Self::User(record) = self else {
            return None;
        };
        match record.message.as_ref()?.content.as_ref()? {
            UserContent::Text(text) => Some(text.clone()),
            UserContent::Blocks(blocks) => {
                let joined = blocks
                    .iter()
                    .filter_map(|b| match b {
                        UserBlock::Text { text } => Some(text.as_str()),
                        UserBlock::Other => None,
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                Some(joined)
            }
        }
    }

    /// The assistant turn's items, empty for everything else.
    pub fn assistant_items(&self) -> &[AssistantItem] {
        match self {
            Self::Assistant(record) => record
                .message
                .as_ref()
                .map(|m| m.content.as_slice())
                .unwrap_or_default(),
            _ => &[],
        }
    }
}

/// Parse an ISO-8601 timestamp, tolerating a missing offset.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> TranscriptRecord {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn user_string_body() {
        let rec = parse(r#"{"type":"user","message":{"content":"fix the bug"}}"#);
        assert!(rec.is_user());
        assert_eq!(rec.user_text().as_deref(), Some("fix the bug"));
    }

    #[test]
    fn user_block_body() {
        let rec = parse(
            r#"{"type":"user","message":{"content":[{"type":"text","text":"a"},{"type":"text","text":"b"}]}}"#,
        );
        assert_eq!(rec.user_text().as_deref(), Some("a\nb"));
    }

    #[test]
    fn user_without_body_is_tolerated() {
        let rec = parse(r#"{"type":"user"}"#);
        assert!(rec.is_user());
        assert_eq!(rec.user_text(), None);
    }

    #[test]
    fn assistant_mixed_items() {
        let rec = parse(
            r#"{"type":"assistant","message":{"content":[
                {"type":"text","text":"running tests"},
                {"type":"tool_use","name":"Bash","input":{"command":"cargo test"}}
            ]}}"#,
        );
        let items = rec.assistant_items();
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], AssistantItem::Text { text } if text == "running tests"));
        assert!(
            matches!(&items[1], AssistantItem::ToolUse { tool_name, .. } if tool_name == "Bash")
        );
    }

    #[test]
    fn assistant_accepts_tool_name_field_aliases() {
        let rec = parse(
            r#"{"type":"assistant","message":{"content":[
                {"type":"tool_use","tool_name":"Write","tool_input":{"file_path":"a.rs"}}
            ]}}"#,
        );
        assert!(matches!(
            &rec.assistant_items()[0],
            AssistantItem::ToolUse { tool_name, .. } if tool_name == "Write"
        ));
    }

    #[test]
    fn snapshot_and_summary_are_noise() {
        assert!(parse(r#"{"type":"file-history-snapshot","snapshot":{}}"#).is_noise());
        assert!(parse(r#"{"type":"summary","summary":"..."}"#).is_noise());
    }

    #[test]
    fn unknown_type_is_noise() {
        assert!(parse(r#"{"type":"queue-marker"}"#).is_noise());
    }

    #[test]
    fn timestamp_parsing() {
        let rec = parse(r#"{"type":"user","message":{"content":"x"},"timestamp":"2026-03-01T10:30:00Z"}"#);
        let ts = rec.timestamp().unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-03-01T10:30:00+00:00");
    }

    #[test]
    fn timestamp_without_offset() {
        assert!(parse_timestamp("2026-03-01T10:30:00.123").is_some());
        assert!(parse_timestamp("not a time").is_none());
    }
}
