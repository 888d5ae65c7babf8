//! Segment boundary policy.
//!
//! Checked for every incoming conversational message, in a fixed order; a
//! boundary finalizes the active segment *before* the current message, so
//! the current message opens the next segment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tl_domain::config::SegmenterConfig;
use tl_transcript::{AssistantItem, TranscriptRecord};

/// Why a segment was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryType {
    MaxLines,
    TimeGap,
    TaskCompleted,
    NewTopic,
}

impl BoundaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxLines => "max_lines",
            Self::TimeGap => "time_gap",
            Self::TaskCompleted => "task_completed",
            Self::NewTopic => "new_topic",
        }
    }
}

/// Decide whether `current` starts a new segment.
///
/// `active_lines` is the active segment's current line count; `prev` is the
/// previous conversational message (with its parsed timestamp), if any.
pub fn check_boundary(
    active_lines: usize,
    prev: Option<(&TranscriptRecord, Option<DateTime<Utc>>)>,
    current: &TranscriptRecord,
    current_ts: Option<DateTime<Utc>>,
    config: &SegmenterConfig,
) -> Option<BoundaryType> {
    if active_lines >= config.max_lines {
        return Some(BoundaryType::MaxLines);
    }
    if active_lines < config.min_lines {
        return None;
    }

    if let (Some((_, Some(prev_ts))), Some(cur_ts)) = (prev, current_ts) {
        if (cur_ts - prev_ts).num_seconds() > config.time_gap_secs {
            return Some(BoundaryType::TimeGap);
        }
    }

    if completes_a_task(current) {
        return Some(BoundaryType::TaskCompleted);
    }

    if let Some((prev_record, _)) = prev {
        if prev_record.is_assistant() {
            if let Some(body) = current.user_text() {
                if body.len() > config.new_topic_min_chars {
                    return Some(BoundaryType::NewTopic);
                }
            }
        }
    }

    None
}

/// An assistant message whose task-tracking tool input records any item as
/// completed.
fn completes_a_task(record: &TranscriptRecord) -> bool {
    record.assistant_items().iter().any(|item| {
        let AssistantItem::ToolUse {
            tool_name,
            tool_input,
        } = item
        else {
            return false;
        };
        if tool_name != "TodoWrite" {
            return false;
        }
        tool_input
            .get("todos")
            .and_then(|todos| todos.as_array())
            .map(|todos| {
                todos.iter().any(|todo| {
                    todo.get("status").and_then(|s| s.as_str()) == Some("completed")
                })
            })
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(text: &str) -> TranscriptRecord {
        serde_json::from_str(&format!(
            r#"{{"type":"user","message":{{"content":{}}}}}"#,
            serde_json::to_string(text).unwrap()
        ))
        .unwrap()
    }

    fn assistant() -> TranscriptRecord {
        serde_json::from_str(
            r#"{"type":"assistant","message":{"content":[{"type":"text","text":"ok"}]}}"#,
        )
        .unwrap()
    }

    fn todo_write(status: &str) -> TranscriptRecord {
        serde_json::from_str(&format!(
            r#"{{"type":"assistant","message":{{"content":[
                {{"type":"tool_use","name":"TodoWrite","input":{{"todos":[{{"content":"t","status":"{status}"}}]}}}}
            ]}}}}"#
        ))
        .unwrap()
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_760_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn max_lines_forces_boundary() {
        let cfg = SegmenterConfig::default();
        let current = user("hi");
        let boundary = check_boundary(100, None, &current, None, &cfg);
        assert_eq!(boundary, Some(BoundaryType::MaxLines));
    }

    #[test]
    fn below_min_lines_never_splits() {
        let cfg = SegmenterConfig::default();
        let current = todo_write("completed");
        let prev = assistant();
        let boundary = check_boundary(5, Some((&prev, Some(ts(0)))), &current, Some(ts(9999)), &cfg);
        assert_eq!(boundary, None);
    }

    #[test]
    fn time_gap_splits() {
        let cfg = SegmenterConfig::default();
        let prev = assistant();
        let current = user("x");
        let boundary = check_boundary(
            20,
            Some((&prev, Some(ts(0)))),
            &current,
            Some(ts(6 * 60)),
            &cfg,
        );
        assert_eq!(boundary, Some(BoundaryType::TimeGap));
    }

    #[test]
    fn small_gap_does_not_split() {
        let cfg = SegmenterConfig::default();
        let prev = assistant();
        let current = user("x");
        let boundary = check_boundary(
            20,
            Some((&prev, Some(ts(0)))),
            &current,
            Some(ts(2 * 60)),
            &cfg,
        );
        assert_eq!(boundary, None);
    }

    #[test]
    fn completed_todo_splits() {
        let cfg = SegmenterConfig::default();
        let prev = assistant();
        let current = todo_write("completed");
        let boundary = check_boundary(12, Some((&prev, None)), &current, None, &cfg);
        assert_eq!(boundary, Some(BoundaryType::TaskCompleted));
    }

    #[test]
    fn in_progress_todo_does_not_split() {
        let cfg = SegmenterConfig::default();
        let prev = assistant();
        let current = todo_write("in_progress");
        let boundary = check_boundary(12, Some((&prev, None)), &current, None, &cfg);
        assert_eq!(boundary, None);
    }

    #[test]
    fn long_user_message_after_assistant_is_new_topic() {
        let cfg = SegmenterConfig::default();
        let prev = assistant();
        let current = user(&"let us now talk about something completely different today".repeat(2));
        let boundary = check_boundary(15, Some((&prev, None)), &current, None, &cfg);
        assert_eq!(boundary, Some(BoundaryType::NewTopic));
    }

    #[test]
    fn short_user_message_is_not_new_topic() {
        let cfg = SegmenterConfig::default();
        let prev = assistant();
        let current = user("short follow-up");
        let boundary = check_boundary(15, Some((&prev, None)), &current, None, &cfg);
        assert_eq!(boundary, None);
    }

    #[test]
    fn user_after_user_is_not_new_topic() {
        let cfg = SegmenterConfig::default();
        let prev = user("earlier question");
        let current = user(&"another long elaboration of the very same question again".repeat(2));
        let boundary = check_boundary(15, Some((&prev, None)), &current, None, &cfg);
        assert_eq!(boundary, None);
    }

    #[test]
    fn time_gap_wins_over_new_topic() {
        let cfg = SegmenterConfig::default();
        let prev = assistant();
        let current = user(&"a long user message that changes the subject entirely".repeat(3));
        let boundary = check_boundary(
            15,
            Some((&prev, Some(ts(0)))),
            &current,
            Some(ts(10 * 60)),
            &cfg,
        );
        assert_eq!(boundary, Some(BoundaryType::TimeGap));
    }
}
