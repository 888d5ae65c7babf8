//! Literal segment content extraction.
//!
//! Selected segments are re-read from the transcript and rendered as a
//! compact newline-joined conversation, not raw JSON: user/assistant text
//! truncated per message, file modifications and task updates collapsed to
//! bracketed markers.

use tl_domain::config::RecoveryConfig;
use tl_domain::error::Result;
use tl_domain::text;
use tl_segments::Segment;
use tl_transcript::{AssistantItem, TranscriptReader};

use crate::scoring::{FILE_WRITE_TOOLS, TASK_TOOLS};

/// Task items surfaced per tracking invocation.
const MAX_COMPLETED: usize = 3;
const MAX_IN_PROGRESS: usize = 2;

/// Render the literal excerpt for one segment.
pub fn extract_excerpt(
    reader: &TranscriptReader,
    segment: &Segment,
    config: &RecoveryConfig,
) -> Result<String> {
    let mut lines = Vec::new();

    for (index, record) in reader.records()? {
        if index < segment.start_line {
            continue;
        }
        if index >= segment.end_line {
            break;
        }

        if let Some(body) = record.user_text() {
            let body = body.trim();
            if !body.is_empty() {
                lines.push(format!(
                    "USER: {}",
                    text::clip(body, config.excerpt_cap_chars)
                ));
            }
        }

        for item in record.assistant_items() {
            match item {
                AssistantItem::Text { text: body } => {
                    let body = body.trim();
                    if !body.is_empty() {
                        lines.push(format!(
                            "ASSISTANT: {}",
                            text::clip(body, config.excerpt_cap_chars)
                        ));
                    }
                }
                AssistantItem::ToolUse {
                    tool_name,
                    tool_input,
                } => {
                    if FILE_WRITE_TOOLS.contains(&tool_name.as_str()) {
                        if let Some(name) = modified_basename(tool_input) {
                            lines.push(format!("[Modified: {name}]"));
                        }
                    } else if TASK_TOOLS.contains(&tool_name.as_str()) {
                        lines.extend(task_markers(tool_input));
                    }
                }
                AssistantItem::Other => {}
            }
        }
    }

    Ok(lines.join("\n"))
}

fn modified_basename(tool_input: &serde_json::Value) -> Option<String> {
    let path = tool_input.get("file_path")?.as_str()?;
    std::path::Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// `[Completed: …]` (up to 3) then `[Working on: …]` (up to 2).
fn task_markers(tool_input: &serde_json::Value) -> Vec<String> {
    let Some(todos) = tool_input.get("todos").and_then(|t| t.as_array()) else {
        return Vec::new();
    };

    let mut markers = Vec::new();
    let mut completed = 0;
    let mut in_progress = 0;

    for todo in todos {
        let content = todo.get("content").and_then(|c| c.as_str()).unwrap_or("");
        match todo.get("status").and_then(|s| s.as_str()) {
            Some("completed") if completed < MAX_COMPLETED => {
                markers.push(format!("[Completed: {content}]"));
                completed += 1;
            }
            Some("in_progress") if in_progress < MAX_IN_PROGRESS => {
                markers.push(format!("[Working on: {content}]"));
                in_progress += 1;
            }
            _ => {}
        }
    }
    markers
}
