//! Learning-moment detection and pickup.
//!
//! The `Stop`-side detector scans the transcript tail for a
//! trial-and-error resolution (errors, then a success, or enough
//! trial phrases) and drops a singleton file.  The next
//! `UserPromptSubmit` consumes it — or expires it — and injects a
//! directive asking the assistant to propose saving a skill.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use tl_domain::error::Result;
use tl_domain::state;
use tl_domain::trace::TraceEvent;
use tl_transcript::{AssistantItem, TranscriptReader, TranscriptRecord};

use crate::event::HookEvent;
use crate::respond::HookResponse;
use crate::HookContext;

/// Error signals (matched case-insensitively on message text).
const ERROR_SIGNALS: &[&str] = &[
    "error:",
    "failed",
    "exception",
    "not found",
    "permission denied",
    "modulenotfounderror",
    "importerror",
    "syntaxerror",
    "typeerror",
    "valueerror",
];

/// Success signals, only counted after a prior failure in the window.
const SUCCESS_SIGNALS: &[&str] = &[
    "worked",
    "success",
    "fixed",
    "resolved",
    "completed",
    "exit code 0",
];

/// Phrases marking trial-and-error exploration.
const TRIAL_PHRASES: &[&str] = &[
    "let me try",
    "trying again",
    "another approach",
    "the problem was",
    "workaround",
    "let me check",
    "that didn't work",
    "still failing",
];

static NONZERO_EXIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"exit code [1-9]").expect("exit-code pattern"));

/// The pending-learning singleton (`pending-learning-moment.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLearning {
    pub detected_at: DateTime<Utc>,
    pub reason: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Stop: detection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub(super) fn detect(event: &HookEvent, ctx: &HookContext) -> Result<HookResponse> {
    let continue_response = HookResponse::Continue {
        system_message: None,
    };

    let Some(transcript) = super::resolve_transcript(event, ctx) else {
        return Ok(continue_response);
    };
    let reader = TranscriptReader::open(&transcript);
    let Ok(records) = reader.records() else {
        return Ok(continue_response);
    };

    let window = ctx.config.hooks.scan_window;
    let mut tail: Vec<TranscriptRecord> = records.map(|(_, record)| record).collect();
    if tail.len() > window {
        tail.drain(..tail.len() - window);
    }

    if let Some(reason) = detect_in_messages(&tail, ctx) {
        let pending = PendingLearning {
            detected_at: Utc::now(),
            reason: reason.clone(),
            session_id: event.session_id.clone(),
        };
        state::write_json_atomic(&ctx.layout.pending_learning_path(), &pending)?;
        TraceEvent::LearningMomentDetected { reason }.emit();
    }

    Ok(continue_response)
}

/// Scan a message window for a trial-and-error resolution.
fn detect_in_messages(messages: &[TranscriptRecord], ctx: &HookContext) -> Option<String> {
    let mut errors = 0usize;
    let mut successes_after_error = 0usize;
    let mut trials = 0usize;

    for record in messages {
        let text = message_text(record).to_lowercase();
        if text.is_empty() {
            continue;
        }

        let has_error = ERROR_SIGNALS.iter().any(|signal| text.contains(signal))
            || NONZERO_EXIT.is_match(&text);
        if has_error {
            errors += 1;
        }
        if errors > 0 && SUCCESS_SIGNALS.iter().any(|signal| text.contains(signal)) {
            successes_after_error += 1;
        }
        trials += TRIAL_PHRASES
            .iter()
            .filter(|phrase| text.contains(*phrase))
            .count();
    }

    let config = &ctx.config.hooks;
    if errors >= config.error_signal_threshold && successes_after_error >= 1 {
        return Some(format!(
            "{errors} error signals resolved after trial and error"
        ));
    }
    if trials >= config.trial_phrase_threshold {
        return Some(format!("{trials} trial-and-error phrases in one stretch"));
    }
    None
}

fn message_text(record: &TranscriptRecord) -> String {
    if let Some(body) = record.user_text() {
        return body;
    }
    record
        .assistant_items()
        .iter()
        .filter_map(|item| match item {
            AssistantItem::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// UserPromptSubmit: pickup
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub(super) fn pickup(_event: &HookEvent, ctx: &HookContext) -> Result<HookResponse> {
    let path = ctx.layout.pending_learning_path();
    let Some(pending) = state::load_json::<PendingLearning>(&path).unwrap_or(None) else {
        return Ok(HookResponse::Silent);
    };

    // Consumed either way: picked up fresh or expired stale.
    let _ = std::fs::remove_file(&path);

    let age = Utc::now() - pending.detected_at;
    if age.num_hours() >= ctx.config.hooks.pending_ttl_hours {
        tracing::debug!(reason = %pending.reason, "pending learning moment expired");
        return Ok(HookResponse::Silent);
    }

    Ok(HookResponse::Context(format!(
        "[LEARNING MOMENT] The previous session resolved a problem the hard \
         way ({}). If the fix is reusable, propose saving it as a skill: a \
         short SKILL.md under skills/<name>/ with tags and a summary, so it \
         can be matched against future prompts.\n",
        pending.reason
    )))
}
