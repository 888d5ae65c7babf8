//! Segment scoring for recovery.

use chrono::{DateTime, Utc};

use tl_domain::config::RecoveryConfig;
use tl_domain::text;
use tl_segments::{BoundaryType, Segment};

/// Tools that modify files — their presence marks a productive segment.
pub const FILE_WRITE_TOOLS: &[&str] = &["Write", "Edit", "MultiEdit", "NotebookEdit"];
/// Task-tracking tools.
pub const TASK_TOOLS: &[&str] = &["TodoWrite"];

/// Score one finalized segment against the pending tasks and the clock.
pub fn score_segment(
    segment: &Segment,
    pending_tasks: &[String],
    now: DateTime<Utc>,
    config: &RecoveryConfig,
) -> i64 {
    let mut score = 0;

    if let Some(ts) = segment.timestamp {
        let hours = (now - ts).num_hours().max(0);
        score += (config.recency_max - hours * config.recency_decay_per_hour).max(0);
    }

    for task in pending_tasks {
        let overlap = text::token_set(task)
            .into_iter()
            .filter(|word| segment.summary.topics.contains(word))
            .count() as i64;
        score += overlap * config.task_overlap_weight;
    }

    let tools = &segment.summary.tools_used;
    if FILE_WRITE_TOOLS.iter().any(|tool| tools.contains_key(*tool)) {
        score += config.file_write_bonus;
    }
    if TASK_TOOLS.iter().any(|tool| tools.contains_key(*tool)) {
        score += config.task_tool_bonus;
    }

    if !segment.summary.decisions.is_empty() {
        score += config.decision_bonus;
    }

    score += match segment.boundary_type {
        BoundaryType::TaskCompleted => config.task_completed_bonus,
        BoundaryType::NewTopic => config.new_topic_bonus,
        BoundaryType::MaxLines | BoundaryType::TimeGap => 0,
    };

    score
}
