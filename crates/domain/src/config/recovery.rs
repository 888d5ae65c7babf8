use serde::{Deserialize, Serialize};

/// Recovery-engine budgets and segment-scoring weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Per-persistence-file character cap.
    #[serde(default = "d_file_cap_chars")]
    pub file_cap_chars: usize,
    /// Character budget for the segment-context half of the block.
    #[serde(default = "d_context_budget_chars")]
    pub context_budget_chars: usize,
    /// A segment's expansion is estimated as `line_count * this` before the
    /// literal excerpt is extracted.
    #[serde(default = "d_chars_per_line_estimate")]
    pub chars_per_line_estimate: usize,
    /// Per-message excerpt truncation.
    #[serde(default = "d_excerpt_cap_chars")]
    pub excerpt_cap_chars: usize,

    /// Recency starts at this score and decays per hour.
    #[serde(default = "d_recency_max")]
    pub recency_max: i64,
    #[serde(default = "d_recency_decay_per_hour")]
    pub recency_decay_per_hour: i64,
    /// Per overlapping word between a pending task and segment topics.
    #[serde(default = "d_task_overlap_weight")]
    pub task_overlap_weight: i64,
    #[serde(default = "d_file_write_bonus")]
    pub file_write_bonus: i64,
    #[serde(default = "d_task_tool_bonus")]
    pub task_tool_bonus: i64,
    #[serde(default = "d_decision_bonus")]
    pub decision_bonus: i64,
    #[serde(default = "d_task_completed_bonus")]
    pub task_completed_bonus: i64,
    #[serde(default = "d_new_topic_bonus")]
    pub new_topic_bonus: i64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            file_cap_chars: d_file_cap_chars(),
            context_budget_chars: d_context_budget_chars(),
            chars_per_line_estimate: d_chars_per_line_estimate(),
            excerpt_cap_chars: d_excerpt_cap_chars(),
            recency_max: d_recency_max(),
            recency_decay_per_hour: d_recency_decay_per_hour(),
            task_overlap_weight: d_task_overlap_weight(),
            file_write_bonus: d_file_write_bonus(),
            task_tool_bonus: d_task_tool_bonus(),
            decision_bonus: d_decision_bonus(),
            task_completed_bonus: d_task_completed_bonus(),
            new_topic_bonus: d_new_topic_bonus(),
        }
    }
}

fn d_file_cap_chars() -> usize {
    2500
}

fn d_context_budget_chars() -> usize {
    8000
}

fn d_chars_per_line_estimate() -> usize {
    100
}

fn d_excerpt_cap_chars() -> usize {
    500
}

fn d_recency_max() -> i64 {
    50
}

fn d_recency_decay_per_hour() -> i64 {
    5
}

fn d_task_overlap_weight() -> i64 {
    10
}

fn d_file_write_bonus() -> i64 {
    15
}

fn d_task_tool_bonus() -> i64 {
    5
}

fn d_decision_bonus() -> i64 {
    10
}

fn d_task_completed_bonus() -> i64 {
    10
}

fn d_new_topic_bonus() -> i64 {
    5
}
