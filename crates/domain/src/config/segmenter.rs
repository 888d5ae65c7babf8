use serde::{Deserialize, Serialize};

/// Live-segmenter boundary policy knobs.
///
/// The boundary heuristics have no formal justification; the values here are
/// the empirical defaults and are deliberately overridable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// A segment is force-closed at this many transcript lines.
    #[serde(default = "d_max_lines")]
    pub max_lines: usize,
    /// No boundary fires below this many lines.
    #[serde(default = "d_min_lines")]
    pub min_lines: usize,
    /// Gap between consecutive message timestamps that closes a segment.
    #[serde(default = "d_time_gap_secs")]
    pub time_gap_secs: i64,
    /// A user message longer than this after an assistant turn is a new topic.
    #[serde(default = "d_new_topic_min_chars")]
    pub new_topic_min_chars: usize,
    /// Decision phrases kept per segment summary.
    #[serde(default = "d_max_decisions")]
    pub max_decisions: usize,
    /// Tools kept per segment summary (by frequency).
    #[serde(default = "d_max_tools")]
    pub max_tools: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_lines: d_max_lines(),
            min_lines: d_min_lines(),
            time_gap_secs: d_time_gap_secs(),
            new_topic_min_chars: d_new_topic_min_chars(),
            max_decisions: d_max_decisions(),
            max_tools: d_max_tools(),
        }
    }
}

fn d_max_lines() -> usize {
    100
}

fn d_min_lines() -> usize {
    10
}

fn d_time_gap_secs() -> i64 {
    5 * 60
}

fn d_new_topic_min_chars() -> usize {
    50
}

fn d_max_decisions() -> usize {
    5
}

fn d_max_tools() -> usize {
    5
}
