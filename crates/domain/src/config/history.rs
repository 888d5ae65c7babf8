use serde::{Deserialize, Serialize};

/// History index caps and search-side scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Per-session collection caps applied at index time.
    #[serde(default = "d_max_topics")]
    pub max_topics: usize,
    #[serde(default = "d_max_files")]
    pub max_files: usize,
    #[serde(default = "d_max_tools")]
    pub max_tools: usize,

    /// Search-side weights.
    #[serde(default = "d_topic_exact_weight")]
    pub topic_exact_weight: i64,
    #[serde(default = "d_topic_word_weight")]
    pub topic_word_weight: i64,
    #[serde(default = "d_file_stem_weight")]
    pub file_stem_weight: i64,
    #[serde(default = "d_recent_week_bonus")]
    pub recent_week_bonus: i64,
    #[serde(default = "d_recent_month_bonus")]
    pub recent_month_bonus: i64,
    #[serde(default = "d_search_threshold")]
    pub search_threshold: i64,
    #[serde(default = "d_search_top")]
    pub search_top: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_topics: d_max_topics(),
            max_files: d_max_files(),
            max_tools: d_max_tools(),
            topic_exact_weight: d_topic_exact_weight(),
            topic_word_weight: d_topic_word_weight(),
            file_stem_weight: d_file_stem_weight(),
            recent_week_bonus: d_recent_week_bonus(),
            recent_month_bonus: d_recent_month_bonus(),
            search_threshold: d_search_threshold(),
            search_top: d_search_top(),
        }
    }
}

fn d_max_topics() -> usize {
    30
}

fn d_max_files() -> usize {
    20
}

fn d_max_tools() -> usize {
    10
}

fn d_topic_exact_weight() -> i64 {
    4
}

fn d_topic_word_weight() -> i64 {
    2
}

fn d_file_stem_weight() -> i64 {
    3
}

fn d_recent_week_bonus() -> i64 {
    2
}

fn d_recent_month_bonus() -> i64 {
    1
}

fn d_search_threshold() -> i64 {
    8
}

fn d_search_top() -> usize {
    3
}
