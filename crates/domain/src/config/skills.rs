use serde::{Deserialize, Serialize};

/// Skill-matching weights and thresholds.
///
/// The additive rule set: tags matching as substrings or as split words,
/// category substring, summary word overlap, name-part hits, and a small
/// recency bonus.  Scores at or above `suggestion_threshold` are worth
/// mentioning; `strong_threshold` and above get injected into context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    #[serde(default = "d_suggestion_threshold")]
    pub suggestion_threshold: i64,
    #[serde(default = "d_strong_threshold")]
    pub strong_threshold: i64,
    /// How many matches to report, best first.
    #[serde(default = "d_top_matches")]
    pub top_matches: usize,
    /// A skill used within this many days earns the recency bonus.
    #[serde(default = "d_recency_days")]
    pub recency_days: i64,
    #[serde(default = "d_tag_substring_weight")]
    pub tag_substring_weight: i64,
    #[serde(default = "d_tag_word_weight")]
    pub tag_word_weight: i64,
    #[serde(default = "d_category_weight")]
    pub category_weight: i64,
    #[serde(default = "d_summary_word_weight")]
    pub summary_word_weight: i64,
    #[serde(default = "d_name_word_weight")]
    pub name_word_weight: i64,
    #[serde(default = "d_recency_bonus")]
    pub recency_bonus: i64,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            suggestion_threshold: d_suggestion_threshold(),
            strong_threshold: d_strong_threshold(),
            top_matches: d_top_matches(),
            recency_days: d_recency_days(),
            tag_substring_weight: d_tag_substring_weight(),
            tag_word_weight: d_tag_word_weight(),
            category_weight: d_category_weight(),
            summary_word_weight: d_summary_word_weight(),
            name_word_weight: d_name_word_weight(),
            recency_bonus: d_recency_bonus(),
        }
    }
}

fn d_suggestion_threshold() -> i64 {
    5
}

fn d_strong_threshold() -> i64 {
    10
}

fn d_top_matches() -> usize {
    3
}

fn d_recency_days() -> i64 {
    7
}

fn d_tag_substring_weight() -> i64 {
    3
}

fn d_tag_word_weight() -> i64 {
    2
}

fn d_category_weight() -> i64 {
    5
}

fn d_summary_word_weight() -> i64 {
    2
}

fn d_name_word_weight() -> i64 {
    3
}

fn d_recency_bonus() -> i64 {
    1
}
