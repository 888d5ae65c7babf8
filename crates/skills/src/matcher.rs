//! Prompt-to-skill scoring.
//!
//! A small additive rule set over the tokenized prompt: tag substrings and
//! tag words, category substring, summary word overlap (stop words
//! excluded), skill-name parts, and a recency bonus.  Deterministic: ties
//! keep registry (insertion) order.

use std::collections::HashSet;

use chrono::NaiveDate;

use tl_domain::config::SkillsConfig;
use tl_domain::text;

use crate::types::SkillRecord;

/// One skill that cleared the suggestion threshold.
#[derive(Debug, Clone)]
pub struct ScoredSkill {
    pub name: String,
    pub summary: String,
    pub score: i64,
}

impl ScoredSkill {
    /// Compact line for the `[SKILL MATCH]` injection block.
    pub fn render_match_line(&self) -> String {
        if self.summary.is_empty() {
            format!("- {} (score {})", self.name, self.score)
        } else {
            format!("- {} (score {}): {}", self.name, self.score, self.summary)
        }
    }
}

/// Score a single skill against a prompt.
pub fn score_skill(
    prompt_lower: &str,
    prompt_tokens: &HashSet<String>,
    skill: &SkillRecord,
    config: &SkillsConfig,
    today: NaiveDate,
) -> i64 {
    let mut score = 0;

    for tag in &skill.tags {
        let tag_lower = tag.to_lowercase();
        if !tag_lower.is_empty() && prompt_lower.contains(&tag_lower) {
            score += config.tag_substring_weight;
        }
        for word in tag_lower.split('-') {
            if word.len() > 2 && prompt_tokens.contains(word) {
                score += config.tag_word_weight;
            }
        }
    }

    let category = skill.category.to_lowercase();
    if !category.is_empty() && prompt_lower.contains(&category) {
        score += config.category_weight;
    }

    let summary_words: HashSet<String> = text::token_set(&skill.summary);
    for word in prompt_tokens {
        if summary_words.contains(word) && !text::is_stop_word(word) {
            score += config.summary_word_weight;
        }
    }

    for part in skill.name.split('-') {
        if part.len() > 2 && prompt_tokens.contains(&part.to_lowercase()) {
            score += config.name_word_weight;
        }
    }

    if let Some(last_used) = skill.last_used {
        if (today - last_used).num_days() <= config.recency_days {
            score += config.recency_bonus;
        }
    }

    score
}

/// Score every skill; return those at or above `suggestion_threshold`, best
/// first, capped at `top_matches`.
pub fn match_skills(
    prompt: &str,
    skills: &[SkillRecord],
    config: &SkillsConfig,
    today: NaiveDate,
) -> Vec<ScoredSkill> {
    let prompt_lower = prompt.to_lowercase();
    let prompt_tokens = text::token_set(prompt);
    if prompt_tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredSkill> = skills
        .iter()
        .filter_map(|skill| {
            let score = score_skill(&prompt_lower, &prompt_tokens, skill, config, today);
            (score >= config.suggestion_threshold).then(|| ScoredSkill {
                name: skill.name.clone(),
                summary: skill.summary.clone(),
                score,
            })
        })
        .collect();

    // Stable: equal scores keep registry order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(config.top_matches);
    scored
}
