//! Search-side scoring over the history index.
//!
//! Given a prompt and the current project, score each of the project's
//! sessions: exact topic hits, split-word topic overlap, file-stem hits,
//! and recency.  Deterministic: sessions iterate in ID order and ties keep
//! that order.

use chrono::NaiveDate;

use tl_domain::config::HistoryConfig;
use tl_domain::text;

use crate::types::{HistoryIndex, SessionSummary};

/// One session worth reporting.
#[derive(Debug, Clone)]
pub struct HistoryHit {
    pub session_id: String,
    pub matched_topics: Vec<String>,
    pub score: i64,
    pub line_count: usize,
}

impl HistoryHit {
    /// Session ID prefix used by the follow-up explicit load command.
    pub fn short_id(&self) -> &str {
        text::clip(&self.session_id, 8)
    }
}

/// Score the current project's sessions against a prompt; hits at or above
/// the threshold, best first, capped.
pub fn search(
    index: &HistoryIndex,
    project_key: &str,
    prompt: &str,
    config: &HistoryConfig,
    today: NaiveDate,
) -> Vec<HistoryHit> {
    let tokens = text::meaningful_token_set(prompt);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<HistoryHit> = index
        .sessions
        .iter()
        .filter(|(_, summary)| summary.project == project_key)
        .filter_map(|(session_id, summary)| {
            let (score, matched_topics) = score_session(summary, &tokens, config, today);
            (score >= config.search_threshold).then(|| HistoryHit {
                session_id: session_id.clone(),
                matched_topics,
                score,
                line_count: summary.line_count,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(config.search_top);
    hits
}

fn score_session(
    summary: &SessionSummary,
    tokens: &std::collections::HashSet<String>,
    config: &HistoryConfig,
    today: NaiveDate,
) -> (i64, Vec<String>) {
    let mut score = 0;
    let mut matched = Vec::new();

    for topic in &summary.topics {
        if tokens.contains(topic) {
            score += config.topic_exact_weight;
            matched.push(topic.clone());
            continue;
        }
        let overlap = topic
            .split(['-', '_', ' '])
            .filter(|w| w.len() > 2 && tokens.contains(*w))
            .count() as i64;
        if overlap > 0 {
            score += overlap * config.topic_word_weight;
            matched.push(topic.clone());
        }
    }

    for file in &summary.files_touched {
        if let Some(stem) = tl_transcript::extract::file_stem(file) {
            let stem = stem.to_lowercase();
            if stem.len() > 2 && tokens.contains(&stem) {
                score += config.file_stem_weight;
            }
        }
    }

    if let Some(date) = summary.date {
        let age_days = (today - date).num_days();
        if age_days <= 7 {
            score += config.recent_week_bonus;
        } else if age_days <= 30 {
            score += config.recent_month_bonus;
        }
    }

    (score, matched)
}
