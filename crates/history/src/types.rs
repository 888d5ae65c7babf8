use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One indexed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub project: String,
    pub jsonl_path: String,
    /// Date of the first message carrying a parsable timestamp.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub line_count: usize,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub files_touched: Vec<String>,
    #[serde(default)]
    pub tools_used: BTreeMap<String, u32>,
}

/// Inverted-index entry: one session that mentioned a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRef {
    pub session: String,
    pub project: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// The whole on-disk index (`history/index.json`).
///
/// Ordered maps keep serialization deterministic: an update pass that
/// changes nothing writes nothing, and a rewrite of unchanged data is
/// byte-identical.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryIndex {
    #[serde(default)]
    pub sessions: BTreeMap<String, SessionSummary>,
    /// `topic -> sessions`, sorted by date descending.
    #[serde(default)]
    pub topics: BTreeMap<String, Vec<TopicRef>>,
    #[serde(default)]
    pub last_indexed: Option<DateTime<Utc>>,
}

impl HistoryIndex {
    /// Rebuild the inverted topic index from the session table.
    pub fn rebuild_topics(&mut self) {
        let mut topics: BTreeMap<String, Vec<TopicRef>> = BTreeMap::new();
        for (session_id, summary) in &self.sessions {
            for topic in &summary.topics {
                topics.entry(topic.clone()).or_default().push(TopicRef {
                    session: session_id.clone(),
                    project: summary.project.clone(),
                    date: summary.date,
                });
            }
        }
        for refs in topics.values_mut() {
            // Date descending, dateless entries last; session ID settles ties.
            refs.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.session.cmp(&b.session)));
        }
        self.topics = topics;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(project: &str, date: Option<NaiveDate>, topics: &[&str]) -> SessionSummary {
        SessionSummary {
            project: project.into(),
            jsonl_path: format!("/tmp/{project}.jsonl"),
            date,
            line_count: 1,
            topics: topics.iter().map(|t| (*t).into()).collect(),
            files_touched: Vec::new(),
            tools_used: BTreeMap::new(),
        }
    }

    #[test]
    fn rebuild_topics_sorts_by_date_desc() {
        let mut index = HistoryIndex::default();
        let older = NaiveDate::from_ymd_opt(2026, 1, 1);
        let newer = NaiveDate::from_ymd_opt(2026, 2, 1);
        index
            .sessions
            .insert("old".into(), summary("p", older, &["hooks"]));
        index
            .sessions
            .insert("new".into(), summary("p", newer, &["hooks"]));

        index.rebuild_topics();
        let refs = &index.topics["hooks"];
        assert_eq!(refs[0].session, "new");
        assert_eq!(refs[1].session, "old");
    }

    #[test]
    fn dateless_sessions_sort_last() {
        let mut index = HistoryIndex::default();
        index
            .sessions
            .insert("dated".into(), summary("p", NaiveDate::from_ymd_opt(2026, 1, 1), &["api"]));
        index
            .sessions
            .insert("dateless".into(), summary("p", None, &["api"]));

        index.rebuild_topics();
        let refs = &index.topics["api"];
        assert_eq!(refs[0].session, "dated");
        assert_eq!(refs[1].session, "dateless");
    }
}
