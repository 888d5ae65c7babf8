//! Incremental history indexing, run from the `Stop` hook.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;

use tl_domain::config::HistoryConfig;
use tl_domain::error::Result;
use tl_domain::state;
use tl_domain::trace::TraceEvent;
use tl_transcript::extract::Extraction;
use tl_transcript::{discover, TranscriptReader};

use crate::types::{HistoryIndex, SessionSummary};

/// What one update pass did.
#[derive(Debug, Default)]
pub struct IndexStats {
    pub scanned: usize,
    pub updated: usize,
}

/// Walk every project root and re-index each session whose transcript grew.
///
/// The index file is only rewritten when at least one session changed, so a
/// second pass over an unchanged tree is a no-op and the file stays
/// byte-identical.
pub fn update_index(
    projects_dir: &Path,
    index_path: &Path,
    config: &HistoryConfig,
) -> Result<IndexStats> {
    let mut index: HistoryIndex = state::load_json_or_default(index_path);
    let mut stats = IndexStats::default();

    for project_dir in discover::read_dirs(projects_dir) {
        let project = match project_dir.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_owned(),
            None => continue,
        };

        for path in discover::transcripts_in(&project_dir) {
            let Some(session_id) = discover::session_id_from_path(&path) else {
                continue;
            };
            stats.scanned += 1;

            let reader = TranscriptReader::open(&path);
            let line_count = match reader.line_count() {
                Ok(count) => count,
                Err(_) => continue,
            };

            // Re-index only on growth.
            if let Some(existing) = index.sessions.get(&session_id) {
                if line_count <= existing.line_count {
                    continue;
                }
            }

            match scan_session(&reader, &project, line_count, config) {
                Ok(summary) => {
                    index.sessions.insert(session_id, summary);
                    stats.updated += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping unreadable transcript"
                    );
                }
            }
        }
    }

    if stats.updated > 0 {
        index.rebuild_topics();
        index.last_indexed = Some(Utc::now());
        state::write_json_atomic(index_path, &index)?;
    }

    TraceEvent::HistoryIndexed {
        sessions_scanned: stats.scanned,
        sessions_updated: stats.updated,
    }
    .emit();

    Ok(stats)
}

/// Full scan of one transcript into a session summary.
fn scan_session(
    reader: &TranscriptReader,
    project: &str,
    line_count: usize,
    config: &HistoryConfig,
) -> Result<SessionSummary> {
    let mut extraction = Extraction::default();
    let mut date = None;

    for (_, record) in reader.records()? {
        if date.is_none() {
            date = record.timestamp().map(|ts| ts.date_naive());
        }
        // Decisions are a segment-level concern; no cap needed here.
        extraction.scan_record(&record, 0);
    }

    Ok(SessionSummary {
        project: project.to_owned(),
        jsonl_path: reader.path().to_string_lossy().into_owned(),
        date,
        line_count,
        topics: extraction.topics.into_iter().take(config.max_topics).collect(),
        files_touched: extraction.files.into_iter().take(config.max_files).collect(),
        tools_used: top_tools(extraction.tools, config.max_tools),
    })
}

/// Keep the `cap` most-used tools; frequency descending, name ascending.
fn top_tools(tools: BTreeMap<String, u32>, cap: usize) -> BTreeMap<String, u32> {
    let mut ranked: Vec<(String, u32)> = tools.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(cap);
    ranked.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_session(projects: &Path, project: &str, session: &str, lines: &[&str]) {
        let dir = projects.join(project);
        std::fs::create_dir_all(&dir).unwrap();
        let mut f = std::fs::File::create(dir.join(format!("{session}.jsonl"))).unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
    }

    fn user_line(text: &str, ts: &str) -> String {
        format!(
            r#"{{"type":"user","message":{{"content":{}}},"timestamp":"{ts}"}}"#,
            serde_json::to_string(text).unwrap()
        )
    }

    #[test]
    fn indexes_new_sessions() {
        let tmp = tempfile::tempdir().unwrap();
        let projects = tmp.path().join("projects");
        let index_path = tmp.path().join("history").join("index.json");
        write_session(
            &projects,
            "-proj",
            "s1",
            &[&user_line("working on the hooks automation", "2026-03-01T10:00:00Z")],
        );

        let stats = update_index(&projects, &index_path, &HistoryConfig::default()).unwrap();
        assert_eq!(stats.updated, 1);

        let index: HistoryIndex = state::load_json(&index_path).unwrap().unwrap();
        let summary = &index.sessions["s1"];
        assert_eq!(summary.project, "-proj");
        assert_eq!(summary.line_count, 1);
        assert!(summary.topics.contains(&"hooks".to_owned()));
        assert_eq!(summary.date, chrono::NaiveDate::from_ymd_opt(2026, 3, 1));
        assert!(index.topics.contains_key("hooks"));
    }

    #[test]
    fn unchanged_sessions_are_skipped_and_file_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let projects = tmp.path().join("projects");
        let index_path = tmp.path().join("history").join("index.json");
        write_session(
            &projects,
            "-proj",
            "s1",
            &[&user_line("hooks work", "2026-03-01T10:00:00Z")],
        );

        update_index(&projects, &index_path, &HistoryConfig::default()).unwrap();
        let first = std::fs::read(&index_path).unwrap();

        let stats = update_index(&projects, &index_path, &HistoryConfig::default()).unwrap();
        assert_eq!(stats.updated, 0);
        let second = std::fs::read(&index_path).unwrap();
        assert_eq!(first, second, "no-op pass must leave the index byte-identical");
    }

    #[test]
    fn grown_session_is_rescanned() {
        let tmp = tempfile::tempdir().unwrap();
        let projects = tmp.path().join("projects");
        let index_path = tmp.path().join("history").join("index.json");
        write_session(
            &projects,
            "-proj",
            "s1",
            &[&user_line("hooks", "2026-03-01T10:00:00Z")],
        );
        update_index(&projects, &index_path, &HistoryConfig::default()).unwrap();

        write_session(
            &projects,
            "-proj",
            "s1",
            &[
                &user_line("hooks", "2026-03-01T10:00:00Z"),
                &user_line("now also sqlite migration work", "2026-03-01T11:00:00Z"),
            ],
        );
        let stats = update_index(&projects, &index_path, &HistoryConfig::default()).unwrap();
        assert_eq!(stats.updated, 1);

        let index: HistoryIndex = state::load_json(&index_path).unwrap().unwrap();
        assert_eq!(index.sessions["s1"].line_count, 2);
        assert!(index.sessions["s1"].topics.contains(&"sqlite".to_owned()));
    }

    #[test]
    fn tool_cap_keeps_most_frequent() {
        let mut tools = BTreeMap::new();
        tools.insert("Read".to_owned(), 10);
        tools.insert("Bash".to_owned(), 5);
        tools.insert("Edit".to_owned(), 7);
        let top = top_tools(tools, 2);
        assert_eq!(top.len(), 2);
        assert!(top.contains_key("Read"));
        assert!(top.contains_key("Edit"));
    }

    #[test]
    fn subagent_transcripts_are_not_indexed() {
        let tmp = tempfile::tempdir().unwrap();
        let projects = tmp.path().join("projects");
        let index_path = tmp.path().join("history").join("index.json");
        write_session(
            &projects,
            "-proj",
            "main-subagent-1",
            &[&user_line("hidden", "2026-03-01T10:00:00Z")],
        );

        let stats = update_index(&projects, &index_path, &HistoryConfig::default()).unwrap();
        assert_eq!(stats.scanned, 0);
        assert!(!index_path.exists());
    }
}
