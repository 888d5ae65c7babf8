//! Topic, file, tool, and decision extraction over transcript messages.
//!
//! Shared by the history indexer and the live segmenter so both produce the
//! same tags for the same text.  Collections are ordered (`BTreeSet` /
//! `BTreeMap`) — re-running extraction over an unchanged transcript must
//! serialize byte-identically.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::message::{AssistantItem, TranscriptRecord};

/// Closed vocabulary of domain keywords matched as substrings.
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "api",
    "async",
    "auth",
    "automation",
    "backend",
    "build",
    "cache",
    "ci",
    "cli",
    "config",
    "database",
    "debug",
    "deploy",
    "docker",
    "frontend",
    "git",
    "hooks",
    "http",
    "index",
    "logging",
    "memory",
    "migration",
    "parser",
    "performance",
    "postgres",
    "react",
    "refactor",
    "regex",
    "release",
    "rust",
    "search",
    "security",
    "sqlite",
    "test",
    "typescript",
    "ui",
    "websocket",
];

/// Source-file extensions recognized by the path patterns.
const SOURCE_EXTS: &str = "rs|py|ts|tsx|js|jsx|go|java|rb|c|h|cpp|md|json|toml|yaml|yml|sh|sql|css|html";

/// Path patterns: backticked, quoted, or bare slash-containing paths ending
/// in a known source extension.
static FILE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(&format!(r"`([\w./-]+\.(?:{SOURCE_EXTS}))`")).expect("backtick path pattern"),
        Regex::new(&format!(r#""([\w./-]+\.(?:{SOURCE_EXTS}))""#)).expect("quoted path pattern"),
        Regex::new(&format!(r"\b([\w.-]+/[\w./-]+\.(?:{SOURCE_EXTS}))\b"))
            .expect("bare path pattern"),
    ]
});

/// Phrases that mark a decision in assistant prose.
static DECISION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bdecided to\b",
        r"(?i)\bgoing to use\b",
        r"(?i)\bgoing with\b",
        r"(?i)\blet's use\b",
        r"(?i)\bi(?:'ll| will) use\b",
        r"(?i)\bwe(?:'ll| will) use\b",
        r"(?i)\bthe (?:best )?approach is\b",
        r"(?i)\binstead of\b",
        r"(?i)\bswitching to\b",
        r"(?i)\bchose\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("decision pattern"))
    .collect()
});

/// Bounds on a phrase worth keeping as a decision.
const DECISION_MIN_CHARS: usize = 10;
const DECISION_MAX_CHARS: usize = 200;

/// Accumulates extraction results over a run of messages.
#[derive(Debug, Default)]
pub struct Extraction {
    pub topics: BTreeSet<String>,
    pub files: BTreeSet<String>,
    pub tools: BTreeMap<String, u32>,
    pub decisions: Vec<String>,
}

impl Extraction {
    /// Fold one transcript record into the running extraction.
    pub fn scan_record(&mut self, record: &TranscriptRecord, max_decisions: usize) {
        if let Some(text) = record.user_text() {
            self.scan_text(&text);
        }
        for item in record.assistant_items() {
            match item {
                AssistantItem::Text { text } => {
                    self.scan_text(text);
                    self.scan_decisions(text, max_decisions);
                }
                AssistantItem::ToolUse {
                    tool_name,
                    tool_input,
                } => {
                    *self.tools.entry(tool_name.clone()).or_insert(0) += 1;
                    self.scan_tool_input(tool_input);
                }
                AssistantItem::Other => {}
            }
        }
    }

    /// Domain keywords and file references in free text.
    pub fn scan_text(&mut self, text: &str) {
        let lower = text.to_lowercase();
        for keyword in DOMAIN_KEYWORDS {
            if lower.contains(keyword) {
                self.topics.insert((*keyword).to_owned());
            }
        }
        for path in extract_file_refs(text) {
            if let Some(stem) = file_stem(&path) {
                if stem.len() > 2 {
                    self.topics.insert(stem.to_lowercase());
                }
            }
            self.files.insert(path);
        }
    }

    /// Every string-valued field of a tool input contributes topics/files.
    pub fn scan_tool_input(&mut self, input: &serde_json::Value) {
        match input {
            serde_json::Value::String(s) => self.scan_text(s),
            serde_json::Value::Array(items) => {
                for item in items {
                    self.scan_tool_input(item);
                }
            }
            serde_json::Value::Object(map) => {
                for value in map.values() {
                    self.scan_tool_input(value);
                }
            }
            _ => {}
        }
    }

    fn scan_decisions(&mut self, text: &str, max_decisions: usize) {
        for line in text.lines() {
            if self.decisions.len() >= max_decisions {
                return;
            }
            let trimmed = line.trim();
            if trimmed.len() < DECISION_MIN_CHARS {
                continue;
            }
            if DECISION_PATTERNS.iter().any(|p| p.is_match(trimmed)) {
                let phrase = tl_domain::text::clip_ellipsis(trimmed, DECISION_MAX_CHARS);
                if !self.decisions.contains(&phrase) {
                    self.decisions.push(phrase);
                }
            }
        }
    }
}

/// All file references in a piece of text, in match order, deduplicated.
pub fn extract_file_refs(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut refs = Vec::new();
    for pattern in FILE_PATTERNS.iter() {
        for captures in pattern.captures_iter(text) {
            if let Some(m) = captures.get(1) {
                let path = m.as_str().to_owned();
                if seen.insert(path.clone()) {
                    refs.push(path);
                }
            }
        }
    }
    refs
}

/// Base name without extension.
pub fn file_stem(path: &str) -> Option<&str> {
    std::path::Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(text: &str) -> TranscriptRecord {
        serde_json::from_str(&format!(
            r#"{{"type":"user","message":{{"content":{}}}}}"#,
            serde_json::to_string(text).unwrap()
        ))
        .unwrap()
    }

    fn assistant_text(text: &str) -> TranscriptRecord {
        serde_json::from_str(&format!(
            r#"{{"type":"assistant","message":{{"content":[{{"type":"text","text":{}}}]}}}}"#,
            serde_json::to_string(text).unwrap()
        ))
        .unwrap()
    }

    #[test]
    fn keywords_match_as_substrings() {
        let mut ex = Extraction::default();
        ex.scan_text("debugging the sqlite database layer");
        assert!(ex.topics.contains("debug"));
        assert!(ex.topics.contains("sqlite"));
        assert!(ex.topics.contains("database"));
    }

    #[test]
    fn backticked_and_quoted_paths() {
        let refs = extract_file_refs(r#"see `src/main.rs` and "lib/util.py""#);
        assert_eq!(refs, vec!["src/main.rs", "lib/util.py"]);
    }

    #[test]
    fn bare_path_with_slash() {
        let refs = extract_file_refs("edited crates/domain/src/text.rs today");
        assert_eq!(refs, vec!["crates/domain/src/text.rs"]);
    }

    #[test]
    fn file_stems_become_topics() {
        let mut ex = Extraction::default();
        ex.scan_text("touched `src/chunker.rs`");
        assert!(ex.topics.contains("chunker"));
        assert!(ex.files.contains("src/chunker.rs"));
    }

    #[test]
    fn tool_use_counts_and_input_scan() {
        let rec: TranscriptRecord = serde_json::from_str(
            r#"{"type":"assistant","message":{"content":[
                {"type":"tool_use","name":"Edit","input":{"file_path":"src/app.ts","old_string":"a"}},
                {"type":"tool_use","name":"Edit","input":{"file_path":"src/app.ts"}}
            ]}}"#,
        )
        .unwrap();
        let mut ex = Extraction::default();
        ex.scan_record(&rec, 5);
        assert_eq!(ex.tools.get("Edit"), Some(&2));
        assert!(ex.files.contains("src/app.ts"));
    }

    #[test]
    fn decisions_captured_with_bounds() {
        let mut ex = Extraction::default();
        ex.scan_record(
            &assistant_text("Decided to keep the old parser for now.\nok"),
            5,
        );
        assert_eq!(ex.decisions.len(), 1);
        assert!(ex.decisions[0].starts_with("Decided to"));
    }

    #[test]
    fn decision_cap_is_respected() {
        let text = (0..10)
            .map(|i| format!("Decided to rework module number {i} next."))
            .collect::<Vec<_>>()
            .join("\n");
        let mut ex = Extraction::default();
        ex.scan_record(&assistant_text(&text), 5);
        assert_eq!(ex.decisions.len(), 5);
    }

    #[test]
    fn user_messages_contribute_topics() {
        let mut ex = Extraction::default();
        ex.scan_record(&user("please fix the hooks automation"), 5);
        assert!(ex.topics.contains("hooks"));
        assert!(ex.topics.contains("automation"));
    }
}
