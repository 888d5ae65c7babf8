//! Result aggregation.
//!
//! Loads a directory of per-chunk result files (JSON parsed and preserved,
//! text kept literal with `key: value` lines lifted into an `extracted`
//! map) and renders one aggregate as JSON, framed text, or a condensed
//! summary.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use tl_domain::error::{Error, Result};
use tl_domain::text;
use tl_domain::trace::TraceEvent;

/// Longest plausible `key` in a `key: value` line.
const MAX_KEY_LEN: usize = 40;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResultContent {
    Json {
        json: serde_json::Value,
    },
    Text {
        content: String,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        extracted: BTreeMap<String, String>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultFile {
    pub name: String,
    #[serde(flatten)]
    pub content: ResultContent,
}

/// Load every result file in `dir` (optionally filtered by a glob
/// `pattern`), sorted by filename.
pub fn load_results(dir: &Path, pattern: Option<&str>) -> Result<Vec<ResultFile>> {
    if !dir.is_dir() {
        return Err(Error::Other(format!(
            "results directory not found: {}",
            dir.display()
        )));
    }

    let matcher = pattern
        .map(glob::Pattern::new)
        .transpose()
        .map_err(|e| Error::Other(format!("invalid pattern: {e}")))?;

    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .flatten()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            matcher
                .as_ref()
                .map(|m| m.matches(name))
                .unwrap_or(true)
        })
        .collect();
    names.sort();

    let mut results = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.join(&name);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable result");
                continue;
            }
        };

        let content = if name.ends_with(".json") {
            match serde_json::from_str(&raw) {
                Ok(json) => ResultContent::Json { json },
                Err(_) => text_content(raw),
            }
        } else {
            text_content(raw)
        };
        results.push(ResultFile { name, content });
    }

    TraceEvent::AggregateBuilt {
        files: results.len(),
    }
    .emit();

    Ok(results)
}

fn text_content(content: String) -> ResultContent {
    let extracted = extract_key_values(&content);
    ResultContent::Text { content, extracted }
}

/// Lift `key: value` lines with short, plausible keys into a map; keys are
/// lowercased with spaces collapsed to underscores.
pub fn extract_key_values(content: &str) -> BTreeMap<String, String> {
    let mut extracted = BTreeMap::new();
    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() || key.len() > MAX_KEY_LEN {
            continue;
        }
        if !key.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '_' || c == '-')
        {
            continue;
        }
        let normalized = key.to_lowercase().replace(' ', "_");
        extracted.entry(normalized).or_insert_with(|| value.to_owned());
    }
    extracted
}

/// JSON aggregate: `{total_files, results_dir, results}`.
pub fn render_json(results: &[ResultFile], results_dir: &Path) -> serde_json::Value {
    serde_json::json!({
        "total_files": results.len(),
        "results_dir": results_dir.to_string_lossy(),
        "results": results,
    })
}

/// Framed text aggregate with one section per file.
pub fn render_text(
    results: &[ResultFile],
    query: Option<&str>,
    per_file_cap: usize,
) -> String {
    let mut out = String::new();
    out.push_str(&"=".repeat(60));
    out.push_str("\nAGGREGATED RESULTS\n");
    if let Some(query) = query {
        out.push_str(&format!("Query: {query}\n"));
    }
    out.push_str(&format!("Files: {}\n", results.len()));
    out.push_str(&"=".repeat(60));
    out.push('\n');

    for result in results {
        out.push_str(&format!("\n--- {} ---\n", result.name));
        let body = match &result.content {
            ResultContent::Json { json } => {
                serde_json::to_string_pretty(json).unwrap_or_default()
            }
            ResultContent::Text { content, .. } => content.clone(),
        };
        out.push_str(&text::clip_ellipsis(body.trim_end(), per_file_cap));
        out.push('\n');
    }
    out
}

/// Condensed summary: one line per file.
pub fn render_summary(results: &[ResultFile]) -> String {
    let mut out = format!("{} result file(s)\n", results.len());
    for result in results {
        let hint = match &result.content {
            ResultContent::Json { json } => format!("json, {} bytes", json.to_string().len()),
            ResultContent::Text { content, extracted } if !extracted.is_empty() => {
                let keys: Vec<&str> = extracted.keys().take(4).map(String::as_str).collect();
                format!("{} bytes, keys: {}", content.len(), keys.join(", "))
            }
            ResultContent::Text { content, .. } => {
                let first_line = content.lines().next().unwrap_or("");
                format!("{} bytes, {}", content.len(), text::clip_ellipsis(first_line, 60))
            }
        };
        out.push_str(&format!("- {}: {hint}\n", result.name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn loads_text_and_json_sorted() {
        let dir = results_dir(&[("b.json", r#"{"k":"v"}"#), ("a.txt", "alpha")]);
        let results = load_results(dir.path(), None).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "a.txt");
        assert!(matches!(results[0].content, ResultContent::Text { .. }));
        assert!(matches!(results[1].content, ResultContent::Json { .. }));
    }

    #[test]
    fn text_aggregate_lists_files_in_order() {
        let dir = results_dir(&[("a.txt", "alpha"), ("b.json", r#"{"k":"v"}"#)]);
        let results = load_results(dir.path(), None).unwrap();
        let out = render_text(&results, None, 5000);

        let pos_a = out.find("a.txt").unwrap();
        let pos_b = out.find("b.json").unwrap();
        assert!(pos_a < pos_b);
        assert!(out.contains("alpha"));
        assert!(out.contains(r#""k": "v""#));
    }

    #[test]
    fn malformed_json_degrades_to_text() {
        let dir = results_dir(&[("bad.json", "{ nope")]);
        let results = load_results(dir.path(), None).unwrap();
        assert!(matches!(results[0].content, ResultContent::Text { .. }));
    }

    #[test]
    fn key_value_extraction() {
        let extracted = extract_key_values(
            "Summary: all good\nError Count: 0\nnot a kv line\nx: \n: empty key\nSome Very Long Key That Goes On And On And Definitely Exceeds The Cap: v\n",
        );
        assert_eq!(extracted.get("summary").map(String::as_str), Some("all good"));
        assert_eq!(extracted.get("error_count").map(String::as_str), Some("0"));
        assert_eq!(extracted.len(), 2);
    }

    #[test]
    fn first_key_occurrence_wins() {
        let extracted = extract_key_values("status: ok\nstatus: failed\n");
        assert_eq!(extracted.get("status").map(String::as_str), Some("ok"));
    }

    #[test]
    fn pattern_filters_files() {
        let dir = results_dir(&[("one.txt", "1"), ("two.md", "2")]);
        let results = load_results(dir.path(), Some("*.txt")).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "one.txt");
    }

    #[test]
    fn long_content_is_capped_in_text_render() {
        let long = "z".repeat(10_000);
        let dir = results_dir(&[("big.txt", &long)]);
        let results = load_results(dir.path(), None).unwrap();
        let out = render_text(&results, Some("find z"), 5000);
        assert!(out.len() < 6000);
        assert!(out.contains("Query: find z"));
    }

    #[test]
    fn json_aggregate_shape() {
        let dir = results_dir(&[("a.txt", "alpha")]);
        let results = load_results(dir.path(), None).unwrap();
        let value = render_json(&results, dir.path());
        assert_eq!(value["total_files"], 1);
        assert_eq!(value["results"][0]["name"], "a.txt");
        assert_eq!(value["results"][0]["content"], "alpha");
    }

    #[test]
    fn missing_dir_is_an_error() {
        assert!(load_results(Path::new("/no/such/dir"), None).is_err());
    }

    #[test]
    fn summary_lists_files() {
        let dir = results_dir(&[("a.txt", "Summary: fine\nrest"), ("b.json", "{}")]);
        let results = load_results(dir.path(), None).unwrap();
        let out = render_summary(&results);
        assert!(out.starts_with("2 result file(s)"));
        assert!(out.contains("- a.txt:"));
        assert!(out.contains("keys: summary"));
    }
}
