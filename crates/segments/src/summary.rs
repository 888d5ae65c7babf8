//! Segment summary payload construction.

use std::collections::BTreeMap;

use tl_domain::config::SegmenterConfig;
use tl_transcript::extract::Extraction;
use tl_transcript::TranscriptRecord;

use crate::types::SegmentSummary;

/// Topics and tools shown in the one-line summary string.
const SUMMARY_TOPICS: usize = 3;
const SUMMARY_TOOLS: usize = 2;

/// Build the summary payload for a finalized segment from its buffered
/// messages.
pub fn build_summary(messages: &[TranscriptRecord], config: &SegmenterConfig) -> SegmentSummary {
    let mut extraction = Extraction::default();
    for record in messages {
        extraction.scan_record(record, config.max_decisions);
    }

    let topics: Vec<String> = extraction.topics.into_iter().collect();
    let files: Vec<String> = extraction.files.into_iter().collect();
    let tools = top_tools(extraction.tools, config.max_tools);

    let summary = render_summary_line(&topics, &files, &tools);

    SegmentSummary {
        topics,
        files_touched: files,
        tools_used: tools,
        decisions: extraction.decisions,
        summary,
    }
}

/// `"Topics: a, b | Files: N | Tools: x, y"`, or `"General discussion"`
/// when nothing was extracted.
fn render_summary_line(
    topics: &[String],
    files: &[String],
    tools: &BTreeMap<String, u32>,
) -> String {
    let mut parts = Vec::new();

    if !topics.is_empty() {
        let shown: Vec<&str> = topics.iter().take(SUMMARY_TOPICS).map(String::as_str).collect();
        parts.push(format!("Topics: {}", shown.join(", ")));
    }
    if !files.is_empty() {
        parts.push(format!("Files: {}", files.len()));
    }
    if !tools.is_empty() {
        let mut ranked: Vec<(&String, &u32)> = tools.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let shown: Vec<&str> = ranked
            .iter()
            .take(SUMMARY_TOOLS)
            .map(|(name, _)| name.as_str())
            .collect();
        parts.push(format!("Tools: {}", shown.join(", ")));
    }

    if parts.is_empty() {
        "General discussion".to_owned()
    } else {
        parts.join(" | ")
    }
}

/// Keep the `cap` most-used tools; frequency descending, name ascending.
fn top_tools(tools: BTreeMap<String, u32>, cap: usize) -> BTreeMap<String, u32> {
    let mut ranked: Vec<(String, u32)> = tools.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(cap);
    ranked.into_iter().collect()
}
