use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryType;

/// Summary payload attached to a finalized segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub files_touched: Vec<String>,
    #[serde(default)]
    pub tools_used: BTreeMap<String, u32>,
    #[serde(default)]
    pub decisions: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

/// A finalized, immutable segment covering the half-open line range
/// `[start_line, end_line)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub segment_id: u64,
    pub start_line: usize,
    pub end_line: usize,
    pub line_count: usize,
    /// Timestamp of the segment's first message.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub boundary_type: BoundaryType,
    pub summary: SegmentSummary,
}

/// The unfinalized tail.  Only these stats persist between runs; the
/// message buffer is rebuilt by replaying from `start_line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSegment {
    pub id: u64,
    pub start_line: usize,
    pub line_count: usize,
}

/// Per-transcript segment index (`sessions/<session-id>/segments.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentIndex {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub jsonl_path: String,
    #[serde(default)]
    pub last_indexed_line: usize,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub active_segment: Option<ActiveSegment>,
}

impl SegmentIndex {
    pub fn new(session_id: &str, project: &str, jsonl_path: &str) -> Self {
        Self {
            session_id: session_id.to_owned(),
            project: project.to_owned(),
            jsonl_path: jsonl_path.to_owned(),
            ..Self::default()
        }
    }

    /// Finalized segments plus the active range must tile
    /// `[0, last_indexed_line)` without gaps or overlap.
    pub fn check_coverage(&self) -> bool {
        let mut expected_start = 0;
        for segment in &self.segments {
            if segment.start_line != expected_start || segment.end_line < segment.start_line {
                return false;
            }
            expected_start = segment.end_line;
        }
        match &self.active_segment {
            Some(active) => {
                active.start_line == expected_start
                    && active.start_line + active.line_count == self.last_indexed_line
            }
            None => expected_start == self.last_indexed_line,
        }
    }
}
