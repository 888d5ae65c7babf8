use serde::Serialize;

/// Structured trace events emitted across all Threadline crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    HookInvoked {
        hook: String,
        session_id: Option<String>,
    },
    ContextInjected {
        hook: String,
        chars: usize,
    },
    SkillMatched {
        skill: String,
        score: i64,
    },
    SkillTracked {
        skill: String,
        use_count: u64,
    },
    HistoryIndexed {
        sessions_scanned: usize,
        sessions_updated: usize,
    },
    HistorySearched {
        hits: usize,
    },
    SegmentFinalized {
        session_id: String,
        segment_id: u64,
        boundary: String,
        line_count: usize,
    },
    SegmentIndexUpdated {
        session_id: String,
        last_indexed_line: usize,
        segments: usize,
    },
    LearningMomentDetected {
        reason: String,
    },
    RecoveryBuilt {
        segments_included: usize,
        chars: usize,
    },
    ChunksWritten {
        source_file: String,
        total_chunks: usize,
        strategy: String,
    },
    AggregateBuilt {
        files: usize,
    },
    ParallelConfigWritten {
        batches: usize,
    },
    SandboxRun {
        success: bool,
        output_chars: usize,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "tl_event");
    }
}
