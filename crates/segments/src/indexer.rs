//! Incremental segment indexing, run from the `Stop` hook.
//!
//! The index advances `last_indexed_line` to the transcript's current line
//! count on every run.  The active segment's message buffer is not
//! persisted; instead the active region is replayed from its `start_line`.
//! Boundary context (the "previous message") resets at each segment start,
//! which keeps every boundary decision a pure function of the replayed
//! region — a crash between runs can never change where segments fall.

use std::path::Path;

use chrono::{DateTime, Utc};

use tl_domain::config::SegmenterConfig;
use tl_domain::error::Result;
use tl_domain::state;
use tl_domain::trace::TraceEvent;
use tl_transcript::{TranscriptReader, TranscriptRecord};

use crate::boundary;
use crate::summary;
use crate::types::{ActiveSegment, Segment, SegmentIndex};

/// Bring the segment index up to date with the transcript.
pub fn update_segment_index(
    jsonl_path: &Path,
    index_path: &Path,
    session_id: &str,
    project: &str,
    config: &SegmenterConfig,
) -> Result<SegmentIndex> {
    let mut index: SegmentIndex = match state::load_json_or_default::<SegmentIndex>(index_path) {
        index if index.session_id.is_empty() => SegmentIndex::new(
            session_id,
            project,
            &jsonl_path.to_string_lossy(),
        ),
        index => index,
    };

    let reader = TranscriptReader::open(jsonl_path);
    let replay_start = index
        .active_segment
        .as_ref()
        .map(|active| active.start_line)
        .unwrap_or(index.last_indexed_line);

    let mut active = index.active_segment.clone().unwrap_or(ActiveSegment {
        id: index.segments.last().map(|s| s.segment_id + 1).unwrap_or(1),
        start_line: replay_start,
        line_count: 0,
    });

    let mut buffer: Vec<TranscriptRecord> = Vec::new();
    let mut prev: Option<(TranscriptRecord, Option<DateTime<Utc>>)> = None;
    let mut total_lines = index.last_indexed_line;

    for (line_index, maybe_record) in reader.raw_records()? {
        total_lines = line_index + 1;
        if line_index < replay_start {
            continue;
        }

        let Some(record) = maybe_record else {
            active.line_count = total_lines - active.start_line;
            continue;
        };
        if record.is_noise() {
            active.line_count = total_lines - active.start_line;
            continue;
        }

        let current_ts = record.timestamp();
        let lines_before_current = line_index - active.start_line;
        let boundary = boundary::check_boundary(
            lines_before_current,
            prev.as_ref().map(|(rec, ts)| (rec, *ts)),
            &record,
            current_ts,
            config,
        );

        if let Some(boundary_type) = boundary {
            let segment = finalize(&active, line_index, boundary_type, &buffer, config);
            TraceEvent::SegmentFinalized {
                session_id: index.session_id.clone(),
                segment_id: segment.segment_id,
                boundary: boundary_type.as_str().to_owned(),
                line_count: segment.line_count,
            }
            .emit();
            index.segments.push(segment);

            active = ActiveSegment {
                id: active.id + 1,
                start_line: line_index,
                line_count: 0,
            };
            buffer.clear();
            prev = None;
        }

        active.line_count = total_lines - active.start_line;
        prev = Some((record.clone(), current_ts));
        buffer.push(record);
    }

    index.last_indexed_line = total_lines;
    index.active_segment = Some(active);

    state::write_json_atomic(index_path, &index)?;

    TraceEvent::SegmentIndexUpdated {
        session_id: index.session_id.clone(),
        last_indexed_line: index.last_indexed_line,
        segments: index.segments.len(),
    }
    .emit();

    Ok(index)
}

fn finalize(
    active: &ActiveSegment,
    end_line: usize,
    boundary_type: boundary::BoundaryType,
    buffer: &[TranscriptRecord],
    config: &SegmenterConfig,
) -> Segment {
    Segment {
        segment_id: active.id,
        start_line: active.start_line,
        end_line,
        line_count: end_line - active.start_line,
        timestamp: buffer.iter().find_map(|record| record.timestamp()),
        boundary_type,
        summary: summary::build_summary(buffer, config),
    }
}
