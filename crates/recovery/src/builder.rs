//! Recovery block assembly.
//!
//! Output shape: persistence-file sections, then a delimiter, then one
//! section per selected segment.  Byte-identical given the same transcript,
//! segment index, and persistence files — selection order is score
//! descending with stable insertion order for ties.

use std::path::Path;

use chrono::{DateTime, Utc};

use tl_domain::config::RecoveryConfig;
use tl_domain::text;
use tl_domain::trace::TraceEvent;
use tl_segments::{Segment, SegmentIndex};
use tl_transcript::TranscriptReader;

use crate::excerpt;
use crate::persistence::PersistenceFiles;
use crate::scoring;

/// Delimiter between the persistence block and the segment sections.
pub const SEGMENT_DELIMITER: &str = "=== RELEVANT CONVERSATION CONTEXT ===";

/// The segment side of a recovery: the transcript and its segment index.
pub struct RecoverySource<'a> {
    pub reader: &'a TranscriptReader,
    pub index: &'a SegmentIndex,
}

/// Assemble the recovery block.  `None` when there is nothing to inject —
/// the hook must then emit no output at all.
pub fn build_recovery_block(
    project_dir: &Path,
    session: Option<RecoverySource<'_>>,
    now: DateTime<Utc>,
    config: &RecoveryConfig,
) -> Option<String> {
    let files = PersistenceFiles::read(project_dir);
    let pending_tasks = files.pending_tasks();

    let mut out = String::new();

    for (filename, content) in files.sections() {
        out.push_str(&format!("=== PROJECT STATE: {filename} ===\n"));
        out.push_str(text::clip(content.trim_end(), config.file_cap_chars));
        out.push_str("\n--- END ---\n\n");
    }

    let mut segments_included = 0;
    if let Some(source) = session {
        let selected = select_segments(source.index, &pending_tasks, now, config);
        if !selected.is_empty() {
            out.push_str(SEGMENT_DELIMITER);
            out.push('\n');

            let mut spent = 0usize;
            for (segment, score) in selected {
                let estimate = segment.line_count * config.chars_per_line_estimate;
                if spent + estimate > config.context_budget_chars {
                    continue;
                }
                let Ok(body) = excerpt::extract_excerpt(source.reader, segment, config) else {
                    continue;
                };

                out.push_str(&format!(
                    "\n--- Segment {} (score {score}) ---\n",
                    segment.segment_id
                ));
                if !segment.summary.topics.is_empty() {
                    out.push_str(&format!(
                        "Topics: {}\n",
                        segment.summary.topics.join(", ")
                    ));
                }
                out.push_str(&format!("Summary: {}\n", segment.summary.summary));
                if !body.is_empty() {
                    out.push_str(&body);
                    out.push('\n');
                }

                segments_included += 1;
                spent += body.len();
                if spent >= config.context_budget_chars {
                    break;
                }
            }
        }
    }

    if out.trim().is_empty() {
        return None;
    }

    TraceEvent::RecoveryBuilt {
        segments_included,
        chars: out.len(),
    }
    .emit();

    Some(out)
}

/// All finalized segments with their scores, best first, ties in index
/// order.
fn select_segments<'a>(
    index: &'a SegmentIndex,
    pending_tasks: &[String],
    now: DateTime<Utc>,
    config: &RecoveryConfig,
) -> Vec<(&'a Segment, i64)> {
    let mut scored: Vec<(&Segment, i64)> = index
        .segments
        .iter()
        .map(|segment| {
            (
                segment,
                scoring::score_segment(segment, pending_tasks, now, config),
            )
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
}
