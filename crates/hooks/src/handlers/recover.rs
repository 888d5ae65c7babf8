//! `SessionStart` (compact/resume): build and inject the recovery block.

use chrono::Utc;

use tl_domain::error::Result;
use tl_domain::{paths, state};
use tl_recovery::builder::{build_recovery_block, RecoverySource};
use tl_segments::SegmentIndex;
use tl_transcript::{discover, TranscriptReader};

use crate::event::HookEvent;
use crate::respond::HookResponse;
use crate::HookContext;

/// Session triggers this hook responds to; anything else is silent.
const TRIGGERS: [&str; 2] = ["compact", "resume"];

pub(super) fn run(event: &HookEvent, ctx: &HookContext) -> Result<HookResponse> {
    if let Some(trigger) = event.session_trigger.as_deref() {
        if !TRIGGERS.contains(&trigger) {
            return Ok(HookResponse::Silent);
        }
    }

    let project_dir = paths::resolve_project_dir(event.cwd.as_deref());
    let now = Utc::now();

    // Segment context is optional: without a transcript or index the block
    // still carries the persistence files.
    let transcript = super::resolve_transcript(event, ctx);
    let reader = transcript.as_deref().map(TranscriptReader::open);
    let index: Option<SegmentIndex> = transcript
        .as_deref()
        .and_then(discover::session_id_from_path)
        .and_then(|session_id| {
            state::load_json(&ctx.layout.segment_index_path(&session_id)).unwrap_or(None)
        });

    let source = match (reader.as_ref(), index.as_ref()) {
        (Some(reader), Some(index)) => Some(RecoverySource { reader, index }),
        _ => None,
    };

    let block = build_recovery_block(&project_dir, source, now, &ctx.config.recovery);
    Ok(match block {
        Some(block) => HookResponse::Context(block),
        None => HookResponse::Silent,
    })
}
