//! `Stop`: incremental transcript segmentation.

use tl_domain::error::Result;
use tl_transcript::discover;

use crate::event::HookEvent;
use crate::respond::HookResponse;
use crate::HookContext;

pub(super) fn run(event: &HookEvent, ctx: &HookContext) -> Result<HookResponse> {
    let continue_response = HookResponse::Continue {
        system_message: None,
    };

    let Some(transcript) = super::resolve_transcript(event, ctx) else {
        return Ok(continue_response);
    };
    let Some(session_id) = event
        .session_id
        .clone()
        .or_else(|| discover::session_id_from_path(&transcript))
    else {
        return Ok(continue_response);
    };
    let project = discover::project_key_from_path(&transcript).unwrap_or_default();

    tl_segments::update_segment_index(
        &transcript,
        &ctx.layout.segment_index_path(&session_id),
        &session_id,
        &project,
        &ctx.config.segmenter,
    )?;
    Ok(continue_response)
}
