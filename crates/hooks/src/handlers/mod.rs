//! Per-event hook handlers.
//!
//! Handlers return a [`HookResponse`]; the dispatch wrapper turns every
//! error into a logged fallback so a hook process can never fail the host:
//! prompt/session hooks fall back to silence, `Stop` hooks to
//! `{"continue": true}`.

mod history_index;
mod history_search;
mod large_input;
mod learning;
mod recover;
mod segment_index;
mod skill_match;
mod skill_track;

pub use learning::PendingLearning;

use tl_domain::error::Result;
use tl_domain::trace::TraceEvent;

use crate::cli::HookName;
use crate::event::HookEvent;
use crate::respond::HookResponse;
use crate::HookContext;

/// Run one hook handler with full error isolation.
pub fn run_hook(name: HookName, event: &HookEvent, ctx: &HookContext) -> HookResponse {
    let response = match dispatch(name, event, ctx) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(hook = name.log_name(), error = %e, "hook handler failed");
            fallback(name)
        }
    };
    if let HookResponse::Context(text) = &response {
        TraceEvent::ContextInjected {
            hook: name.log_name().to_owned(),
            chars: text.len(),
        }
        .emit();
    }
    response
}

/// The response for a hook that could not do its work.
pub fn fallback(name: HookName) -> HookResponse {
    if name.is_stop_hook() {
        HookResponse::Continue {
            system_message: None,
        }
    } else {
        HookResponse::Silent
    }
}

fn dispatch(name: HookName, event: &HookEvent, ctx: &HookContext) -> Result<HookResponse> {
    match name {
        HookName::SkillMatch => skill_match::run(event, ctx),
        HookName::LargeInput => large_input::run(event, ctx),
        HookName::HistorySearch => history_search::run(event, ctx),
        HookName::LearningPickup => learning::pickup(event, ctx),
        HookName::SkillTrack => skill_track::run(event, ctx),
        HookName::LearningDetect => learning::detect(event, ctx),
        HookName::HistoryIndex => history_index::run(event, ctx),
        HookName::SegmentIndex => segment_index::run(event, ctx),
        HookName::Recover => recover::run(event, ctx),
    }
}

/// Resolve the transcript for a `Stop`/`SessionStart` hook: the payload's
/// path when present, otherwise the newest transcript on disk.
pub(crate) fn resolve_transcript(
    event: &HookEvent,
    ctx: &HookContext,
) -> Option<std::path::PathBuf> {
    if let Some(path) = event.transcript_path.as_deref() {
        if !path.is_empty() {
            return Some(std::path::PathBuf::from(path));
        }
    }
    tl_transcript::find_current_session(&ctx.layout.projects_dir())
}
