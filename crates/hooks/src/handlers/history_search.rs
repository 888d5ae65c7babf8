//! `UserPromptSubmit`: surface related sessions from the history index.

use std::path::Path;

use chrono::Utc;

use tl_domain::error::Result;
use tl_domain::trace::TraceEvent;
use tl_domain::{paths, state};
use tl_history::HistoryIndex;

use crate::event::HookEvent;
use crate::respond::HookResponse;
use crate::HookContext;

pub(super) fn run(event: &HookEvent, ctx: &HookContext) -> Result<HookResponse> {
    let Some(prompt) = event.prompt.as_deref().filter(|p| !p.trim().is_empty()) else {
        return Ok(HookResponse::Silent);
    };

    let index: HistoryIndex = match state::load_json(&ctx.layout.history_index_path())? {
        Some(index) => index,
        None => return Ok(HookResponse::Silent),
    };

    let project_dir = paths::resolve_project_dir(event.cwd.as_deref());
    let project_key = paths::project_key(Path::new(&project_dir));

    let today = Utc::now().date_naive();
    let hits = tl_history::search(&index, &project_key, prompt, &ctx.config.history, today);

    TraceEvent::HistorySearched { hits: hits.len() }.emit();
    if hits.is_empty() {
        return Ok(HookResponse::Silent);
    }

    let mut block = String::from("[HISTORY MATCH] Related past sessions in this project:\n");
    for hit in &hits {
        block.push_str(&format!(
            "- {} ({} pts, {} lines): {}\n",
            hit.short_id(),
            hit.score,
            hit.line_count,
            hit.matched_topics.join(", "),
        ));
    }
    block.push_str("Ask to load a session by its ID prefix for details.\n");
    Ok(HookResponse::Context(block))
}
