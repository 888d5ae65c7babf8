//! `UserPromptSubmit`: notice oversized prompts and point at the RLM
//! pipeline.

use tl_domain::error::Result;
use tl_domain::text::format_thousands;

use crate::event::HookEvent;
use crate::respond::HookResponse;
use crate::HookContext;

/// Probe's token estimate divisor, repeated here for the notice text.
const CHARS_PER_TOKEN: usize = 4;

pub(super) fn run(event: &HookEvent, ctx: &HookContext) -> Result<HookResponse> {
    let Some(prompt) = event.prompt.as_deref() else {
        return Ok(HookResponse::Silent);
    };
    let chars = prompt.chars().count();
    let config = &ctx.config.hooks;

    if chars >= config.large_input_strong {
        return Ok(HookResponse::Context(strong_notice(chars)));
    }
    if chars >= config.large_input_soft {
        return Ok(HookResponse::Context(soft_notice(chars)));
    }
    Ok(HookResponse::Silent)
}

fn soft_notice(chars: usize) -> String {
    format!(
        "LARGE INPUT NOTICE: this prompt is {} characters (~{} tokens).\n\
         If it contains a large document, consider the RLM pipeline:\n\
         `threadline probe <file>` will recommend a chunking strategy.\n",
        format_thousands(chars),
        format_thousands(chars / CHARS_PER_TOKEN),
    )
}

fn strong_notice(chars: usize) -> String {
    format!(
        "LARGE INPUT DETECTED - RLM RECOMMENDED\n\
         This prompt is {} characters (~{} tokens) and will not fit a\n\
         context window comfortably. Recommended workflow:\n\
         1. Save the input to a file under rlm_context/\n\
         2. Run: threadline probe <file>\n\
         3. Run: threadline chunk <file> --strategy <recommended> --output rlm_context/chunks\n\
         4. Process the chunks in parallel, then run: threadline aggregate rlm_context/results\n",
        format_thousands(chars),
        format_thousands(chars / CHARS_PER_TOKEN),
    )
}
