//! `UserPromptSubmit`: inject strong skill matches.

use chrono::Utc;

use tl_domain::error::Result;
use tl_domain::trace::TraceEvent;
use tl_skills::SkillRegistry;

use crate::event::HookEvent;
use crate::respond::HookResponse;
use crate::HookContext;

pub(super) fn run(event: &HookEvent, ctx: &HookContext) -> Result<HookResponse> {
    let Some(prompt) = event.prompt.as_deref().filter(|p| !p.trim().is_empty()) else {
        return Ok(HookResponse::Silent);
    };

    let registry = SkillRegistry::load(
        &ctx.layout.skills_dir(),
        &ctx.layout.skill_index_path(),
    );
    let today = Utc::now().date_naive();
    let matches = registry.match_prompt(prompt, &ctx.config.skills, today);

    // Suggestion-level matches are not worth a context injection; only
    // strong ones get through.
    let strong: Vec<_> = matches
        .into_iter()
        .filter(|m| m.score >= ctx.config.skills.strong_threshold)
        .collect();
    if strong.is_empty() {
        return Ok(HookResponse::Silent);
    }

    let mut block = String::from("[SKILL MATCH] Relevant skills for this prompt:\n");
    for skill in &strong {
        TraceEvent::SkillMatched {
            skill: skill.name.clone(),
            score: skill.score,
        }
        .emit();
        block.push_str(&skill.render_match_line());
        block.push('\n');
        block.push_str(&format!("  Read: skills/{}/SKILL.md\n", skill.name));
    }
    Ok(HookResponse::Context(block))
}
