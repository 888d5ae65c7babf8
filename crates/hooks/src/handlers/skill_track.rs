//! `PostToolUse` (matcher=Read): track SKILL.md reads.

use std::path::Path;

use chrono::Utc;

use tl_domain::error::Result;
use tl_skills::tracker;

use crate::event::HookEvent;
use crate::respond::HookResponse;
use crate::HookContext;

pub(super) fn run(event: &HookEvent, ctx: &HookContext) -> Result<HookResponse> {
    // Side effects only; never any stdout.
    if event.tool_name.as_deref() != Some("Read") {
        return Ok(HookResponse::Silent);
    }
    let Some(file_path) = event
        .tool_input
        .as_ref()
        .and_then(|input| input.get("file_path"))
        .and_then(|path| path.as_str())
    else {
        return Ok(HookResponse::Silent);
    };

    tracker::track_read(
        &ctx.layout.skills_dir(),
        &ctx.layout.skill_index_path(),
        Path::new(file_path),
        Utc::now().date_naive(),
    )?;
    Ok(HookResponse::Silent)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::test_context;
    use super::*;
    use tl_domain::state;
    use tl_skills::SkillRecord;

    fn read_event(path: &str) -> HookEvent {
        HookEvent {
            tool_name: Some("Read".into()),
            tool_input: Some(serde_json::json!({ "file_path": path })),
            ..HookEvent::default()
        }
    }

    fn install_skill(ctx: &HookContext, name: &str) {
        let dir = ctx.layout.skills_dir().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("metadata.json"),
            serde_json::to_string(&SkillRecord::new(name)).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn skill_read_bumps_counter() {
        let (_tmp, ctx) = test_context();
        install_skill(&ctx, "deploy-checklist");
        let doc = ctx
            .layout
            .skills_dir()
            .join("deploy-checklist")
            .join("SKILL.md");

        let response = run(&read_event(&doc.to_string_lossy()), &ctx).unwrap();
        assert_eq!(response, HookResponse::Silent);

        let record: SkillRecord = state::load_json(
            &ctx.layout
                .skills_dir()
                .join("deploy-checklist")
                .join("metadata.json"),
        )
        .unwrap()
        .unwrap();
        assert_eq!(record.use_count, 1);
    }

    #[test]
    fn ordinary_reads_are_ignored() {
        let (_tmp, ctx) = test_context();
        install_skill(&ctx, "deploy-checklist");

        run(&read_event("/some/src/main.rs"), &ctx).unwrap();
        let record: SkillRecord = state::load_json(
            &ctx.layout
                .skills_dir()
                .join("deploy-checklist")
                .join("metadata.json"),
        )
        .unwrap()
        .unwrap();
        assert_eq!(record.use_count, 0);
    }

    #[test]
    fn other_tools_are_ignored() {
        let (_tmp, ctx) = test_context();
        let event = HookEvent {
            tool_name: Some("Write".into()),
            tool_input: Some(serde_json::json!({ "file_path": "skills/x/SKILL.md" })),
            ..HookEvent::default()
        };
        let response = run(&event, &ctx).unwrap();
        assert_eq!(response, HookResponse::Silent);
    }
}
