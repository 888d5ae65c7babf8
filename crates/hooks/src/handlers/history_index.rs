//! `Stop`: incremental history index update.

use tl_domain::error::Result;

use crate::event::HookEvent;
use crate::respond::HookResponse;
use crate::HookContext;

pub(super) fn run(_event: &HookEvent, ctx: &HookContext) -> Result<HookResponse> {
    let stats = tl_history::update_index(
        &ctx.layout.projects_dir(),
        &ctx.layout.history_index_path(),
        &ctx.config.history,
    )?;
    tracing::info!(
        scanned = stats.scanned,
        updated = stats.updated,
        "history index updated"
    );
    Ok(HookResponse::Continue {
        system_message: None,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::test_context;
    use super::*;
    use std::io::Write;

    #[test]
    fn indexes_and_continues() {
        let (_tmp, ctx) = test_context();
        let dir = ctx.layout.projects_dir().join("-proj");
        std::fs::create_dir_all(&dir).unwrap();
        let mut f = std::fs::File::create(dir.join("s1.jsonl")).unwrap();
        writeln!(
            f,
            r#"{{"type":"user","message":{{"content":"hooks work"}},"timestamp":"2026-03-01T10:00:00Z"}}"#
        )
        .unwrap();

        let response = run(&HookEvent::default(), &ctx).unwrap();
        assert_eq!(
            response,
            HookResponse::Continue {
                system_message: None
            }
        );
        assert!(ctx.layout.history_index_path().exists());
    }

    #[test]
    fn empty_projects_root_still_continues() {
        let (_tmp, ctx) = test_context();
        let response = run(&HookEvent::default(), &ctx).unwrap();
        assert_eq!(
            response,
            HookResponse::Continue {
                system_message: None
            }
        );
    }
}
