//! Usage tracking: counter updates written to both the per-skill metadata
//! and the central index.
//!
//! One writer at a time is assumed; every write still goes through
//! temp-then-rename so an interrupted update leaves old or new state, never
//! a truncated file.  Counters only ever increase.

use std::path::Path;

use chrono::NaiveDate;

use tl_domain::error::Result;
use tl_domain::trace::TraceEvent;

use crate::loader::{self, SKILL_DOC_FILE, SKILL_INDEX_DIR};
use crate::types::SkillRecord;

/// Outcome of a successful tracker update.
#[derive(Debug, Clone)]
pub struct TrackOutcome {
    pub skill: String,
    pub use_count: u64,
}

/// If `file_path` is a skill document (`skills/<name>/SKILL.md`), bump that
/// skill's use counter and stamp `last_used`.
///
/// Returns `Ok(None)` for paths that are not skill documents — including the
/// index directory itself.
pub fn track_read(
    skills_root: &Path,
    index_path: &Path,
    file_path: &Path,
    today: NaiveDate,
) -> Result<Option<TrackOutcome>> {
    let Some(skill_name) = skill_name_from_doc_path(file_path) else {
        return Ok(None);
    };

    let outcome = update_skill(skills_root, index_path, &skill_name, |record| {
        record.record_use(today);
    })?;

    if let Some(outcome) = &outcome {
        TraceEvent::SkillTracked {
            skill: outcome.skill.clone(),
            use_count: outcome.use_count,
        }
        .emit();
    }
    Ok(outcome)
}

/// Increment a skill's success counter.
pub fn mark_success(
    skills_root: &Path,
    index_path: &Path,
    name: &str,
) -> Result<Option<TrackOutcome>> {
    update_skill(skills_root, index_path, name, |record| {
        record.success_count += 1;
    })
}

/// Increment a skill's failure counter.
pub fn mark_failure(
    skills_root: &Path,
    index_path: &Path,
    name: &str,
) -> Result<Option<TrackOutcome>> {
    update_skill(skills_root, index_path, name, |record| {
        record.failure_count += 1;
    })
}

/// Extract `<name>` from a `skills/<name>/SKILL.md` path.
pub fn skill_name_from_doc_path(path: &Path) -> Option<String> {
    if path.file_name().and_then(|n| n.to_str()) != Some(SKILL_DOC_FILE) {
        return None;
    }
    let parent = path.parent()?;
    if parent
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        != Some("skills")
    {
        return None;
    }
    let name = parent.file_name()?.to_str()?;
    if name == SKILL_INDEX_DIR {
        return None;
    }
    Some(name.to_owned())
}

/// Read-modify-write one skill in both the metadata file and the index.
fn update_skill(
    skills_root: &Path,
    index_path: &Path,
    name: &str,
    apply: impl Fn(&mut SkillRecord),
) -> Result<Option<TrackOutcome>> {
    let skill_dir = skills_root.join(name);
    let Some(mut record) = loader::load_skill(&skill_dir)? else {
        return Ok(None);
    };
    apply(&mut record);
    loader::save_metadata(skills_root, &record)?;

    let mut index = loader::load_index(skills_root, index_path);
    match index.find_mut(name) {
        Some(entry) => apply(entry),
        None => index.upsert(record.clone()),
    }
    index.last_updated = Some(chrono::Utc::now());
    loader::save_index(index_path, &index)?;

    Ok(Some(TrackOutcome {
        skill: record.name,
        use_count: record.use_count,
    }))
}
