//! Loading skill metadata from the skills tree.

use std::path::Path;

use tl_domain::error::Result;
use tl_domain::state;

use crate::frontmatter;
use crate::types::{SkillIndex, SkillRecord};

/// Directory holding the central index — never a skill itself.
pub const SKILL_INDEX_DIR: &str = "skill-index";
pub const METADATA_FILE: &str = "metadata.json";
pub const SKILL_DOC_FILE: &str = "SKILL.md";

/// Load one skill's metadata.
///
/// `metadata.json` is canonical; a directory with only a `SKILL.md` yields a
/// record synthesized from its frontmatter (counters at zero).  `None` when
/// the directory holds neither.
pub fn load_skill(skill_dir: &Path) -> Result<Option<SkillRecord>> {
    let name = match skill_dir.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_owned(),
        None => return Ok(None),
    };
    if !frontmatter::is_valid_skill_name(&name) {
        return Ok(None);
    }

    if let Some(record) = state::load_json::<SkillRecord>(&skill_dir.join(METADATA_FILE))? {
        return Ok(Some(record));
    }

    let doc_path = skill_dir.join(SKILL_DOC_FILE);
    if !doc_path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&doc_path)?;
    let (fm, _body) = frontmatter::parse_frontmatter(&content);
    Ok(fm.map(|fm| fm.into_record(&name)))
}

/// Scan the skills root and load every skill entry, sorted by name.
pub fn scan_skills(skills_root: &Path) -> Result<Vec<SkillRecord>> {
    let mut entries = Vec::new();
    if !skills_root.exists() {
        return Ok(entries);
    }
    for entry in std::fs::read_dir(skills_root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some(SKILL_INDEX_DIR) {
            continue;
        }
        match load_skill(&path) {
            Ok(Some(skill)) => entries.push(skill),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    skill_dir = %path.display(),
                    error = %e,
                    "skipping skill directory with unreadable metadata"
                );
            }
        }
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Load the central index, rebuilding it from a directory scan when missing.
pub fn load_index(skills_root: &Path, index_path: &Path) -> SkillIndex {
    if let Ok(Some(index)) = state::load_json::<SkillIndex>(index_path) {
        return index;
    }
    match scan_skills(skills_root) {
        Ok(skills) => SkillIndex {
            skills,
            last_updated: None,
        },
        Err(_) => SkillIndex::default(),
    }
}

/// Persist one skill's metadata atomically.
pub fn save_metadata(skills_root: &Path, record: &SkillRecord) -> Result<()> {
    let path = skills_root.join(&record.name).join(METADATA_FILE);
    state::write_json_atomic(&path, record)
}

/// Persist the central index atomically.
pub fn save_index(index_path: &Path, index: &SkillIndex) -> Result<()> {
    state::write_json_atomic(index_path, index)
}
