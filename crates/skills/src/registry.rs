use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use parking_lot::RwLock;

use tl_domain::config::SkillsConfig;

use crate::loader;
use crate::matcher::{self, ScoredSkill};
use crate::types::{SkillIndex, SkillRecord};

/// In-memory view of the skill registry.
///
/// Backed by the central index file, with a directory scan as fallback when
/// the index is missing.
pub struct SkillRegistry {
    skills_root: PathBuf,
    index: RwLock<SkillIndex>,
}

impl SkillRegistry {
    pub fn load(skills_root: &Path, index_path: &Path) -> Self {
        let index = loader::load_index(skills_root, index_path);
        tracing::debug!(
            skills_count = index.skills.len(),
            "skill registry loaded"
        );
        Self {
            skills_root: skills_root.to_path_buf(),
            index: RwLock::new(index),
        }
    }

    pub fn empty() -> Self {
        Self {
            skills_root: PathBuf::new(),
            index: RwLock::new(SkillIndex::default()),
        }
    }

    pub fn skills_root(&self) -> &Path {
        &self.skills_root
    }

    pub fn list(&self) -> Vec<SkillRecord> {
        self.index.read().skills.clone()
    }

    /// Score every skill against the prompt (§ suggestion threshold and
    /// above, capped, best first).
    pub fn match_prompt(
        &self,
        prompt: &str,
        config: &SkillsConfig,
        today: NaiveDate,
    ) -> Vec<ScoredSkill> {
        matcher::match_skills(prompt, &self.index.read().skills, config, today)
    }
}
