//! Filesystem-backed skill registry.
//!
//! Each skill lives in `skills/<name>/` with a `SKILL.md` document and a
//! `metadata.json` carrying tags, summary, and usage counters.  A central
//! index under `skills/skill-index/index.json` caches the same records; the
//! tracker updates both in lockstep so they stay coherent.

pub mod frontmatter;
pub mod loader;
pub mod matcher;
pub mod registry;
pub mod tracker;
pub mod types;

pub use matcher::ScoredSkill;
pub use registry::SkillRegistry;
pub use types::{SkillIndex, SkillRecord};
