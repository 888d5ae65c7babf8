//! Skill manifest parsed from SKILL.md YAML frontmatter.
//!
//! The frontmatter is a YAML block delimited by `---` at the top of the
//! file:
//!
//! ```yaml
//! ---
//! name: hono-bun-sqlite-api
//! description: REST API with Hono, Bun and SQLite
//! category: setup
//! tags: [hono, bun, sqlite, api, rest]
//! ---
//! ```
//!
//! It is the fallback source of registry metadata when a skill directory
//! has no `metadata.json` yet.

use serde::Deserialize;

use crate::types::SkillRecord;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Frontmatter {
    /// Synthesize a fresh registry record; counters start at zero.
    pub fn into_record(self, fallback_name: &str) -> SkillRecord {
        let mut record = SkillRecord::new(
            self.name.unwrap_or_else(|| fallback_name.to_owned()),
        );
        record.summary = self.description.unwrap_or_default();
        record.category = self.category.unwrap_or_default();
        record.tags = self.tags;
        record.dependencies = self.dependencies;
        if let Some(version) = self.version {
            record.version = version;
        }
        record
    }
}

/// Split a SKILL.md into parsed frontmatter and body.
///
/// Returns `(None, full_text)` when there is no frontmatter block or the
/// YAML does not parse.
pub fn parse_frontmatter(content: &str) -> (Option<Frontmatter>, &str) {
    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };
    let Some(end) = rest.find("\n---") else {
        return (None, content);
    };
    let yaml = &rest[..end];
    let body = rest[end + 4..].trim_start_matches('\n');

    match serde_yaml::from_str::<Frontmatter>(yaml) {
        Ok(fm) => (Some(fm), body),
        Err(e) => {
            tracing::debug!(error = %e, "unparsable SKILL.md frontmatter");
            (None, content)
        }
    }
}

/// Validates a skill name: `^[a-z0-9]+(-[a-z0-9]+)*$`.
pub fn is_valid_skill_name(name: &str) -> bool {
    if name.is_empty() || name.starts_with('-') || name.ends_with('-') {
        return false;
    }
    let mut prev_dash = false;
    for ch in name.chars() {
        if ch == '-' {
            if prev_dash {
                return false;
            }
            prev_dash = true;
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            prev_dash = false;
        } else {
            return false;
        }
    }
    true
}
