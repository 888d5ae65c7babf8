//! Filesystem layout under the assistant's user-scoped root.
//!
//! Everything this system persists lives under one root (conventionally
//! `~/.claude`): transcripts are read from `projects/<project-key>/`, segment
//! indices go to `sessions/<session-id>/`, the history index to `history/`,
//! skills to `skills/`, and hook logs to `hooks/logs/`.

use std::path::{Path, PathBuf};

/// Environment override for the assistant root.
pub const ROOT_ENV: &str = "CLAUDE_HOME";
/// Environment override for the project directory used by recovery.
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// Resolved filesystem layout for one invocation.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the root from `CLAUDE_HOME`, falling back to `~/.claude`.
    pub fn from_env() -> Self {
        let root = std::env::var_os(ROOT_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".claude")))
            .unwrap_or_else(|| PathBuf::from(".claude"));
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Host-owned transcript roots, one directory per project.
    pub fn projects_dir(&self) -> PathBuf {
        self.root.join("projects")
    }

    /// Transcript directory for one project key.
    pub fn project_transcripts(&self, project_key: &str) -> PathBuf {
        self.projects_dir().join(project_key)
    }

    /// Segment index owned by the live session indexer.
    pub fn segment_index_path(&self, session_id: &str) -> PathBuf {
        self.root
            .join("sessions")
            .join(session_id)
            .join("segments.json")
    }

    /// Global cross-session search index.
    pub fn history_index_path(&self) -> PathBuf {
        self.root.join("history").join("index.json")
    }

    pub fn skills_dir(&self) -> PathBuf {
        self.root.join("skills")
    }

    /// Central skill index file.
    pub fn skill_index_path(&self) -> PathBuf {
        self.skills_dir().join("skill-index").join("index.json")
    }

    /// Singleton carrying a detected learning moment to the next prompt.
    pub fn pending_learning_path(&self) -> PathBuf {
        self.root.join("pending-learning-moment.json")
    }

    pub fn hook_log_dir(&self) -> PathBuf {
        self.root.join("hooks").join("logs")
    }
}

/// Normalize an absolute path into the host's project-key form.
/// Convention: `/foo/bar` → `-foo-bar` — only `/` is replaced.
pub fn project_key(path: &Path) -> String {
    path.to_string_lossy().replace('/', "-")
}

/// Resolve the project directory for recovery: `CLAUDE_PROJECT_DIR` wins,
/// then the event payload's `cwd`, then the process working directory.
pub fn resolve_project_dir(payload_cwd: Option<&str>) -> PathBuf {
    if let Some(dir) = std::env::var_os(PROJECT_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    if let Some(cwd) = payload_cwd {
        if !cwd.is_empty() {
            return PathBuf::from(cwd);
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_key_replaces_slashes_only() {
        assert_eq!(project_key(Path::new("/foo/bar")), "-foo-bar");
        // Dots, underscores, and dashes key as-is; they are part of the
        // host's directory name.
        assert_eq!(project_key(Path::new("/home/me/my.proj")), "-home-me-my.proj");
        assert_eq!(project_key(Path::new("/home/me/my-app_v2")), "-home-me-my-app_v2");
    }

    #[test]
    fn layout_paths_are_rooted() {
        let layout = Layout::new("/tmp/claude");
        assert_eq!(
            layout.segment_index_path("abc"),
            PathBuf::from("/tmp/claude/sessions/abc/segments.json")
        );
        assert_eq!(
            layout.history_index_path(),
            PathBuf::from("/tmp/claude/history/index.json")
        );
        assert_eq!(
            layout.skill_index_path(),
            PathBuf::from("/tmp/claude/skills/skill-index/index.json")
        );
    }

    #[test]
    fn resolve_project_dir_prefers_payload_cwd() {
        // Env var interplay is left untested to keep tests hermetic; the
        // payload fallback is the common path.
        std::env::remove_var(PROJECT_DIR_ENV);
        let dir = resolve_project_dir(Some("/work/proj"));
        assert_eq!(dir, PathBuf::from("/work/proj"));
    }
}
