//! The three project persistence files.
//!
//! `context.md` (goal), `todos.md` (tasks), `insights.md` (learnings) live
//! in the project directory, written by the assistant and read here.
//! Missing files are empty content, never errors.

use std::path::Path;

/// Goal / tasks / learnings filenames, in injection order.
pub const GOAL_FILE: &str = "context.md";
pub const TASKS_FILE: &str = "todos.md";
pub const LEARNINGS_FILE: &str = "insights.md";

/// Section headers whose `- [ ]` entries count as pending tasks.
const PENDING_HEADERS: [&str; 2] = ["## In Progress", "## Pending"];

/// Contents of the three persistence files (`None` = missing or empty).
#[derive(Debug, Clone, Default)]
pub struct PersistenceFiles {
    pub goal: Option<String>,
    pub tasks: Option<String>,
    pub learnings: Option<String>,
}

impl PersistenceFiles {
    pub fn read(project_dir: &Path) -> Self {
        Self {
            goal: read_non_empty(&project_dir.join(GOAL_FILE)),
            tasks: read_non_empty(&project_dir.join(TASKS_FILE)),
            learnings: read_non_empty(&project_dir.join(LEARNINGS_FILE)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.goal.is_none() && self.tasks.is_none() && self.learnings.is_none()
    }

    /// `(filename, content)` for each present file, in injection order.
    pub fn sections(&self) -> Vec<(&'static str, &str)> {
        [
            (GOAL_FILE, &self.goal),
            (TASKS_FILE, &self.tasks),
            (LEARNINGS_FILE, &self.learnings),
        ]
        .into_iter()
        .filter_map(|(name, content)| content.as_deref().map(|c| (name, c)))
        .collect()
    }

    /// Lowercased pending-task phrases from the tasks file.
    pub fn pending_tasks(&self) -> Vec<String> {
        self.tasks
            .as_deref()
            .map(extract_pending_tasks)
            .unwrap_or_default()
    }
}

fn read_non_empty(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    if content.trim().is_empty() {
        None
    } else {
        Some(content)
    }
}

/// `- [ ]` lines under `## In Progress` or `## Pending`, lowercased.
pub fn extract_pending_tasks(tasks_md: &str) -> Vec<String> {
    let mut pending = Vec::new();
    let mut in_pending_section = false;

    for line in tasks_md.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("##") {
            in_pending_section = PENDING_HEADERS
                .iter()
                .any(|header| trimmed.starts_with(header));
            continue;
        }
        if in_pending_section {
            if let Some(task) = trimmed.strip_prefix("- [ ]") {
                let task = task.trim();
                if !task.is_empty() {
                    pending.push(task.to_lowercase());
                }
            }
        }
    }
    pending
}
