//! Locating the current session's transcript on disk.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Sub-agent transcripts carry this marker in their path and are never
/// indexed or recovered — they belong to nested agent runs.
pub const SUBAGENT_MARKER: &str = "subagent";

/// The most recently modified `.jsonl` transcript across all project roots,
/// excluding sub-agent transcripts.  `None` when nothing is found.
pub fn find_current_session(projects_dir: &Path) -> Option<PathBuf> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for project in read_dirs(projects_dir) {
        for path in transcripts_in(&project) {
            let Ok(meta) = path.metadata() else { continue };
            let Ok(modified) = meta.modified() else { continue };
            let newer = match &newest {
                Some((best, best_path)) => {
                    modified > *best || (modified == *best && path < *best_path)
                }
                None => true,
            };
            if newer {
                newest = Some((modified, path));
            }
        }
    }

    newest.map(|(_, path)| path)
}

/// All candidate transcripts under one project directory, sorted by name.
pub fn transcripts_in(project_dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(project_dir) else {
        return Vec::new();
    };
    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("jsonl"))
        .filter(|p| !p.to_string_lossy().contains(SUBAGENT_MARKER))
        .collect();
    paths.sort();
    paths
}

/// Project directories under the transcripts root, sorted by name.
pub fn read_dirs(projects_dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(projects_dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs
}

/// The session ID is the transcript's file stem.
pub fn session_id_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_owned)
}

/// The project key is the transcript's parent directory name.
pub fn project_key_from_path(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_newest_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let proj = dir.path().join("-home-me-proj");
        fs::create_dir_all(&proj).unwrap();
        fs::write(proj.join("old.jsonl"), "{}\n").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(proj.join("new.jsonl"), "{}\n").unwrap();

        let found = find_current_session(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "new.jsonl");
    }

    #[test]
    fn skips_subagent_transcripts() {
        let dir = tempfile::tempdir().unwrap();
        let proj = dir.path().join("-proj");
        fs::create_dir_all(&proj).unwrap();
        fs::write(proj.join("main.jsonl"), "{}\n").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(proj.join("main-subagent-1.jsonl"), "{}\n").unwrap();

        let found = find_current_session(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "main.jsonl");
    }

    #[test]
    fn empty_root_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_current_session(dir.path()).is_none());
    }

    #[test]
    fn session_and_project_from_path() {
        let path = Path::new("/root/.claude/projects/-home-me-proj/abc-123.jsonl");
        assert_eq!(session_id_from_path(path).as_deref(), Some("abc-123"));
        assert_eq!(
            project_key_from_path(path).as_deref(),
            Some("-home-me-proj")
        );
    }

    #[test]
    fn non_jsonl_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let proj = dir.path().join("-proj");
        fs::create_dir_all(&proj).unwrap();
        fs::write(proj.join("notes.txt"), "x").unwrap();
        assert!(find_current_session(dir.path()).is_none());
    }
}
