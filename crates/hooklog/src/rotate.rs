//! Size-bounded log rotation.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

/// Append-only log file that rotates on size.
///
/// When a write would push the current file past `max_bytes`, the file is
/// renamed to `.1`, existing siblings shift up (`.1` → `.2`, …), and the
/// oldest past `retention` drops off.  Rotation and writes are both
/// best-effort: any I/O failure is swallowed and reported as success so the
/// caller can never fail on logging.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    retention: usize,
    file: Option<File>,
    written: u64,
}

impl RotatingFile {
    pub fn new(path: PathBuf, max_bytes: u64, retention: usize) -> Self {
        Self {
            path,
            max_bytes,
            retention,
            file: None,
            written: 0,
        }
    }

    fn sibling(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn open(&mut self) -> Option<&mut File> {
        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .ok()?;
            self.written = file.metadata().map(|m| m.len()).unwrap_or(0);
            self.file = Some(file);
        }
        self.file.as_mut()
    }

    /// Shift rotated siblings up and move the current file to `.1`.
    fn rotate(&mut self) {
        self.file = None;
        self.written = 0;

        for n in (1..self.retention).rev() {
            let _ = std::fs::rename(self.sibling(n), self.sibling(n + 1));
        }
        let _ = std::fs::rename(&self.path, self.sibling(1));
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.file.is_none() {
            // Learn the on-disk size before the first rotation check.
            let _ = self.open();
        }
        if self.written.saturating_add(buf.len() as u64) > self.max_bytes {
            self.rotate();
        }
        if let Some(file) = self.open() {
            if file.write_all(buf).is_ok() {
                self.written += buf.len() as u64;
            }
        }
        // Logging failures never surface.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = self.file.as_mut() {
            let _ = file.flush();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_line(f: &mut RotatingFile, len: usize) {
        let line = "x".repeat(len - 1) + "\n";
        f.write_all(line.as_bytes()).unwrap();
    }

    #[test]
    fn rotates_past_max_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hook.log");
        let mut f = RotatingFile::new(path.clone(), 100, 3);

        write_line(&mut f, 80);
        write_line(&mut f, 80); // would exceed 100 — rotates first
        assert!(path.exists());
        assert!(dir.path().join("hook.log.1").exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap().len(), 80);
    }

    #[test]
    fn retention_bounds_sibling_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hook.log");
        let mut f = RotatingFile::new(path.clone(), 50, 2);

        for _ in 0..6 {
            write_line(&mut f, 40);
        }
        assert!(dir.path().join("hook.log.1").exists());
        assert!(dir.path().join("hook.log.2").exists());
        assert!(!dir.path().join("hook.log.3").exists());
    }

    #[test]
    fn unwritable_path_is_silent() {
        let mut f = RotatingFile::new(
            PathBuf::from("/nonexistent-dir/nope/hook.log"),
            100,
            3,
        );
        // Swallowed: still reports the buffer as written.
        assert_eq!(f.write(b"hello").unwrap(), 5);
        assert!(f.flush().is_ok());
    }

    #[test]
    fn shifts_existing_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hook.log");
        std::fs::write(dir.path().join("hook.log.1"), "old-1").unwrap();
        let mut f = RotatingFile::new(path.clone(), 10, 3);

        write_line(&mut f, 8);
        write_line(&mut f, 8); // rotate: .1 -> .2, current -> .1
        assert_eq!(
            std::fs::read_to_string(dir.path().join("hook.log.2")).unwrap(),
            "old-1"
        );
    }
}
