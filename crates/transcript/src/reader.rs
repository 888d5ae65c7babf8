//! Tolerant JSONL transcript reading.
//!
//! The host may be appending while we read, so the tail can hold a partial
//! line and any line can be malformed.  Malformed lines are skipped
//! silently; they still occupy a line index so segment ranges stay aligned
//! with the file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tl_domain::error::Result;

use crate::message::TranscriptRecord;

pub struct TranscriptReader {
    path: PathBuf,
}

impl TranscriptReader {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every line in order, parsed where possible.
    ///
    /// Yields `(line_index, record)` with `None` for blank, malformed, or
    /// partially-written lines.
    pub fn raw_records(
        &self,
    ) -> Result<impl Iterator<Item = (usize, Option<TranscriptRecord>)>> {
        let file = File::open(&self.path)?;
        Ok(RawRecords {
            reader: BufReader::new(file),
            line_index: 0,
        })
    }

    /// Only the lines that parsed, with their original indices.
    pub fn records(&self) -> Result<impl Iterator<Item = (usize, TranscriptRecord)>> {
        Ok(self
            .raw_records()?
            .filter_map(|(i, record)| record.map(|r| (i, r))))
    }

    /// Total number of lines currently in the file.
    pub fn line_count(&self) -> Result<usize> {
        Ok(self.raw_records()?.count())
    }
}

struct RawRecords {
    reader: BufReader<File>,
    line_index: usize,
}

impl Iterator for RawRecords {
    type Item = (usize, Option<TranscriptRecord>);

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        let read = self.reader.read_until(b'\n', &mut buf).ok()?;
        if read == 0 {
            return None;
        }

        let index = self.line_index;
        self.line_index += 1;

        // Decode with replacement so one bad byte cannot poison the line.
        let line = String::from_utf8_lossy(&buf);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Some((index, None));
        }

        match serde_json::from_str::<TranscriptRecord>(trimmed) {
            Ok(record) => Some((index, Some(record))),
            Err(_) => Some((index, None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_transcript(lines: &[&str]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        let mut f = File::create(&path).unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
        (dir, path)
    }

    #[test]
    fn reads_records_in_order() {
        let (_dir, path) = write_transcript(&[
            r#"{"type":"user","message":{"content":"one"}}"#,
            r#"{"type":"assistant","message":{"content":[{"type":"text","text":"two"}]}}"#,
        ]);
        let records: Vec<_> = TranscriptReader::open(&path).records().unwrap().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 0);
        assert!(records[0].1.is_user());
        assert_eq!(records[1].0, 1);
        assert!(records[1].1.is_assistant());
    }

    #[test]
    fn malformed_lines_keep_their_index() {
        let (_dir, path) = write_transcript(&[
            r#"{"type":"user","message":{"content":"one"}}"#,
            r#"{"broken"#,
            "",
            r#"{"type":"user","message":{"content":"two"}}"#,
        ]);
        let reader = TranscriptReader::open(&path);
        assert_eq!(reader.line_count().unwrap(), 4);
        let records: Vec<_> = reader.records().unwrap().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].0, 3);
    }

    #[test]
    fn partial_trailing_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        let mut f = File::create(&path).unwrap();
        writeln!(f, r#"{{"type":"user","message":{{"content":"done"}}}}"#).unwrap();
        // Mid-write tail with no terminating newline.
        write!(f, r#"{{"type":"assi"#).unwrap();

        let records: Vec<_> = TranscriptReader::open(&path).records().unwrap().collect();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        std::fs::write(&path, b"\xff\xfe\n{\"type\":\"summary\"}\n").unwrap();
        let reader = TranscriptReader::open(&path);
        assert_eq!(reader.line_count().unwrap(), 2);
        assert_eq!(reader.records().unwrap().count(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let reader = TranscriptReader::open("/definitely/not/here.jsonl");
        assert!(reader.records().is_err());
    }
}
