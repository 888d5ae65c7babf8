//! Source-file probing: size profile, structure detection, and a chunking
//! recommendation.

use std::path::{Path, PathBuf};

use serde::Serialize;

use tl_domain::config::RlmConfig;
use tl_domain::error::Result;
use tl_domain::text::format_thousands;

use crate::chunker::{detect_language, Strategy};

/// Token estimate divisor (rough chars-per-token).
const CHARS_PER_TOKEN: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct StructureProfile {
    pub has_headers: bool,
    pub has_code_blocks: bool,
    pub has_functions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub strategy: Strategy,
    pub estimated_chunks: usize,
    pub chunk_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileProbe {
    pub file: PathBuf,
    pub char_count: usize,
    pub line_count: usize,
    pub word_count: usize,
    pub token_estimate: usize,
    pub structure: StructureProfile,
    pub recommendation: Recommendation,
}

pub fn probe_file(path: &Path, config: &RlmConfig) -> Result<FileProbe> {
    let text = std::fs::read_to_string(path)?;
    Ok(probe_text(&text, path, config))
}

pub fn probe_text(text: &str, path: &Path, config: &RlmConfig) -> FileProbe {
    let char_count = text.chars().count();
    let line_count = text.lines().count();
    let word_count = text.split_whitespace().count();

    let has_headers = text.lines().any(is_markdown_header);
    let has_code_blocks = text.contains("```");
    let language = detect_language(text);
    let has_functions = language.is_some();

    // Headers beat code beats plain size.
    let strategy = if has_headers {
        Strategy::Headers
    } else if has_functions {
        Strategy::Code
    } else {
        Strategy::Size
    };

    let chunk_size = config.chunk_size;
    let estimated_chunks = char_count.div_ceil(chunk_size).max(1);

    FileProbe {
        file: path.to_path_buf(),
        char_count,
        line_count,
        word_count,
        token_estimate: char_count / CHARS_PER_TOKEN,
        structure: StructureProfile {
            has_headers,
            has_code_blocks,
            has_functions,
            language: language.map(str::to_owned),
        },
        recommendation: Recommendation {
            strategy,
            estimated_chunks,
            chunk_size,
        },
    }
}

impl FileProbe {
    /// Human-readable report for the CLI (without `--json`).
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("File: {}\n", self.file.display()));
        out.push_str(&format!(
            "Characters: {}  Lines: {}  Words: {}\n",
            format_thousands(self.char_count),
            format_thousands(self.line_count),
            format_thousands(self.word_count),
        ));
        out.push_str(&format!(
            "Estimated tokens: ~{}\n",
            format_thousands(self.token_estimate)
        ));
        out.push_str(&format!(
            "Structure: headers={} code_blocks={} functions={}",
            self.structure.has_headers,
            self.structure.has_code_blocks,
            self.structure.has_functions,
        ));
        if let Some(language) = &self.structure.language {
            out.push_str(&format!(" language={language}"));
        }
        out.push('\n');
        out.push_str(&format!(
            "Recommendation: --strategy {} --size {} (~{} chunks)\n",
            self.recommendation.strategy,
            self.recommendation.chunk_size,
            self.recommendation.estimated_chunks,
        ));
        out
    }
}

fn is_markdown_header(line: &str) -> bool {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    (1..=6).contains(&hashes) && line.as_bytes().get(hashes) == Some(&b' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(text: &str) -> FileProbe {
        probe_text(text, Path::new("input.txt"), &RlmConfig::default())
    }

    #[test]
    fn counts_are_correct() {
        let p = probe("one two\nthree four five\n");
        assert_eq!(p.line_count, 2);
        assert_eq!(p.word_count, 5);
        assert_eq!(p.char_count, 24);
        assert_eq!(p.token_estimate, 6);
    }

    #[test]
    fn markdown_recommends_headers() {
        let p = probe("# Title\n\nbody text\n\n## Section\nmore\n");
        assert!(p.structure.has_headers);
        assert_eq!(p.recommendation.strategy, Strategy::Headers);
    }

    #[test]
    fn code_recommends_code() {
        let p = probe("use std::fmt;\n\nfn main() {\n    let mut x = 1;\n}\n");
        assert!(p.structure.has_functions);
        assert!(!p.structure.has_headers);
        assert_eq!(p.recommendation.strategy, Strategy::Code);
        assert_eq!(p.structure.language.as_deref(), Some("rust"));
    }

    #[test]
    fn plain_text_recommends_size() {
        let p = probe("just a lot of prose without structure at all\n");
        assert_eq!(p.recommendation.strategy, Strategy::Size);
    }

    #[test]
    fn headers_win_over_code() {
        let p = probe("# Doc\n\n```rust\nfn main() {}\n```\n");
        assert!(p.structure.has_code_blocks);
        assert_eq!(p.recommendation.strategy, Strategy::Headers);
    }

    #[test]
    fn estimated_chunks_round_up() {
        let text = "x".repeat(45_000);
        let p = probe(&text);
        // 45,000 / 20,000 rounds up to 3.
        assert_eq!(p.recommendation.estimated_chunks, 3);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(probe_file(Path::new("/no/such/file.txt"), &RlmConfig::default()).is_err());
    }

    #[test]
    fn render_mentions_recommendation() {
        let report = probe("# Doc\nbody\n").render();
        assert!(report.contains("--strategy headers"));
        assert!(report.contains("Estimated tokens"));
    }
}
