//! Chunking strategies.
//!
//! Every strategy yields `(text, metadata)` pairs whose concatenation
//! reconstructs the source — exactly for the non-overlapping strategies,
//! modulo duplicated overlap regions for the size strategy with overlap.

mod code;
mod headers;
mod lines;
mod size;

pub use code::detect_language;

use serde::{Deserialize, Serialize};

use tl_domain::config::RlmConfig;
use tl_domain::error::{Error, Result};

/// How to split the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Size,
    Lines,
    Headers,
    Code,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Lines => "lines",
            Self::Headers => "headers",
            Self::Code => "code",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "size" => Ok(Self::Size),
            "lines" => Ok(Self::Lines),
            "headers" => Ok(Self::Headers),
            "code" => Ok(Self::Code),
            other => Err(Error::Chunk(format!("unknown strategy: {other}"))),
        }
    }
}

/// Per-chunk metadata recorded in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMeta {
    pub chunk_num: usize,
    /// Char offsets into the source (half-open).
    pub start_char: usize,
    pub end_char: usize,
    pub char_count: usize,
    pub line_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<String>,
}

/// One chunk: the text slice plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub meta: ChunkMeta,
}

/// Tunables for one chunking run.
#[derive(Debug, Clone)]
pub struct ChunkOptions {
    pub chunk_size: usize,
    pub overlap: usize,
    pub max_chunk_size: usize,
    pub lines_per_chunk: usize,
    pub line_overlap: usize,
    pub boundary_lookback: usize,
    /// Forced language for the code strategy; detected when `None`.
    pub language: Option<String>,
}

impl ChunkOptions {
    pub fn from_config(config: &RlmConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            overlap: config.overlap,
            max_chunk_size: config.max_chunk_size,
            lines_per_chunk: config.lines_per_chunk,
            line_overlap: config.line_overlap,
            boundary_lookback: config.boundary_lookback,
            language: None,
        }
    }
}

/// Split `text` with the chosen strategy.
pub fn chunk_text(text: &str, strategy: Strategy, opts: &ChunkOptions) -> Result<Vec<Chunk>> {
    if opts.chunk_size == 0 {
        return Err(Error::Chunk("chunk size must be greater than 0".into()));
    }
    if opts.overlap >= opts.chunk_size {
        return Err(Error::Chunk(format!(
            "overlap {} must be below chunk size {}",
            opts.overlap, opts.chunk_size
        )));
    }

    let chunks = match strategy {
        Strategy::Size => size::chunk_by_size(text, opts),
        Strategy::Lines => lines::chunk_by_lines(text, opts),
        Strategy::Headers => headers::chunk_by_headers(text, opts),
        Strategy::Code => code::chunk_by_code(text, opts),
    };
    Ok(chunks)
}

/// Builds `Chunk`s from in-order slices, tracking char offsets cumulatively.
pub(crate) struct ChunkAccumulator {
    chunks: Vec<Chunk>,
    char_cursor: usize,
}

impl ChunkAccumulator {
    pub(crate) fn new() -> Self {
        Self {
            chunks: Vec::new(),
            char_cursor: 0,
        }
    }

    /// Push the next in-order piece.  `overlap_chars` counts the leading
    /// chars duplicated from the previous chunk (zero for exact
    /// strategies).
    pub(crate) fn push(
        &mut self,
        text: &str,
        overlap_chars: usize,
        header: Option<String>,
        language: Option<String>,
        entities: Vec<String>,
    ) {
        let char_count = text.chars().count();
        let start_char = self.char_cursor - overlap_chars;
        let meta = ChunkMeta {
            chunk_num: self.chunks.len() + 1,
            start_char,
            end_char: start_char + char_count,
            char_count,
            line_count: text.lines().count(),
            header,
            language,
            entities,
        };
        self.char_cursor = start_char + char_count;
        self.chunks.push(Chunk {
            text: text.to_owned(),
            meta,
        });
    }

    pub(crate) fn finish(self) -> Vec<Chunk> {
        self.chunks
    }
}
