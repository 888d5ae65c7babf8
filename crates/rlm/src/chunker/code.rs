//! Language-aware code chunking.
//!
//! Language detection is a closed set of substring indicators; boundaries
//! are anchored per-language regexes over definition starts.  Chunks grow
//! greedily over whole definitions until the size cap, so concatenation
//! reconstructs the source exactly.  Unknown languages fall back to the
//! size strategy.

use std::sync::LazyLock;

use regex::Regex;

use super::{size, Chunk, ChunkAccumulator, ChunkOptions};

/// Substring indicators, checked per language in listed order; the highest
/// hit count wins, ties prefer the earlier entry.
const LANGUAGE_INDICATORS: &[(&str, &[&str])] = &[
    ("rust", &["use std::", "impl ", "fn ", "pub fn ", "let mut "]),
    ("go", &["func ", "package ", ":= ", " struct {"]),
    (
        "typescript",
        &["interface ", ": string", ": number", "export type ", "export const "],
    ),
    ("python", &["def ", "class ", "import ", "self."]),
    (
        "javascript",
        &["function ", "const ", "=> ", "module.exports"],
    ),
];

static BOUNDARY_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        (
            "rust",
            r"(?m)^(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?(?:fn|struct|enum|trait|impl|mod)\s+(\w+)",
        ),
        (
            "go",
            r"(?m)^(?:func\s+(?:\([^)]*\)\s*)?(\w+)|type\s+(\w+))",
        ),
        (
            "typescript",
            r"(?m)^(?:export\s+)?(?:(?:async\s+)?function\s+(\w+)|(?:abstract\s+)?class\s+(\w+)|interface\s+(\w+)|type\s+(\w+)|enum\s+(\w+)|const\s+(\w+)\s*=)",
        ),
        (
            "python",
            r"(?m)^(?:async\s+)?(?:def\s+(\w+)|class\s+(\w+))",
        ),
        (
            "javascript",
            r"(?m)^(?:export\s+)?(?:(?:async\s+)?function\s+(\w+)|class\s+(\w+)|const\s+(\w+)\s*=)",
        ),
    ]
    .into_iter()
    .map(|(lang, pattern)| (lang, Regex::new(pattern).expect("boundary pattern")))
    .collect()
});

/// Detect the dominant language from the indicator set.
pub fn detect_language(text: &str) -> Option<&'static str> {
    let mut best: Option<(&'static str, usize)> = None;
    for (language, indicators) in LANGUAGE_INDICATORS {
        let hits: usize = indicators
            .iter()
            .map(|needle| text.matches(needle).count())
            .sum();
        if hits == 0 {
            continue;
        }
        match best {
            Some((_, best_hits)) if hits <= best_hits => {}
            _ => best = Some((language, hits)),
        }
    }
    best.map(|(language, _)| language)
}

pub(super) fn chunk_by_code(text: &str, opts: &ChunkOptions) -> Vec<Chunk> {
    if text.is_empty() {
        return Vec::new();
    }

    let language = opts
        .language
        .as_deref()
        .or_else(|| detect_language(text));
    let Some(language) = language else {
        // Unknown language: size strategy, no overlap, tagged "unknown".
        return tag_language(
            size::chunk_slice(text, opts.chunk_size, 0, opts.boundary_lookback),
            "unknown",
        );
    };
    let Some((_, pattern)) = BOUNDARY_PATTERNS.iter().find(|(name, _)| *name == language)
    else {
        return tag_language(
            size::chunk_slice(text, opts.chunk_size, 0, opts.boundary_lookback),
            language,
        );
    };

    // Definition starts partition the file; the preamble (imports, file
    // comments) rides with the first definition.
    let mut starts: Vec<usize> = pattern.find_iter(text).map(|m| m.start()).collect();
    starts.retain(|&s| s > 0);
    starts.dedup();

    let mut sections: Vec<&str> = Vec::new();
    let mut prev = 0;
    for &start in &starts {
        sections.push(&text[prev..start]);
        prev = start;
    }
    sections.push(&text[prev..]);

    let mut acc = ChunkAccumulator::new();
    let mut current = String::new();
    for section in sections {
        if !current.is_empty() && current.len() + section.len() > opts.max_chunk_size {
            push_code_chunk(&mut acc, &current, language, pattern, opts);
            current.clear();
        }
        current.push_str(section);
    }
    if !current.is_empty() {
        push_code_chunk(&mut acc, &current, language, pattern, opts);
    }
    acc.finish()
}

/// Emit one greedy chunk, sub-chunking if a single definition blew the cap.
fn push_code_chunk(
    acc: &mut ChunkAccumulator,
    chunk: &str,
    language: &str,
    pattern: &Regex,
    opts: &ChunkOptions,
) {
    if chunk.len() <= opts.max_chunk_size {
        acc.push(
            chunk,
            0,
            None,
            Some(language.to_owned()),
            entities_in(chunk, pattern),
        );
        return;
    }
    for piece in size::chunk_slice(chunk, opts.chunk_size, 0, opts.boundary_lookback) {
        acc.push(
            &piece.text,
            0,
            None,
            Some(language.to_owned()),
            entities_in(&piece.text, pattern),
        );
    }
}

/// Captured definition names within a chunk, in order, deduplicated.
fn entities_in(chunk: &str, pattern: &Regex) -> Vec<String> {
    let mut entities = Vec::new();
    for captures in pattern.captures_iter(chunk) {
        if let Some(name) = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str().to_owned())
            .next()
        {
            if !entities.contains(&name) {
                entities.push(name);
            }
        }
    }
    entities
}

fn tag_language(chunks: Vec<Chunk>, language: &str) -> Vec<Chunk> {
    chunks
        .into_iter()
        .map(|mut chunk| {
            chunk.meta.language = Some(language.to_owned());
            chunk
        })
        .collect()
}
