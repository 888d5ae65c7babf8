//! Fixed-size chunking with clean-boundary backoff and overlap.

use super::{Chunk, ChunkAccumulator, ChunkOptions};

/// Split preference order: paragraph, line, sentence, word.
const BOUNDARIES: [&str; 4] = ["\n\n", "\n", ". ", " "];

pub(super) fn chunk_by_size(text: &str, opts: &ChunkOptions) -> Vec<Chunk> {
    chunk_slice(text, opts.chunk_size, opts.overlap, opts.boundary_lookback)
}

/// Size-chunk an arbitrary slice; also used by the header and code
/// strategies to sub-chunk oversized sections (with zero overlap there).
pub(super) fn chunk_slice(
    text: &str,
    chunk_size: usize,
    overlap: usize,
    lookback: usize,
) -> Vec<Chunk> {
    let mut acc = ChunkAccumulator::new();
    if text.is_empty() {
        return acc.finish();
    }

    let mut start = 0usize;
    let mut overlap_chars = 0usize;
    loop {
        let end = chunk_end(text, start, chunk_size, lookback);
        acc.push(&text[start..end], overlap_chars, None, None, Vec::new());
        if end >= text.len() {
            break;
        }

        // Carry `overlap` bytes back into the next chunk, but always move
        // forward.
        let mut next = floor_boundary(text, end.saturating_sub(overlap));
        if next <= start {
            next = ceil_boundary(text, start + 1).min(end);
        }
        overlap_chars = text[next..end].chars().count();
        start = next;
    }
    acc.finish()
}

/// Pick the end of a chunk starting at `start`: the size limit, backed off
/// to the nearest preceding clean boundary within `lookback` bytes.  The
/// separator stays with the left chunk.
fn chunk_end(text: &str, start: usize, chunk_size: usize, lookback: usize) -> usize {
    let raw_end = floor_boundary(text, start.saturating_add(chunk_size).min(text.len()));
    if raw_end >= text.len() {
        return text.len();
    }
    if raw_end <= start {
        return ceil_boundary(text, start + 1);
    }

    let window_start =
        ceil_boundary(text, raw_end.saturating_sub(lookback).max(start + 1)).min(raw_end);
    let window = &text[window_start..raw_end];

    for boundary in BOUNDARIES {
        if let Some(pos) = window.rfind(boundary) {
            return window_start + pos + boundary.len();
        }
    }
    raw_end
}

fn floor_boundary(text: &str, mut i: usize) -> usize {
    if i >= text.len() {
        return text.len();
    }
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_boundary(text: &str, mut i: usize) -> usize {
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i.min(text.len())
}
