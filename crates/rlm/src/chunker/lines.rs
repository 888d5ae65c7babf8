//! Fixed line-count chunking with overlap in lines.

use super::{Chunk, ChunkAccumulator, ChunkOptions};

pub(super) fn chunk_by_lines(text: &str, opts: &ChunkOptions) -> Vec<Chunk> {
    let mut acc = ChunkAccumulator::new();
    if text.is_empty() {
        return acc.finish();
    }

    // Keep terminators so concatenation reconstructs the source.
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let per_chunk = opts.lines_per_chunk.max(1);
    let overlap = opts.line_overlap.min(per_chunk - 1);

    let mut start = 0usize;
    let mut overlap_chars = 0usize;
    while start < lines.len() {
        let end = (start + per_chunk).min(lines.len());
        let chunk: String = lines[start..end].concat();
        acc.push(&chunk, overlap_chars, None, None, Vec::new());
        if end >= lines.len() {
            break;
        }

        let next = end - overlap;
        overlap_chars = lines[next..end].concat().chars().count();
        start = next;
    }
    acc.finish()
}
