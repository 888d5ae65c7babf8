//! Markdown header chunking.
//!
//! Split at every header line; a section keeps its header line and carries
//! the header text in metadata.  Sections above `max_chunk_size` are
//! sub-chunked with the size strategy (no overlap, so reconstruction stays
//! exact).

use super::{size, Chunk, ChunkAccumulator, ChunkOptions};

pub(super) fn chunk_by_headers(text: &str, opts: &ChunkOptions) -> Vec<Chunk> {
    let mut acc = ChunkAccumulator::new();
    if text.is_empty() {
        return acc.finish();
    }

    for section in split_sections(text) {
        let header = section_header(section).map(str::to_owned);
        if section.len() <= opts.max_chunk_size {
            acc.push(section, 0, header, None, Vec::new());
            continue;
        }
        for piece in size::chunk_slice(section, opts.chunk_size, 0, opts.boundary_lookback) {
            acc.push(&piece.text, 0, header.clone(), None, Vec::new());
        }
    }
    acc.finish()
}

/// Split into the preamble (if any) and one slice per header-led section.
fn split_sections(text: &str) -> Vec<&str> {
    let mut starts: Vec<usize> = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if is_header_line(line) {
            starts.push(offset);
        }
        offset += line.len();
    }

    if starts.is_empty() {
        return vec![text];
    }

    let mut sections = Vec::new();
    if starts[0] > 0 {
        sections.push(&text[..starts[0]]);
    }
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        sections.push(&text[start..end]);
    }
    sections
}

fn is_header_line(line: &str) -> bool {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    (1..=6).contains(&hashes) && line.as_bytes().get(hashes) == Some(&b' ')
}

/// The header text (without the `#` markers) of a section, if it starts
/// with one.
fn section_header(section: &str) -> Option<&str> {
    let first_line = section.lines().next()?;
    if !is_header_line(first_line) {
        return None;
    }
    Some(first_line.trim_start_matches('#').trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(max_chunk_size: usize) -> ChunkOptions {
        ChunkOptions {
            chunk_size: max_chunk_size / 2,
            overlap: 0,
            max_chunk_size,
            lines_per_chunk: 100,
            line_overlap: 0,
            boundary_lookback: 100,
            language: None,
        }
    }

    const DOC: &str = "\
intro before any header
# One
first section body
## One point one
nested body
# Two
second section body
";

    #[test]
    fn splits_at_every_header() {
        let chunks = chunk_by_headers(DOC, &opts(1000));
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].meta.header, None);
        assert_eq!(chunks[1].meta.header.as_deref(), Some("One"));
        assert_eq!(chunks[2].meta.header.as_deref(), Some("One point one"));
        assert_eq!(chunks[3].meta.header.as_deref(), Some("Two"));
    }

    #[test]
    fn concatenation_is_exact() {
        let chunks = chunk_by_headers(DOC, &opts(1000));
        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(joined, DOC);
    }

    #[test]
    fn oversized_section_is_sub_chunked_with_header_carried() {
        let doc = format!("# Big\n{}\n# Small\nend\n", "body line\n".repeat(40));
        let chunks = chunk_by_headers(&doc, &opts(100));
        assert!(chunks.len() > 3);
        let big_parts: Vec<_> = chunks
            .iter()
            .filter(|c| c.meta.header.as_deref() == Some("Big"))
            .collect();
        assert!(big_parts.len() > 1);

        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(joined, doc);
    }

    #[test]
    fn no_headers_is_one_chunk() {
        let chunks = chunk_by_headers("just prose\nno headers\n", &opts(1000));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].meta.header, None);
    }

    #[test]
    fn hash_without_space_is_not_a_header() {
        let doc = "#!/bin/sh\necho hi\n";
        let chunks = chunk_by_headers(doc, &opts(1000));
        assert_eq!(chunks.len(), 1);
    }
}
