//! The RLM document pipeline: probe → chunk → (external parallel
//! processing) → aggregate.
//!
//! Stand-alone utilities wired together by the host assistant through the
//! CLI.  Inputs larger than a context window are profiled, split with a
//! size-, line-, header-, or language-aware strategy, processed out of
//! band, and the per-chunk results folded back into one aggregate.

pub mod aggregate;
pub mod chunker;
pub mod manifest;
pub mod parallel;
pub mod probe;
pub mod progress;

pub use chunker::{chunk_text, Chunk, ChunkMeta, ChunkOptions, Strategy};
pub use manifest::{load_chunks, write_chunks, Manifest};
pub use probe::{probe_file, probe_text, FileProbe};
