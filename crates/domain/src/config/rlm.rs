use serde::{Deserialize, Serialize};

/// RLM pipeline defaults (probe recommendations, chunking, batching).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RlmConfig {
    /// Target characters per chunk for the size strategy.
    #[serde(default = "d_chunk_size")]
    pub chunk_size: usize,
    /// Overlap carried between consecutive size-strategy chunks.
    #[serde(default = "d_overlap")]
    pub overlap: usize,
    /// Header/code sections above this get sub-chunked.
    #[serde(default = "d_max_chunk_size")]
    pub max_chunk_size: usize,
    /// Lines per chunk for the lines strategy.
    #[serde(default = "d_lines_per_chunk")]
    pub lines_per_chunk: usize,
    /// Overlap in lines for the lines strategy.
    #[serde(default = "d_line_overlap")]
    pub line_overlap: usize,
    /// How far back to search for a clean split point.
    #[serde(default = "d_boundary_lookback")]
    pub boundary_lookback: usize,
    /// Chunks per batch for the parallel coordinator.
    #[serde(default = "d_batch_size")]
    pub batch_size: usize,
    /// Per-file content cap in text aggregates.
    #[serde(default = "d_aggregate_file_cap")]
    pub aggregate_file_cap: usize,
}

impl Default for RlmConfig {
    fn default() -> Self {
        Self {
            chunk_size: d_chunk_size(),
            overlap: d_overlap(),
            max_chunk_size: d_max_chunk_size(),
            lines_per_chunk: d_lines_per_chunk(),
            line_overlap: d_line_overlap(),
            boundary_lookback: d_boundary_lookback(),
            batch_size: d_batch_size(),
            aggregate_file_cap: d_aggregate_file_cap(),
        }
    }
}

fn d_chunk_size() -> usize {
    20_000
}

fn d_overlap() -> usize {
    500
}

fn d_max_chunk_size() -> usize {
    30_000
}

fn d_lines_per_chunk() -> usize {
    500
}

fn d_line_overlap() -> usize {
    10
}

fn d_boundary_lookback() -> usize {
    1000
}

fn d_batch_size() -> usize {
    4
}

fn d_aggregate_file_cap() -> usize {
    5000
}
