use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tl_domain::config::Config;
use tl_rlm::chunker::{chunk_text, ChunkOptions};
use tl_rlm::manifest::write_chunks;
use tl_rlm::progress::ChunkProgress;
use tl_rlm::Strategy;

use super::fail;

/// Default output directory under the project.
const DEFAULT_OUTPUT: &str = "rlm_context/chunks";

#[allow(clippy::too_many_arguments)]
pub fn chunk(
    file: &Path,
    size: Option<usize>,
    strategy: Strategy,
    overlap: Option<usize>,
    language: Option<String>,
    output: Option<PathBuf>,
    progress: bool,
    config: &Config,
) -> ExitCode {
    let text = match std::fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => return fail(format_args!("cannot read {}: {e}", file.display())),
    };

    let mut opts = ChunkOptions::from_config(&config.rlm);
    if let Some(size) = size {
        opts.chunk_size = size;
        opts.max_chunk_size = opts.max_chunk_size.max(size);
    }
    if let Some(overlap) = overlap {
        opts.overlap = overlap;
    }
    opts.language = language;

    let chunks = match chunk_text(&text, strategy, &opts) {
        Ok(chunks) => chunks,
        Err(e) => return fail(e),
    };

    let out_dir = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let bar = if progress {
        ChunkProgress::new(chunks.len() as u64)
    } else {
        ChunkProgress::disabled()
    };
    match write_chunks(&chunks, &out_dir, file, strategy, &bar) {
        Ok(manifest) => {
            println!(
                "{} chunks written to {} (strategy: {})",
                manifest.total_chunks,
                out_dir.display(),
                strategy,
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
