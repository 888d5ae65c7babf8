//! Parallel-processing coordinator.
//!
//! Generates configuration only: chunks are partitioned into batches, each
//! with a ready-to-use prompt and an expected output path.  Spawning the
//! actual workers is the host assistant's job.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tl_domain::error::Result;
use tl_domain::trace::TraceEvent;

use crate::manifest::{chunk_path, Manifest};

pub const PARALLEL_CONFIG_FILE: &str = "parallel_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub batch_num: usize,
    pub chunk_files: Vec<String>,
    pub chunk_paths: Vec<PathBuf>,
    pub prompt: String,
    pub output_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Identifies one coordinator run in logs and result files.
    pub run_id: uuid::Uuid,
    pub source_file: String,
    pub query: String,
    pub batch_size: usize,
    pub total_batches: usize,
    pub batches: Vec<Batch>,
}

/// Partition the manifest's chunks into batches of `batch_size`.
pub fn build_parallel_config(
    manifest: &Manifest,
    manifest_dir: &Path,
    query: &str,
    batch_size: usize,
    output_dir: &Path,
) -> ParallelConfig {
    let batch_size = batch_size.max(1);
    let batches: Vec<Batch> = manifest
        .chunks
        .chunks(batch_size)
        .enumerate()
        .map(|(i, entries)| {
            let batch_num = i + 1;
            let chunk_files: Vec<String> =
                entries.iter().map(|entry| entry.file.clone()).collect();
            let chunk_paths: Vec<PathBuf> = entries
                .iter()
                .map(|entry| chunk_path(manifest_dir, entry))
                .collect();
            let output_file = output_dir.join(format!("batch_{batch_num}_result.md"));
            let prompt = render_prompt(query, &chunk_paths, &output_file);
            Batch {
                batch_num,
                chunk_files,
                chunk_paths,
                prompt,
                output_file,
            }
        })
        .collect();

    ParallelConfig {
        run_id: uuid::Uuid::new_v4(),
        source_file: manifest.source_file.clone(),
        query: query.to_owned(),
        batch_size,
        total_batches: batches.len(),
        batches,
    }
}

/// Write `parallel_config.json` (and one prompt file per batch when
/// `save_prompts` is set) into `output_dir`.
pub fn write_parallel_config(
    config: &ParallelConfig,
    output_dir: &Path,
    save_prompts: bool,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    if save_prompts {
        for batch in &config.batches {
            let path = output_dir.join(format!("batch_{}_prompt.md", batch.batch_num));
            std::fs::write(path, &batch.prompt)?;
        }
    }

    let path = output_dir.join(PARALLEL_CONFIG_FILE);
    let json = serde_json::to_vec_pretty(config)?;
    std::fs::write(&path, json)?;

    TraceEvent::ParallelConfigWritten {
        batches: config.total_batches,
    }
    .emit();

    Ok(path)
}

fn render_prompt(query: &str, chunk_paths: &[PathBuf], output_file: &Path) -> String {
    let file_list: String = chunk_paths
        .iter()
        .map(|path| format!("- {}\n", path.display()))
        .collect();
    format!(
        "Process the following document chunks and answer this query:\n\n\
         QUERY: {query}\n\n\
         CHUNKS:\n{file_list}\n\
         Read each chunk in full, extract everything relevant to the query, \
         and write your findings to:\n{}\n\n\
         Use `key: value` lines for structured findings so they survive \
         aggregation.",
        output_file.display()
    )
}
