//! Chunk files and the run manifest.
//!
//! Chunk files are written first, the manifest last — a run killed partway
//! leaves complete chunk files and no manifest, never a manifest pointing
//! at missing chunks.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tl_domain::error::{Error, Result};
use tl_domain::trace::TraceEvent;

use crate::chunker::{Chunk, ChunkMeta, Strategy};
use crate::progress::ChunkProgress;

pub const MANIFEST_FILE: &str = "manifest.json";

/// One chunk as listed in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Chunk filename relative to the manifest's directory.
    pub file: String,
    /// Size of the chunk file in bytes.
    pub size: usize,
    #[serde(flatten)]
    pub meta: ChunkMeta,
}

/// The run manifest (`manifest.json` in the output directory).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub source_file: String,
    pub strategy: Strategy,
    pub total_chunks: usize,
    pub chunks: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Chunk(format!("reading manifest {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Chunk(format!("parsing manifest {}: {e}", path.display())))
    }
}

/// Write chunk files plus the manifest into `out_dir`.
pub fn write_chunks(
    chunks: &[Chunk],
    out_dir: &Path,
    source_file: &Path,
    strategy: Strategy,
    progress: &ChunkProgress,
) -> Result<Manifest> {
    std::fs::create_dir_all(out_dir)?;

    let mut entries = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let file = chunk_filename(chunk.meta.chunk_num);
        std::fs::write(out_dir.join(&file), &chunk.text)?;
        progress.chunk_written(&file);
        entries.push(ManifestEntry {
            file,
            size: chunk.text.len(),
            meta: chunk.meta.clone(),
        });
    }

    let manifest = Manifest {
        source_file: source_file.to_string_lossy().into_owned(),
        strategy,
        total_chunks: entries.len(),
        chunks: entries,
    };
    let json = serde_json::to_vec_pretty(&manifest)?;
    std::fs::write(out_dir.join(MANIFEST_FILE), json)?;
    progress.done();

    TraceEvent::ChunksWritten {
        source_file: manifest.source_file.clone(),
        total_chunks: manifest.total_chunks,
        strategy: strategy.as_str().to_owned(),
    }
    .emit();

    Ok(manifest)
}

/// Re-load chunk texts through a manifest, in chunk order.
pub fn load_chunks(manifest: &Manifest, manifest_dir: &Path) -> Result<Vec<Chunk>> {
    let mut chunks = Vec::with_capacity(manifest.chunks.len());
    for entry in &manifest.chunks {
        let text = std::fs::read_to_string(manifest_dir.join(&entry.file))
            .map_err(|e| Error::Chunk(format!("reading chunk {}: {e}", entry.file)))?;
        chunks.push(Chunk {
            text,
            meta: entry.meta.clone(),
        });
    }
    Ok(chunks)
}

fn chunk_filename(chunk_num: usize) -> String {
    format!("chunk_{chunk_num:03}.txt")
}

/// Absolute path of a manifest entry's chunk file.
pub fn chunk_path(manifest_dir: &Path, entry: &ManifestEntry) -> PathBuf {
    manifest_dir.join(&entry.file)
}
