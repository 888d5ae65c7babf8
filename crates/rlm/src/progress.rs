//! Single-line chunking progress bar.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporting for a chunk run; hidden unless `--progress` was
/// passed.
pub struct ChunkProgress {
    bar: ProgressBar,
}

impl ChunkProgress {
    pub fn new(total_chunks: u64) -> Self {
        let bar = ProgressBar::new(total_chunks);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("progress template")
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    pub fn disabled() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn chunk_written(&self, filename: &str) {
        self.bar.set_message(filename.to_owned());
        self.bar.inc(1);
    }

    pub fn done(&self) {
        self.bar.finish_and_clear();
    }
}
