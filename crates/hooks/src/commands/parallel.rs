use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tl_domain::config::Config;
use tl_rlm::manifest::Manifest;
use tl_rlm::parallel::{build_parallel_config, write_parallel_config};

use super::fail;

pub fn parallel_process(
    manifest_path: &Path,
    query: &str,
    batch_size: Option<usize>,
    output: Option<PathBuf>,
    save_prompts: bool,
    config: &Config,
) -> ExitCode {
    let manifest = match Manifest::load(manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => return fail(e),
    };
    let manifest_dir = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let output_dir = output.unwrap_or_else(|| manifest_dir.clone());

    let parallel = build_parallel_config(
        &manifest,
        &manifest_dir,
        query,
        batch_size.unwrap_or(config.rlm.batch_size),
        &output_dir,
    );
    match write_parallel_config(&parallel, &output_dir, save_prompts) {
        Ok(path) => {
            println!(
                "{} batches configured in {}",
                parallel.total_batches,
                path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
