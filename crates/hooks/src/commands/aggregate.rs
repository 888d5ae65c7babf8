use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tl_domain::config::Config;
use tl_rlm::aggregate::{load_results, render_json, render_summary, render_text};

use super::fail;
use crate::cli::AggregateFormat;

pub fn aggregate(
    results_dir: &Path,
    pattern: Option<&str>,
    query: Option<&str>,
    format: AggregateFormat,
    output: Option<PathBuf>,
    config: &Config,
) -> ExitCode {
    let results = match load_results(results_dir, pattern) {
        Ok(results) => results,
        Err(e) => return fail(e),
    };

    let rendered = match format {
        AggregateFormat::Json => {
            let value = render_json(&results, results_dir);
            match serde_json::to_string_pretty(&value) {
                Ok(out) => out,
                Err(e) => return fail(e),
            }
        }
        AggregateFormat::Text => render_text(&results, query, config.rlm.aggregate_file_cap),
        AggregateFormat::Summary => render_summary(&results),
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, rendered) {
                return fail(format_args!("cannot write {}: {e}", path.display()));
            }
            println!("aggregate saved to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    ExitCode::SUCCESS
}
