use std::path::Path;
use std::process::ExitCode;

use tl_domain::config::Config;

use super::fail;

pub fn probe(file: &Path, json: bool, config: &Config) -> ExitCode {
    let probe = match tl_rlm::probe_file(file, &config.rlm) {
        Ok(probe) => probe,
        Err(e) => return fail(format_args!("cannot probe {}: {e}", file.display())),
    };

    if json {
        match serde_json::to_string_pretty(&probe) {
            Ok(out) => println!("{out}"),
            Err(e) => return fail(e),
        }
    } else {
        print!("{}", probe.render());
    }
    ExitCode::SUCCESS
}
