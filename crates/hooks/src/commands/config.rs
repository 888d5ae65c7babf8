use std::process::ExitCode;

use tl_domain::config::{Config, ConfigSeverity};

use super::fail;

pub fn show(config: &Config) -> ExitCode {
    match toml::to_string_pretty(config) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

pub fn validate(config: &Config) -> ExitCode {
    let issues = config.validate();
    for issue in &issues {
        println!("{issue}");
    }
    let errors = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    if errors > 0 {
        eprintln!("{errors} error(s)");
        ExitCode::FAILURE
    } else {
        println!("configuration OK ({} warning(s))", issues.len() - errors);
        ExitCode::SUCCESS
    }
}
