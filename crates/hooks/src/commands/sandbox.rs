use std::path::PathBuf;
use std::process::ExitCode;

use tl_domain::config::Config;
use tl_sandbox::execute;

use super::fail;

pub fn sandbox(
    code: Option<String>,
    file: Option<PathBuf>,
    context: Option<String>,
    context_file: Option<PathBuf>,
    json: bool,
    config: &Config,
) -> ExitCode {
    let code = match (code, file) {
        (Some(code), _) => code,
        (None, Some(path)) => match std::fs::read_to_string(&path) {
            Ok(code) => code,
            Err(e) => return fail(format_args!("cannot read {}: {e}", path.display())),
        },
        (None, None) => return fail("either --code or --file is required"),
    };

    let context = match (context, context_file) {
        (Some(context), _) => context,
        (None, Some(path)) => match std::fs::read_to_string(&path) {
            Ok(context) => context,
            Err(e) => return fail(format_args!("cannot read {}: {e}", path.display())),
        },
        (None, None) => String::new(),
    };

    let outcome = execute(&code, &context, &config.sandbox);

    if json {
        match serde_json::to_string(&outcome) {
            Ok(out) => println!("{out}"),
            Err(e) => return fail(e),
        }
        // JSON mode reports failure in-band.
        return ExitCode::SUCCESS;
    }

    if outcome.success {
        print!("{}", outcome.output);
        if !outcome.output.ends_with('\n') && !outcome.output.is_empty() {
            println!();
        }
        ExitCode::SUCCESS
    } else {
        fail(outcome.error.unwrap_or_else(|| "execution failed".into()))
    }
}
