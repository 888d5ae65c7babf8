//! CLI command implementations.
//!
//! User-facing errors go to stderr with exit code 1; success paths print to
//! stdout.  The hook subcommand never takes these paths — it has its own
//! error isolation.

mod aggregate;
mod chunk;
mod config;
mod parallel;
mod probe;
mod sandbox;

pub use aggregate::aggregate;
pub use chunk::chunk;
pub use config::{show as config_show, validate as config_validate};
pub use parallel::parallel_process;
pub use probe::probe;
pub use sandbox::sandbox;

use std::process::ExitCode;

/// Print a user error and return the failure exit code.
pub(crate) fn fail(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("error: {message}");
    ExitCode::FAILURE
}
