use serde::{Deserialize, Serialize};

/// Per-hook rotating log files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Rotate the current log file once it exceeds this size.
    #[serde(default = "d_max_bytes")]
    pub max_bytes: u64,
    /// How many rotated siblings (`.1`, `.2`, …) to keep.
    #[serde(default = "d_retention")]
    pub retention: usize,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "d_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            max_bytes: d_max_bytes(),
            retention: d_retention(),
            filter: d_filter(),
        }
    }
}

fn d_max_bytes() -> u64 {
    1024 * 1024
}

fn d_retention() -> usize {
    3
}

fn d_filter() -> String {
    "info".into()
}
