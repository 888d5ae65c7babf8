use serde::{Deserialize, Serialize};

/// Restricted-evaluator resource caps.
///
/// The evaluator is a guardrail for trusted short scripts, not a security
/// boundary; these caps bound runaway scripts, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Cumulative cap on captured `print` output.
    #[serde(default = "d_print_cap")]
    pub print_cap: usize,
    /// Script engine operation budget.
    #[serde(default = "d_max_operations")]
    pub max_operations: u64,
    /// Largest span a `range` call may produce.
    #[serde(default = "d_max_range")]
    pub max_range: i64,
    /// Largest string the script may build.
    #[serde(default = "d_max_string_size")]
    pub max_string_size: usize,
    /// Largest array the script may build.
    #[serde(default = "d_max_array_size")]
    pub max_array_size: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            print_cap: d_print_cap(),
            max_operations: d_max_operations(),
            max_range: d_max_range(),
            max_string_size: d_max_string_size(),
            max_array_size: d_max_array_size(),
        }
    }
}

fn d_print_cap() -> usize {
    50_000
}

fn d_max_operations() -> u64 {
    1_000_000
}

fn d_max_range() -> i64 {
    100_000
}

fn d_max_string_size() -> usize {
    1_000_000
}

fn d_max_array_size() -> usize {
    100_000
}
