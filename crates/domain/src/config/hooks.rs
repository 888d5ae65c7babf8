use serde::{Deserialize, Serialize};

/// Event-router thresholds: large-input notices and learning-moment
/// detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Prompt size that earns a mild RLM suggestion.
    #[serde(default = "d_large_input_soft")]
    pub large_input_soft: usize,
    /// Prompt size that earns the strong RLM recommendation.
    #[serde(default = "d_large_input_strong")]
    pub large_input_strong: usize,
    /// Error signals required before a resolution counts as a learning moment.
    #[serde(default = "d_error_signal_threshold")]
    pub error_signal_threshold: usize,
    /// Trial-and-error phrases that alone count as a learning moment.
    #[serde(default = "d_trial_phrase_threshold")]
    pub trial_phrase_threshold: usize,
    /// How many trailing transcript messages the detector scans.
    #[serde(default = "d_scan_window")]
    pub scan_window: usize,
    /// The pending-learning singleton expires after this many hours.
    #[serde(default = "d_pending_ttl_hours")]
    pub pending_ttl_hours: i64,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            large_input_soft: d_large_input_soft(),
            large_input_strong: d_large_input_strong(),
            error_signal_threshold: d_error_signal_threshold(),
            trial_phrase_threshold: d_trial_phrase_threshold(),
            scan_window: d_scan_window(),
            pending_ttl_hours: d_pending_ttl_hours(),
        }
    }
}

fn d_large_input_soft() -> usize {
    50_000
}

fn d_large_input_strong() -> usize {
    150_000
}

fn d_error_signal_threshold() -> usize {
    3
}

fn d_trial_phrase_threshold() -> usize {
    5
}

fn d_scan_window() -> usize {
    30
}

fn d_pending_ttl_hours() -> i64 {
    24
}
