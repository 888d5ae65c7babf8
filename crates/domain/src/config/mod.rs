mod history;
mod hooks;
mod logging;
mod recovery;
mod rlm;
mod sandbox;
mod segmenter;
mod skills;

pub use history::*;
pub use hooks::*;
pub use logging::*;
pub use recovery::*;
pub use rlm::*;
pub use sandbox::*;
pub use segmenter::*;
pub use skills::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Every empirically-chosen weight and threshold is a field here so the
/// scoring rules can be tuned without a rebuild.  `threadline.toml` under the
/// assistant root overrides the defaults; a missing file means all defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub skills: SkillsConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
    #[serde(default)]
    pub rlm: RlmConfig,
    #[serde(default)]
    pub sandbox: SandboxConfig,
    #[serde(default)]
    pub hooks: HooksConfig,
}

/// Configuration filename under the assistant root.
pub const CONFIG_FILE: &str = "threadline.toml";

impl Config {
    /// Load the config from `<root>/threadline.toml`.
    ///
    /// A missing file yields all defaults.  A malformed file also yields
    /// defaults (with a warning) — hooks must never fail on configuration
    /// problems.
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "malformed config, falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.logging.retention == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "logging.retention".into(),
                message: "retention must keep at least one rotated file".into(),
            });
        }
        if self.logging.max_bytes < 4096 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "logging.max_bytes".into(),
                message: "rotating below 4 KiB will thrash the log files".into(),
            });
        }

        if self.skills.strong_threshold < self.skills.suggestion_threshold {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "skills.strong_threshold".into(),
                message: format!(
                    "strong threshold {} is below the suggestion threshold {}",
                    self.skills.strong_threshold, self.skills.suggestion_threshold
                ),
            });
        }

        if self.segmenter.min_lines >= self.segmenter.max_lines {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "segmenter.min_lines".into(),
                message: format!(
                    "min_lines {} must be below max_lines {}",
                    self.segmenter.min_lines, self.segmenter.max_lines
                ),
            });
        }
        if self.segmenter.time_gap_secs == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "segmenter.time_gap_secs".into(),
                message: "time gap must be greater than 0".into(),
            });
        }

        if self.recovery.context_budget_chars == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "recovery.context_budget_chars".into(),
                message: "segment context budget must be greater than 0".into(),
            });
        }

        if self.rlm.overlap >= self.rlm.chunk_size {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "rlm.overlap".into(),
                message: format!(
                    "overlap {} must be below chunk_size {}",
                    self.rlm.overlap, self.rlm.chunk_size
                ),
            });
        }
        if self.rlm.batch_size == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "rlm.batch_size".into(),
                message: "batch_size must be greater than 0".into(),
            });
        }

        if self.sandbox.max_operations == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "sandbox.max_operations".into(),
                message: "operation cap must be greater than 0".into(),
            });
        }

        if self.hooks.large_input_strong <= self.hooks.large_input_soft {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "hooks.large_input_strong".into(),
                message: "strong notice threshold should exceed the soft one".into(),
            });
        }

        errors
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: find the first issue matching a field prefix.
    fn find_issue<'a>(issues: &'a [ConfigError], field_prefix: &str) -> Option<&'a ConfigError> {
        issues.iter().find(|e| e.field.starts_with(field_prefix))
    }

    #[test]
    fn default_config_passes() {
        let issues = Config::default().validate();
        let errors: Vec<_> = issues
            .iter()
            .filter(|e| e.severity == ConfigSeverity::Error)
            .collect();
        assert!(errors.is_empty(), "expected no errors, got: {errors:?}");
    }

    #[test]
    fn strong_threshold_below_suggestion_is_error() {
        let mut cfg = Config::default();
        cfg.skills.strong_threshold = 2;
        let issues = cfg.validate();
        let issue =
            find_issue(&issues, "skills.strong_threshold").expect("expected threshold error");
        assert_eq!(issue.severity, ConfigSeverity::Error);
    }

    #[test]
    fn min_lines_above_max_is_error() {
        let mut cfg = Config::default();
        cfg.segmenter.min_lines = 200;
        let issues = cfg.validate();
        let issue = find_issue(&issues, "segmenter.min_lines").expect("expected min_lines error");
        assert_eq!(issue.severity, ConfigSeverity::Error);
    }

    #[test]
    fn overlap_above_chunk_size_is_error() {
        let mut cfg = Config::default();
        cfg.rlm.overlap = cfg.rlm.chunk_size;
        let issues = cfg.validate();
        let issue = find_issue(&issues, "rlm.overlap").expect("expected overlap error");
        assert_eq!(issue.severity, ConfigSeverity::Error);
    }

    #[test]
    fn zero_retention_is_error() {
        let mut cfg = Config::default();
        cfg.logging.retention = 0;
        let issues = cfg.validate();
        let issue = find_issue(&issues, "logging.retention").expect("expected retention error");
        assert_eq!(issue.severity, ConfigSeverity::Error);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_or_default(dir.path());
        assert_eq!(cfg.skills.strong_threshold, 10);
        assert_eq!(cfg.segmenter.max_lines, 100);
    }

    #[test]
    fn partial_file_overrides_one_section() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[segmenter]\nmax_lines = 40\n",
        )
        .unwrap();
        let cfg = Config::load_or_default(dir.path());
        assert_eq!(cfg.segmenter.max_lines, 40);
        // Untouched sections keep their defaults.
        assert_eq!(cfg.segmenter.min_lines, 10);
        assert_eq!(cfg.skills.suggestion_threshold, 5);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "not [valid toml").unwrap();
        let cfg = Config::load_or_default(dir.path());
        assert_eq!(cfg.skills.strong_threshold, 10);
    }

    #[test]
    fn config_error_display_format() {
        let err = ConfigError {
            severity: ConfigSeverity::Error,
            field: "rlm.batch_size".into(),
            message: "batch_size must be greater than 0".into(),
        };
        assert_eq!(
            format!("{err}"),
            "[ERROR] rlm.batch_size: batch_size must be greater than 0"
        );
    }
}
