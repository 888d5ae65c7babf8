use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use tl_rlm::Strategy;

#[derive(Debug, Parser)]
#[command(name = "threadline", about = "Persistent memory hooks and RLM tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one hook: read the event JSON from stdin, maybe print a response.
    Hook {
        #[arg(value_enum)]
        hook: HookName,
    },
    /// Analyze a source file and recommend a chunking strategy.
    Probe {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Split a source file into chunk files plus a manifest.
    Chunk {
        file: PathBuf,
        /// Target chunk size in characters.
        #[arg(long)]
        size: Option<usize>,
        #[arg(long, value_enum, default_value_t = StrategyArg::Size)]
        strategy: StrategyArg,
        #[arg(long)]
        overlap: Option<usize>,
        /// Force the code strategy's language instead of detecting it.
        #[arg(long)]
        language: Option<String>,
        /// Output directory (default: `rlm_context/chunks`).
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        progress: bool,
    },
    /// Aggregate a directory of result files.
    Aggregate {
        results_dir: PathBuf,
        /// Glob filter over result filenames.
        #[arg(long)]
        pattern: Option<String>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long, value_enum, default_value_t = AggregateFormat::Text)]
        format: AggregateFormat,
        /// Write the aggregate here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate `parallel_config.json` for a chunk manifest.
    #[command(name = "parallel_process")]
    ParallelProcess {
        manifest: PathBuf,
        #[arg(long)]
        query: String,
        #[arg(long)]
        batch_size: Option<usize>,
        /// Output directory (default: the manifest's directory).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also write one prompt file per batch.
        #[arg(long)]
        save_prompts: bool,
    },
    /// Run a short script in the restricted evaluator.
    Sandbox {
        #[arg(long, conflicts_with = "file")]
        code: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long, conflicts_with = "context_file")]
        context: Option<String>,
        #[arg(long)]
        context_file: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Configuration maintenance.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print the version.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML.
    Show,
    /// Validate the configuration; non-zero exit on errors.
    Validate,
}

/// The hook entry points the host can register in its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HookName {
    /// UserPromptSubmit: inject strong skill matches.
    SkillMatch,
    /// UserPromptSubmit: suggest the RLM pipeline for huge prompts.
    LargeInput,
    /// UserPromptSubmit: surface related past sessions.
    HistorySearch,
    /// UserPromptSubmit: consume a pending learning moment.
    LearningPickup,
    /// PostToolUse (Read): track SKILL.md reads.
    SkillTrack,
    /// Stop: detect trial-and-error resolutions.
    LearningDetect,
    /// Stop: incremental history index update.
    HistoryIndex,
    /// Stop: incremental transcript segmentation.
    SegmentIndex,
    /// SessionStart (compact/resume): inject the recovery block.
    Recover,
}

impl HookName {
    /// Stable name used for the log file and trace events.
    pub fn log_name(&self) -> &'static str {
        match self {
            Self::SkillMatch => "skill-match",
            Self::LargeInput => "large-input",
            Self::HistorySearch => "history-search",
            Self::LearningPickup => "learning-pickup",
            Self::SkillTrack => "skill-track",
            Self::LearningDetect => "learning-detect",
            Self::HistoryIndex => "history-index",
            Self::SegmentIndex => "segment-index",
            Self::Recover => "recover",
        }
    }

    /// `Stop` hooks must answer `{"continue": true}` even when they fail.
    pub fn is_stop_hook(&self) -> bool {
        matches!(
            self,
            Self::LearningDetect | Self::HistoryIndex | Self::SegmentIndex
        )
    }
}

/// Clap-facing mirror of [`Strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Size,
    Lines,
    Headers,
    Code,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Size => Strategy::Size,
            StrategyArg::Lines => Strategy::Lines,
            StrategyArg::Headers => Strategy::Headers,
            StrategyArg::Code => Strategy::Code,
        }
    }
}

impl std::fmt::Display for StrategyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Strategy::from(*self).fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AggregateFormat {
    Text,
    Json,
    Summary,
}

impl std::fmt::Display for AggregateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Summary => "summary",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn hook_names_parse() {
        let cli = Cli::try_parse_from(["threadline", "hook", "skill-match"]).unwrap();
        match cli.command {
            Command::Hook { hook } => assert_eq!(hook, HookName::SkillMatch),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parallel_process_keeps_underscore_name() {
        let cli = Cli::try_parse_from([
            "threadline",
            "parallel_process",
            "manifest.json",
            "--query",
            "find bugs",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::ParallelProcess { .. }));
    }

    #[test]
    fn chunk_defaults() {
        let cli = Cli::try_parse_from(["threadline", "chunk", "input.txt"]).unwrap();
        match cli.command {
            Command::Chunk {
                strategy, progress, ..
            } => {
                assert_eq!(strategy, StrategyArg::Size);
                assert!(!progress);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
