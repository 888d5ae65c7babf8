use std::process::ExitCode;

use clap::Parser;

use tl_domain::trace::TraceEvent;
use tl_hooks::cli::{Cli, Command, ConfigCommand, HookName};
use tl_hooks::{commands, event, handlers, HookContext};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Hook { hook } => run_hook(hook),
        Command::Probe { file, json } => {
            let ctx = HookContext::from_env();
            commands::probe(&file, json, &ctx.config)
        }
        Command::Chunk {
            file,
            size,
            strategy,
            overlap,
            language,
            output,
            progress,
        } => {
            let ctx = HookContext::from_env();
            commands::chunk(
                &file,
                size,
                strategy.into(),
                overlap,
                language,
                output,
                progress,
                &ctx.config,
            )
        }
        Command::Aggregate {
            results_dir,
            pattern,
            query,
            format,
            output,
        } => {
            let ctx = HookContext::from_env();
            commands::aggregate(
                &results_dir,
                pattern.as_deref(),
                query.as_deref(),
                format,
                output,
                &ctx.config,
            )
        }
        Command::ParallelProcess {
            manifest,
            query,
            batch_size,
            output,
            save_prompts,
        } => {
            let ctx = HookContext::from_env();
            commands::parallel_process(
                &manifest,
                &query,
                batch_size,
                output,
                save_prompts,
                &ctx.config,
            )
        }
        Command::Sandbox {
            code,
            file,
            context,
            context_file,
            json,
        } => {
            let ctx = HookContext::from_env();
            commands::sandbox(code, file, context, context_file, json, &ctx.config)
        }
        Command::Config(ConfigCommand::Show) => {
            let ctx = HookContext::from_env();
            commands::config_show(&ctx.config)
        }
        Command::Config(ConfigCommand::Validate) => {
            let ctx = HookContext::from_env();
            commands::config_validate(&ctx.config)
        }
        Command::Version => {
            println!("threadline {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
    }
}

/// One hook invocation: stdin JSON in, at most one JSON line out, exit 0.
///
/// Hooks never signal failure through the exit code — errors are logged
/// and collapsed into the event's no-op response.
fn run_hook(hook: HookName) -> ExitCode {
    let ctx = HookContext::from_env();
    tl_hooklog::init(
        hook.log_name(),
        &ctx.layout.hook_log_dir(),
        &ctx.config.logging,
    );
    let _span = tracing::info_span!("hook", hook = hook.log_name()).entered();

    let response = match event::read_event() {
        Some((event, raw)) => {
            tl_hooklog::log_input(&raw);
            TraceEvent::HookInvoked {
                hook: hook.log_name().to_owned(),
                session_id: event.session_id.clone(),
            }
            .emit();
            handlers::run_hook(hook, &event, &ctx)
        }
        None => {
            // Unparsable stdin: log, no stdout, exit 0.
            tracing::warn!("unparsable event payload");
            tl_hooks::respond::HookResponse::Silent
        }
    };

    response.emit();
    ExitCode::SUCCESS
}
