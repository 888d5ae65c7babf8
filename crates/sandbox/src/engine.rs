//! The capped script engine.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use tl_domain::config::SandboxConfig;
use tl_domain::trace::TraceEvent;

use crate::deny;

/// Result of one sandbox run.
#[derive(Debug, Clone, Serialize)]
pub struct ExecOutcome {
    pub success: bool,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecOutcome {
    fn failure(output: String, error: String) -> Self {
        Self {
            success: false,
            output,
            error: Some(error),
        }
    }
}

/// Run `code` with `context` bound as a constant string.
///
/// Deny-listed sources are rejected without executing.  Output is whatever
/// the script printed (capped); a script whose final expression yields a
/// value and prints nothing gets that value as output.
pub fn execute(code: &str, context: &str, config: &SandboxConfig) -> ExecOutcome {
    if let Some(token) = deny::find_denied_token(code) {
        return ExecOutcome::failure(
            String::new(),
            format!("denied token in source: `{}`", token.trim_end()),
        );
    }

    let mut engine = rhai::Engine::new();
    engine.set_max_operations(config.max_operations.max(1));
    engine.set_max_string_size(config.max_string_size);
    engine.set_max_array_size(config.max_array_size);
    engine.set_max_map_size(config.max_array_size);
    engine.set_max_call_levels(32);

    // Capturing print sink with a cumulative cap.
    let sink: Rc<RefCell<String>> = Rc::new(RefCell::new(String::new()));
    let print_cap = config.print_cap;
    {
        let sink = sink.clone();
        engine.on_print(move |text| {
            let mut buffer = sink.borrow_mut();
            let remaining = print_cap.saturating_sub(buffer.len());
            if remaining == 0 {
                return;
            }
            let mut end = text.len().min(remaining);
            while end > 0 && !text.is_char_boundary(end) {
                end -= 1;
            }
            buffer.push_str(&text[..end]);
            if buffer.len() < print_cap {
                buffer.push('\n');
            }
        });
    }
    {
        let sink = sink.clone();
        engine.on_debug(move |text, _, _| {
            let mut buffer = sink.borrow_mut();
            if buffer.len() < print_cap {
                buffer.push_str(text);
                buffer.push('\n');
            }
        });
    }

    // Guarded range: materialized, bounded span.
    let max_range = config.max_range;
    engine.register_fn(
        "range",
        move |from: i64, to: i64| -> Result<rhai::Array, Box<rhai::EvalAltResult>> {
            let span = to.saturating_sub(from);
            if span > max_range {
                return Err(format!(
                    "range span {span} exceeds the cap of {max_range}"
                )
                .into());
            }
            Ok((from..to).map(rhai::Dynamic::from).collect())
        },
    );

    let mut scope = rhai::Scope::new();
    scope.push_constant("context", context.to_owned());

    let outcome = match engine.eval_with_scope::<rhai::Dynamic>(&mut scope, code) {
        Ok(value) => {
            let mut output = sink.borrow().clone();
            if output.is_empty() && !value.is_unit() {
                output = value.to_string();
            }
            ExecOutcome {
                success: true,
                output,
                error: None,
            }
        }
        Err(e) => ExecOutcome::failure(sink.borrow().clone(), e.to_string()),
    };

    TraceEvent::SandboxRun {
        success: outcome.success,
        output_chars: outcome.output.len(),
    }
    .emit();

    outcome
}
