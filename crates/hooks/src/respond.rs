//! The hook wire protocol, output side.
//!
//! Three shapes only: nothing at all, an `additionalContext` injection, or
//! a `Stop` continuation.  The empty case must be truly empty — zero bytes
//! on stdout — because some host versions surface a cosmetic "hook error"
//! for any stdout on a no-op path.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookResponse {
    /// No output at all.
    Silent,
    /// `{"hookSpecificOutput": {"additionalContext": "<text>"}}`
    Context(String),
    /// `{"continue": true[, "systemMessage": "<text>"]}`
    Continue { system_message: Option<String> },
}

#[derive(Serialize)]
struct ContextOutput<'a> {
    #[serde(rename = "hookSpecificOutput")]
    hook_specific_output: AdditionalContext<'a>,
}

#[derive(Serialize)]
struct AdditionalContext<'a> {
    #[serde(rename = "additionalContext")]
    additional_context: &'a str,
}

#[derive(Serialize)]
struct ContinueOutput<'a> {
    #[serde(rename = "continue")]
    r#continue: bool,
    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    system_message: Option<&'a str>,
}

impl HookResponse {
    /// The single stdout line for this response; `None` means zero bytes.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Silent => None,
            Self::Context(text) => serde_json::to_string(&ContextOutput {
                hook_specific_output: AdditionalContext {
                    additional_context: text,
                },
            })
            .ok(),
            Self::Continue { system_message } => serde_json::to_string(&ContinueOutput {
                r#continue: true,
                system_message: system_message.as_deref(),
            })
            .ok(),
        }
    }

    /// Print the response (if any) and record it in the hook log.
    pub fn emit(&self) {
        match self.render() {
            Some(line) => {
                println!("{line}");
                tl_hooklog::log_output(&line);
            }
            None => tl_hooklog::log_output(""),
        }
    }
}
