//! The hook wire protocol, input side: one JSON object on stdin.

use std::io::Read;

use serde::Deserialize;

/// Common fields of a hook event payload.  Everything is optional — hooks
/// must cope with any subset.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct HookEvent {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub transcript_path: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<serde_json::Value>,
    #[serde(default)]
    pub session_trigger: Option<String>,
}

/// Read stdin to EOF and parse the event.
///
/// `None` on unreadable or unparsable input — the caller logs and exits 0
/// with no stdout.
pub fn read_event() -> Option<(HookEvent, serde_json::Value)> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input).ok()?;
    parse_event(&input)
}

/// Parse a raw payload (split out for tests).
pub fn parse_event(input: &str) -> Option<(HookEvent, serde_json::Value)> {
    let raw: serde_json::Value = serde_json::from_str(input).ok()?;
    let event: HookEvent = serde_json::from_value(raw.clone()).ok()?;
    Some((event, raw))
}
