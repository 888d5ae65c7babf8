//! Event router and CLI surface.
//!
//! One binary, two faces: `threadline hook <name>` is the single-shot hook
//! process the host invokes with JSON on stdin, and the remaining
//! subcommands are the RLM/sandbox utilities the assistant drives during an
//! RLM workflow.

pub mod cli;
pub mod commands;
pub mod event;
pub mod handlers;
pub mod respond;

use tl_domain::config::Config;
use tl_domain::Layout;

/// Everything a hook handler needs from the process environment.
pub struct HookContext {
    pub layout: Layout,
    pub config: Config,
}

impl HookContext {
    pub fn from_env() -> Self {
        let layout = Layout::from_env();
        let config = Config::load_or_default(layout.root());
        Self { layout, config }
    }
}
