//! Shared domain types for Threadline.
//!
//! Everything the hook handlers and CLI tools have in common lives here:
//! the error type, the layered TOML configuration with every tunable knob,
//! filesystem layout resolution under the assistant's root, atomic state
//! writes, text/tokenizer helpers, and structured trace events.

pub mod config;
pub mod error;
pub mod paths;
pub mod state;
pub mod text;
pub mod trace;

pub use error::{Error, Result};
pub use paths::Layout;
