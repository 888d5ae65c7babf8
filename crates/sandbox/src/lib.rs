//! Restricted script evaluator.
//!
//! Runs a short text-processing script against a provided context string.
//! The engine has no filesystem, network, or process access; a static
//! deny-list rejects suspicious sources before compilation, `print` is
//! replaced by a capped capturing sink, `range` is guarded, and an
//! operation budget bounds runtime.
//!
//! This is a guardrail for trusted callers producing short scripts, not a
//! security boundary against a determined adversary.

mod deny;
mod engine;

pub use deny::{find_denied_token, DENY_TOKENS};
pub use engine::{execute, ExecOutcome};
