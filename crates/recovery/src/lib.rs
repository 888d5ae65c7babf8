//! Session recovery after context compaction.
//!
//! On `SessionStart` (compact/resume) the recovery engine assembles one
//! deterministic text block: the project persistence files first, then the
//! highest-utility conversation segments — scored against pending tasks and
//! recency, selected under a character budget, and expanded into literal
//! compact-transcript excerpts.

pub mod builder;
pub mod excerpt;
pub mod persistence;
pub mod scoring;

pub use builder::build_recovery_block;
pub use persistence::PersistenceFiles;
