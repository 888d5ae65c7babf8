//! Cross-session history index.
//!
//! A single JSON file maps every known session to its topics, files, and
//! tool counts, plus an inverted topic index for lookups.  Sessions are
//! re-scanned only when their transcript grew since the last run, so the
//! `Stop`-hook update stays cheap.

pub mod indexer;
pub mod search;
pub mod types;

pub use indexer::update_index;
pub use search::{search, HistoryHit};
pub use types::{HistoryIndex, SessionSummary, TopicRef};
