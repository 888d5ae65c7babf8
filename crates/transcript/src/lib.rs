//! Host transcript access for Threadline.
//!
//! Transcripts are append-only JSONL files owned by the host assistant, one
//! JSON record per line.  This crate models those records as tagged
//! variants, reads them tolerantly (mid-write tails and malformed lines are
//! skipped, never fatal), locates the current session on disk, and carries
//! the topic/file/tool/decision extraction shared by the history indexer and
//! the live segmenter.

pub mod discover;
pub mod extract;
pub mod message;
pub mod reader;

pub use discover::{find_current_session, session_id_from_path, SUBAGENT_MARKER};
pub use message::{AssistantItem, TranscriptRecord};
pub use reader::TranscriptReader;
