//! Live transcript segmentation.
//!
//! The `Stop` hook partitions the running transcript into bounded semantic
//! segments: closed at line caps, time gaps, completed tasks, and topic
//! shifts.  Finalized segments are immutable and carry a summary payload;
//! the unfinalized tail ("active segment") persists only as a line-range
//! pointer and is replayed from its start line on the next run, so boundary
//! decisions must be deterministic given the message stream.

pub mod boundary;
pub mod indexer;
pub mod summary;
pub mod types;

pub use boundary::BoundaryType;
pub use indexer::update_segment_index;
pub use types::{ActiveSegment, Segment, SegmentIndex, SegmentSummary};
