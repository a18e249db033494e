//! Shared data models for the webmill pipeline.
//!
//! This crate provides the pure, I/O-free pieces of the pipeline:
//! - Work items derived from the input link list
//! - Content-type classification for fetched resources
//! - Per-item outcome variants

pub mod classify;
pub mod item;
pub mod outcome;

pub use classify::{classify, Classification, RejectReason};
pub use item::{parse_link_list, WorkItem, OUTPUT_EXT, SOURCE_EXT};
pub use outcome::ItemOutcome;
