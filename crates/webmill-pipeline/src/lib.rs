//! Pipeline orchestration for webmill.
//!
//! Sequences the per-item steps — classify, local check, fetch, remote
//! check, transcode, upload — and isolates item failures so one bad URL
//! never aborts the batch.

pub mod config;
pub mod contract;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::PipelineConfig;
pub use contract::{ArtifactStore, FfmpegTranscoder, S3ArtifactStore, Transcoder};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::Pipeline;
pub use report::{RunLog, RunReport};

#[cfg(any(test, feature = "test-export-mocks"))]
pub use contract::{MockArtifactStore, MockTranscoder};
