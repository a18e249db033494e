//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Item-level pipeline errors.
///
/// Every variant is caught exactly once, at the per-item boundary in the
/// orchestrator, converted to a log line, and swallowed so the batch
/// continues.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Media error: {0}")]
    Media(#[from] webmill_media::MediaError),

    #[error("Storage error: {0}")]
    Storage(#[from] webmill_storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
