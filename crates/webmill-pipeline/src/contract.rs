//! Contract traits for the pipeline's external collaborators.
//!
//! The transcoding engine and the artifact store are invoked through traits
//! so orchestrator tests run without ffmpeg on PATH or a reachable bucket.
//! The traits are annotated for `mockall`; the generated mocks are exported
//! under the default-on `test-export-mocks` feature for integration tests.

use std::path::Path;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use webmill_storage::{RemoteProbe, RemoteStatus, S3Client};

use crate::error::PipelineResult;

/// External conversion from the source container to the output container.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Convert `input` to the output container at `output`, awaiting
    /// completion. Fails on spawn failure or non-zero exit; no retry.
    async fn transcode(&self, input: &Path, output: &Path) -> PipelineResult<()>;
}

/// Remote store for transcoded artifacts.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Whether the artifact for `key` already exists remotely.
    async fn status(&self, key: &str) -> PipelineResult<RemoteStatus>;

    /// Push the local file at `path` to the store under `key` with
    /// public-read access.
    async fn upload(&self, path: &Path, key: &str) -> PipelineResult<()>;
}

/// Production transcoder: ffmpeg with the fixed WebM parameter set.
#[derive(Debug, Default)]
pub struct FfmpegTranscoder;

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> PipelineResult<()> {
        webmill_media::transcode_to_webm(input, output).await?;
        Ok(())
    }
}

/// Production artifact store: S3 uploads plus the public-URL probe.
#[derive(Clone)]
pub struct S3ArtifactStore {
    client: S3Client,
    probe: RemoteProbe,
}

impl S3ArtifactStore {
    pub fn new(client: S3Client, probe: RemoteProbe) -> Self {
        Self { client, probe }
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn status(&self, key: &str) -> PipelineResult<RemoteStatus> {
        Ok(self.probe.status(key).await?)
    }

    async fn upload(&self, path: &Path, key: &str) -> PipelineResult<()> {
        self.client.upload_public(path, key).await?;
        Ok(())
    }
}
