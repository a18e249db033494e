//! The per-item pipeline and the batch orchestrator.

use std::path::PathBuf;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, info, warn};

use webmill_media::fetch_to_file;
use webmill_models::{classify, Classification, ItemOutcome, WorkItem};
use webmill_storage::RemoteStatus;

use crate::contract::{ArtifactStore, Transcoder};
use crate::error::PipelineResult;
use crate::report::{RunLog, RunReport};

/// Orchestrates the idempotent, resumable per-item pipeline.
///
/// Items are processed strictly sequentially, in input order. Each item's
/// failure is caught at the per-item boundary and recorded; it never halts
/// processing of subsequent items.
pub struct Pipeline<T, S> {
    http: reqwest::Client,
    transcoder: T,
    store: S,
    download_dir: PathBuf,
}

impl<T: Transcoder, S: ArtifactStore> Pipeline<T, S> {
    pub fn new(
        http: reqwest::Client,
        transcoder: T,
        store: S,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            http,
            transcoder,
            store,
            download_dir: download_dir.into(),
        }
    }

    /// Process every item, accumulating warnings and outcome counts.
    pub async fn run(&self, items: &[WorkItem]) -> RunReport {
        let mut log = RunLog::new();
        let mut report = RunReport::default();

        for item in items {
            match self.process_item(item, &mut log).await {
                Ok(ItemOutcome::Completed) => report.completed += 1,
                Ok(ItemOutcome::AlreadyUploaded) => report.already_uploaded += 1,
                Ok(ItemOutcome::Skipped(_)) => report.skipped += 1,
                Err(e) => {
                    error!(
                        index = item.index,
                        url = %item.source_url,
                        error = %e,
                        "Item failed"
                    );
                    log.push(format!("Failed to process {}: {}", item.source_url, e));
                    report.failed += 1;
                }
            }
        }

        report.log = log;
        report
    }

    /// Run one item through the state machine:
    /// classify → local check → (download | remote check) → transcode → upload.
    ///
    /// Warnings go into `log`; errors propagate to the per-item boundary in
    /// [`Pipeline::run`].
    pub async fn process_item(
        &self,
        item: &WorkItem,
        log: &mut RunLog,
    ) -> PipelineResult<ItemOutcome> {
        debug!(index = item.index, url = %item.source_url, "Processing item");

        let response = self.http.get(&item.source_url).send().await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        match classify(content_type.as_deref()) {
            Classification::Accepted { .. } => {}
            Classification::Rejected(reason) => {
                match reason.warning_line(&item.source_url) {
                    Some(line) => {
                        warn!(index = item.index, "{line}");
                        log.push(line);
                    }
                    None => info!(
                        index = item.index,
                        url = %item.source_url,
                        content_type = content_type.as_deref().unwrap_or_default(),
                        "Skipping known-irrelevant link"
                    ),
                }
                return Ok(ItemOutcome::Skipped(reason));
            }
        }

        let source_path = self.download_dir.join(item.local_file_name());
        let output_key = item.remote_key();

        // A fresh download implies the artifact was never uploaded, so the
        // remote probe only runs on the resume path. Losing the exclusive
        // creation race counts as resuming.
        let mut resumed = source_path.exists();
        if !resumed {
            info!(index = item.index, file = %source_path.display(), "Downloading");
            match fetch_to_file(response, &source_path).await {
                Ok(()) => {}
                Err(e) if e.is_destination_exists() => resumed = true,
                Err(e) => return Err(e.into()),
            }
        }

        if resumed {
            match self.store.status(&output_key).await? {
                RemoteStatus::Present => {
                    info!(index = item.index, url = %item.source_url, "Already uploaded");
                    return Ok(ItemOutcome::AlreadyUploaded);
                }
                RemoteStatus::Absent => {
                    let line = format!("{} not uploaded", item.source_url);
                    warn!(index = item.index, "{line}");
                    log.push(line);
                }
            }
        }

        let output_path = self.download_dir.join(&output_key);
        self.transcoder
            .transcode(&source_path, &output_path)
            .await?;
        self.store.upload(&output_path, &output_key).await?;

        info!(index = item.index, key = %output_key, "Uploaded");
        Ok(ItemOutcome::Completed)
    }
}
