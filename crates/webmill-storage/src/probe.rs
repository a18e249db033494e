//! Unauthenticated existence probe for public artifacts.

use reqwest::StatusCode;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// Whether the remote artifact for a key exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    /// The object is readable at its public URL; the item is fully processed.
    Present,
    /// The public URL returned 404; the artifact was never uploaded.
    Absent,
}

/// Probes the bucket's public URL form for uploaded artifacts.
#[derive(Debug, Clone)]
pub struct RemoteProbe {
    http: reqwest::Client,
    public_base_url: String,
}

impl RemoteProbe {
    /// Create a probe for a public base URL.
    pub fn new(http: reqwest::Client, public_base_url: impl Into<String>) -> Self {
        let mut public_base_url = public_base_url.into();
        while public_base_url.ends_with('/') {
            public_base_url.pop();
        }
        Self {
            http,
            public_base_url,
        }
    }

    /// Public URL of the object under `key`.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    /// Check whether the artifact for `key` exists.
    ///
    /// Only 404 means absent. Any other response counts as present, so an
    /// access-denied or transient non-404 status never triggers a duplicate
    /// upload for an object that may already exist.
    pub async fn status(&self, key: &str) -> StorageResult<RemoteStatus> {
        let url = self.object_url(key);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| StorageError::probe_failed(e.to_string()))?;

        let status = if response.status() == StatusCode::NOT_FOUND {
            RemoteStatus::Absent
        } else {
            RemoteStatus::Present
        };
        debug!(url = %url, status = ?status, "Probed remote artifact");
        Ok(status)
    }
}
