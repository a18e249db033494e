//! S3 client for artifact uploads.

use std::path::Path;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

/// Configuration for the artifact bucket.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Base URL for unauthenticated reads of public objects
    pub public_base_url: String,
}

impl StorageConfig {
    /// Create config from environment variables.
    ///
    /// `WEBMILL_BUCKET` and `WEBMILL_REGION` are required.
    /// `WEBMILL_PUBLIC_BASE_URL` overrides the derived
    /// `https://{bucket}.s3.{region}.amazonaws.com` form.
    pub fn from_env() -> StorageResult<Self> {
        let bucket = std::env::var("WEBMILL_BUCKET")
            .map_err(|_| StorageError::config_error("WEBMILL_BUCKET not set"))?;
        let region = std::env::var("WEBMILL_REGION")
            .map_err(|_| StorageError::config_error("WEBMILL_REGION not set"))?;
        let public_base_url = std::env::var("WEBMILL_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("https://{bucket}.s3.{region}.amazonaws.com"));

        Ok(Self {
            bucket,
            region,
            public_base_url,
        })
    }
}

/// S3 storage client for transcoded artifacts.
#[derive(Clone)]
pub struct S3Client {
    client: Client,
    bucket: String,
}

impl S3Client {
    /// Create a new client from configuration.
    ///
    /// Credentials come from the SDK's default provider chain.
    pub async fn new(config: &StorageConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            bucket: config.bucket.clone(),
        }
    }

    /// Upload a local file under `key` with a public-read ACL.
    ///
    /// The file is read fully into memory and sent as a single PutObject.
    /// An existing object under the same key is overwritten only through
    /// this call; the pipeline never reaches it for a key whose artifact
    /// already exists.
    pub async fn upload_public(&self, path: impl AsRef<Path>, key: &str) -> StorageResult<()> {
        let path = path.as_ref();
        debug!("Uploading {} to {}", path.display(), key);

        let body = tokio::fs::read(path).await?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .acl(ObjectCannedAcl::PublicRead)
            .content_type("video/webm")
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        info!("Uploaded {} to {}", path.display(), key);
        Ok(())
    }
}
