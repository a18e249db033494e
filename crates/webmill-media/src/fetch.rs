//! Streaming download of a response body to a local file.

use std::io::ErrorKind;
use std::path::Path;

use futures::StreamExt;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};

/// Stream a response body into `dest`, which must not already exist.
///
/// The destination is opened with create-new semantics, so a file created
/// concurrently between any earlier existence check and this call surfaces
/// as [`MediaError::DestinationExists`] instead of being overwritten. The
/// caller treats that as "already downloaded".
///
/// A response that declares a zero-length body fails with
/// [`MediaError::EmptyBody`] before the destination is created. Stream
/// errors propagate after the file exists; the partial file is left in
/// place, matching the resume semantics of the rest of the pipeline (a
/// later run probes the remote store before trusting local bytes).
pub async fn fetch_to_file(response: reqwest::Response, dest: impl AsRef<Path>) -> MediaResult<()> {
    let dest = dest.as_ref();

    if response.content_length() == Some(0) {
        return Err(MediaError::EmptyBody);
    }

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!(dest = %dest.display(), "Destination created concurrently, not overwriting");
            return Err(MediaError::DestinationExists(dest.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| MediaError::fetch_failed(e.to_string()))?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;

    info!(
        dest = %dest.display(),
        size_mb = written as f64 / 1_048_576.0,
        "Download complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(body: &[u8]) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clip.mp4"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "video/mp4")
                    .set_body_bytes(body.to_vec()),
            )
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn streams_body_to_new_file() {
        let server = serve(b"fake mp4 bytes").await;
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("clip.mp4");

        let response = reqwest::get(format!("{}/clip.mp4", server.uri()))
            .await
            .unwrap();
        fetch_to_file(response, &dest).await.unwrap();

        assert_eq!(tokio::fs::read(&dest).await.unwrap(), b"fake mp4 bytes");
    }

    #[tokio::test]
    async fn refuses_to_overwrite_existing_file() {
        let server = serve(b"new bytes").await;
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("clip.mp4");
        tokio::fs::write(&dest, b"old bytes").await.unwrap();

        let response = reqwest::get(format!("{}/clip.mp4", server.uri()))
            .await
            .unwrap();
        let err = fetch_to_file(response, &dest).await.unwrap_err();

        assert!(err.is_destination_exists());
        assert_eq!(tokio::fs::read(&dest).await.unwrap(), b"old bytes");
    }

    #[tokio::test]
    async fn empty_body_is_an_error_and_creates_nothing() {
        let server = serve(b"").await;
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("clip.mp4");

        let response = reqwest::get(format!("{}/clip.mp4", server.uri()))
            .await
            .unwrap();
        let err = fetch_to_file(response, &dest).await.unwrap_err();

        assert!(matches!(err, MediaError::EmptyBody));
        assert!(!dest.exists());
    }
}
