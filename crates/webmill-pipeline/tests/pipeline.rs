//! Orchestrator integration tests.
//!
//! HTTP fetches run against a wiremock server; the transcoder and artifact
//! store are mockall mocks, so nothing here needs ffmpeg or a bucket.

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webmill_models::WorkItem;
use webmill_pipeline::{MockArtifactStore, MockTranscoder, Pipeline, PipelineError};
use webmill_storage::RemoteStatus;

async fn serve_mp4(server: &MockServer, name: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/{name}")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "video/mp4")
                .set_body_bytes(body.to_vec()),
        )
        .mount(server)
        .await;
}

fn item(server: &MockServer, name: &str, index: usize) -> WorkItem {
    WorkItem::new(format!("{}/{name}", server.uri()), index)
}

#[tokio::test]
async fn fresh_download_transcodes_and_uploads() {
    let server = MockServer::start().await;
    serve_mp4(&server, "a.mp4", b"mp4 bytes").await;
    let dir = TempDir::new().unwrap();

    let mut transcoder = MockTranscoder::new();
    transcoder
        .expect_transcode()
        .withf(|input, output| {
            input.ends_with("a.mp4") && output.ends_with("0.webm")
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let mut store = MockArtifactStore::new();
    // A fresh download never probes the remote store.
    store.expect_status().times(0);
    store
        .expect_upload()
        .withf(|_, key| key == "0.webm")
        .times(1)
        .returning(|_, _| Ok(()));

    let pipeline = Pipeline::new(reqwest::Client::new(), transcoder, store, dir.path());
    let report = pipeline.run(&[item(&server, "a.mp4", 0)]).await;

    assert_eq!(report.completed, 1);
    assert_eq!(report.failed, 0);
    assert!(report.log.is_empty());
    assert_eq!(
        tokio::fs::read(dir.path().join("a.mp4")).await.unwrap(),
        b"mp4 bytes"
    );
}

#[tokio::test]
async fn second_run_with_remote_artifact_does_nothing() {
    let server = MockServer::start().await;
    serve_mp4(&server, "a.mp4", b"mp4 bytes").await;
    let dir = TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("a.mp4"), b"mp4 bytes")
        .await
        .unwrap();

    let mut transcoder = MockTranscoder::new();
    transcoder.expect_transcode().times(0);

    let mut store = MockArtifactStore::new();
    store
        .expect_status()
        .withf(|key| key == "0.webm")
        .times(1)
        .returning(|_| Ok(RemoteStatus::Present));
    store.expect_upload().times(0);

    let pipeline = Pipeline::new(reqwest::Client::new(), transcoder, store, dir.path());
    let report = pipeline.run(&[item(&server, "a.mp4", 0)]).await;

    assert_eq!(report.already_uploaded, 1);
    assert_eq!(report.completed, 0);
    assert!(report.log.is_empty(), "a fully-processed item logs nothing");
}

#[tokio::test]
async fn resume_reuses_local_file_when_upload_is_missing() {
    let server = MockServer::start().await;
    serve_mp4(&server, "a.mp4", b"fresh network bytes").await;
    let dir = TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("a.mp4"), b"previously downloaded")
        .await
        .unwrap();

    let mut transcoder = MockTranscoder::new();
    transcoder.expect_transcode().times(1).returning(|_, _| Ok(()));

    let mut store = MockArtifactStore::new();
    store
        .expect_status()
        .times(1)
        .returning(|_| Ok(RemoteStatus::Absent));
    store.expect_upload().times(1).returning(|_, _| Ok(()));

    let url = format!("{}/a.mp4", server.uri());
    let pipeline = Pipeline::new(reqwest::Client::new(), transcoder, store, dir.path());
    let report = pipeline.run(&[WorkItem::new(url.as_str(), 0)]).await;

    assert_eq!(report.completed, 1);
    assert_eq!(report.log.lines(), [format!("{url} not uploaded")]);
    // Re-transcoded from the existing local file, no re-download.
    assert_eq!(
        tokio::fs::read(dir.path().join("a.mp4")).await.unwrap(),
        b"previously downloaded"
    );
}

#[tokio::test]
async fn one_failing_item_does_not_halt_the_batch() {
    let server = MockServer::start().await;
    serve_mp4(&server, "a.mp4", b"a").await;
    serve_mp4(&server, "b.mp4", b"b").await;
    serve_mp4(&server, "c.mp4", b"c").await;
    let dir = TempDir::new().unwrap();

    let mut transcoder = MockTranscoder::new();
    transcoder.expect_transcode().times(3).returning(|input, _| {
        if input.ends_with("b.mp4") {
            Err(PipelineError::Io(std::io::Error::other(
                "transcode blew up",
            )))
        } else {
            Ok(())
        }
    });

    let mut store = MockArtifactStore::new();
    store.expect_status().times(0);
    store.expect_upload().times(2).returning(|_, _| Ok(()));

    let items = [
        item(&server, "a.mp4", 0),
        item(&server, "b.mp4", 1),
        item(&server, "c.mp4", 2),
    ];
    let pipeline = Pipeline::new(reqwest::Client::new(), transcoder, store, dir.path());
    let report = pipeline.run(&items).await;

    assert_eq!(report.completed, 2);
    assert_eq!(report.failed, 1);
    let failure_line = format!("Failed to process {}/b.mp4", server.uri());
    assert!(
        report
            .log
            .lines()
            .iter()
            .any(|l| l.starts_with(&failure_line)),
        "log should record the failed item: {:?}",
        report.log.lines()
    );
}

#[tokio::test]
async fn rejected_content_types_touch_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            // `set_body_string` would force the mime to text/plain; set the
            // body and content type together so the header survives.
            ResponseTemplate::new(200)
                .set_body_raw("<html>error</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/song"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(b"mp3".to_vec()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mystery"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    let mut transcoder = MockTranscoder::new();
    transcoder.expect_transcode().times(0);
    let mut store = MockArtifactStore::new();
    store.expect_status().times(0);
    store.expect_upload().times(0);

    let items = [
        item(&server, "page", 0),
        item(&server, "song", 1),
        item(&server, "mystery", 2),
    ];
    let pipeline = Pipeline::new(reqwest::Client::new(), transcoder, store, dir.path());
    let report = pipeline.run(&items).await;

    assert_eq!(report.skipped, 3);
    // The HTML page skips silently; the audio file and the header-less
    // response each leave a warning.
    assert_eq!(report.log.lines().len(), 2);
    assert!(report.log.lines()[0].contains("it's not a video"));
    assert!(report.log.lines()[1].contains("no content type"));

    let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
    assert!(
        entries.next_entry().await.unwrap().is_none(),
        "skips must not create files"
    );
}
