//! Batch transcode-and-upload binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use webmill_models::parse_link_list;
use webmill_pipeline::{FfmpegTranscoder, Pipeline, PipelineConfig, S3ArtifactStore};
use webmill_storage::{RemoteProbe, S3Client, StorageConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("webmill=info"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_file(false)
                .with_line_number(false),
        )
        .with(env_filter)
        .init();

    info!("Starting webmill");

    let config = PipelineConfig::from_env();
    info!("Pipeline config: {:?}", config);

    let storage_config = match StorageConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load storage config: {}", e);
            std::process::exit(1);
        }
    };

    // One clear startup failure instead of an opaque spawn error per item.
    if let Err(e) = webmill_media::check_ffmpeg() {
        error!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = tokio::fs::create_dir_all(&config.download_dir).await {
        error!(
            "Failed to create download directory {}: {}",
            config.download_dir.display(),
            e
        );
        std::process::exit(1);
    }

    // The only fatal I/O in the run: no link list, no work.
    let text = match tokio::fs::read_to_string(&config.links_file).await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to read link list {}: {}",
                config.links_file.display(),
                e
            );
            std::process::exit(1);
        }
    };
    let items = parse_link_list(&text);
    info!(items = items.len(), "Parsed link list");

    let http = reqwest::Client::new();
    let s3 = S3Client::new(&storage_config).await;
    let probe = RemoteProbe::new(http.clone(), storage_config.public_base_url.clone());
    let store = S3ArtifactStore::new(s3, probe);

    let pipeline = Pipeline::new(http, FfmpegTranscoder::new(), store, &config.download_dir);
    let report = pipeline.run(&items).await;

    if let Err(e) = report.log.write_to(&config.log_file).await {
        error!(
            "Failed to write log file {}: {}",
            config.log_file.display(),
            e
        );
        std::process::exit(1);
    }

    info!(
        completed = report.completed,
        already_uploaded = report.already_uploaded,
        skipped = report.skipped,
        failed = report.failed,
        warnings = report.log.lines().len(),
        "Run complete"
    );
}
