//! Pipeline configuration.

use std::path::PathBuf;

/// Paths the pipeline works with.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Newline-separated URL list
    pub links_file: PathBuf,
    /// Working directory for downloads and transcoded outputs
    pub download_dir: PathBuf,
    /// Warnings file, overwritten at end of run
    pub log_file: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            links_file: PathBuf::from("links.txt"),
            download_dir: PathBuf::from("downloads"),
            log_file: PathBuf::from("logs.txt"),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            links_file: std::env::var("WEBMILL_LINKS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("links.txt")),
            download_dir: std::env::var("WEBMILL_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("downloads")),
            log_file: std::env::var("WEBMILL_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("logs.txt")),
        }
    }
}
