//! FFmpeg invocation and HTTP fetch layer for webmill.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building and an async runner
//! - The fixed WebM (VP9/Opus) transcode parameter set
//! - Streaming download of a response body to an exclusively-created file

pub mod command;
pub mod error;
pub mod fetch;
pub mod transcode;

pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use fetch::fetch_to_file;
pub use transcode::{transcode_to_webm, webm_command};
