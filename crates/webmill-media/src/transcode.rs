//! The fixed WebM transcode parameter set.
//!
//! One input family, one output: VP9 video and Opus audio in a WebM
//! container, with non-configurable quality, threading, and multiplexing
//! parameters.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Build the fixed VP9/Opus WebM command for a source/destination pair.
pub fn webm_command(input: impl AsRef<Path>, output: impl AsRef<Path>) -> FfmpegCommand {
    FfmpegCommand::new(input, output)
        .output_args(["-max_muxing_queue_size", "4096"])
        .threads(16)
        .output_args(["-row-mt", "1"])
        .crf(20)
        .output_args(["-qmin", "1"])
        .output_args(["-qmax", "51"])
        .output_args(["-b:v", "0"])
        .video_codec("libvpx-vp9")
        .output_args(["-tile-columns", "4"])
        .output_args(["-auto-alt-ref", "1"])
        .output_args(["-lag-in-frames", "25"])
        .format("webm")
        .output_args(["-ss", "0"])
        .audio_bitrate(128_000)
        .audio_sample_rate(48_000)
        .audio_codec("libopus")
}

/// Transcode a local source file to WebM at the destination path.
///
/// Resolves on successful exit; a spawn failure or non-zero exit propagates
/// as an item-level error. No retry.
pub async fn transcode_to_webm(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!(
        input = %input.display(),
        output = %output.display(),
        "Transcoding to WebM"
    );

    FfmpegRunner::new().run(&webm_command(input, output)).await?;

    info!(output = %output.display(), "Transcode complete");
    Ok(())
}
