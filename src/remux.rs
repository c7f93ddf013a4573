use std::path::Path;
use log::{debug, error, info};
use tokio::process::Command;

use crate::errors::PipelineError;

// @module: Final muxing strategies around the external media tool
//
// The ffmpeg command line is treated as an ABI: input order, filter syntax
// and mapping flags below are load-bearing, covered by the arg-builder tests.

/// Escape a path for use inside an ffmpeg filter expression
fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

/// Arguments for the filter-burn strategy: one invocation that burns the
/// subtitle file into the video stream and stream-copies the audio.
pub fn filter_burn_args(
    source: &Path,
    srt_path: &Path,
    output: &Path,
    font_name: &str,
    font_size_pt: u32,
    fonts_dir: &Path,
) -> Vec<String> {
    let filter = format!(
        "subtitles='{}':fontsdir='{}':force_style='FontName={},FontSize={}'",
        escape_filter_path(srt_path),
        escape_filter_path(fonts_dir),
        font_name,
        font_size_pt,
    );

    vec![
        "-y".to_string(),
        "-v".to_string(),
        "error".to_string(),
        "-i".to_string(),
        source.to_string_lossy().to_string(),
        "-vf".to_string(),
        filter,
        "-c:a".to_string(),
        "copy".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

/// Arguments for the final mux of the render-then-remux strategy: video
/// stream-copied from the silent captioned stream, audio stream-copied from
/// the original source, no re-encode of either.
pub fn mux_args(silent_video: &Path, original: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-v".to_string(),
        "error".to_string(),
        "-i".to_string(),
        silent_video.to_string_lossy().to_string(),
        "-i".to_string(),
        original.to_string_lossy().to_string(),
        "-map".to_string(),
        "0:v:0".to_string(),
        "-map".to_string(),
        "1:a?".to_string(),
        "-c".to_string(),
        "copy".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

/// Arguments for a plain container copy, used when there is nothing to burn
pub fn stream_copy_args(source: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-v".to_string(),
        "error".to_string(),
        "-i".to_string(),
        source.to_string_lossy().to_string(),
        "-c".to_string(),
        "copy".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}

/// Run the external media tool to completion; a non-zero exit carries the
/// tool's filtered diagnostics
pub async fn run_media_tool(tool_path: &str, args: &[String]) -> Result<(), PipelineError> {
    debug!("{} {:?}", tool_path, args);

    let output = Command::new(tool_path)
        .args(args)
        .output()
        .await
        .map_err(|e| PipelineError::ExternalProcess {
            status: -1,
            detail: format!("Failed to execute {}: {}", tool_path, e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = filter_ffmpeg_stderr(&stderr);
        error!("{} failed: {}", tool_path, detail);
        return Err(PipelineError::ExternalProcess {
            status: output.status.code().unwrap_or(-1),
            detail,
        });
    }

    Ok(())
}

/// Filter-burn strategy: single pass, audio untouched
pub async fn burn_with_filter(
    ffmpeg_path: &str,
    source: &Path,
    srt_path: &Path,
    output: &Path,
    font_name: &str,
    font_size_pt: u32,
    fonts_dir: &Path,
) -> Result<(), PipelineError> {
    let args = filter_burn_args(source, srt_path, output, font_name, font_size_pt, fonts_dir);
    run_media_tool(ffmpeg_path, &args).await?;
    info!("Burned captions into {:?}", output);
    Ok(())
}

/// Final mux of the render-then-remux strategy
pub async fn mux_streams(
    ffmpeg_path: &str,
    silent_video: &Path,
    original: &Path,
    output: &Path,
) -> Result<(), PipelineError> {
    let args = mux_args(silent_video, original, output);
    run_media_tool(ffmpeg_path, &args).await?;
    info!("Muxed captioned video with original audio into {:?}", output);
    Ok(())
}

/// Copy the source container unchanged, for jobs with an empty caption track
pub async fn stream_copy(
    ffmpeg_path: &str,
    source: &Path,
    output: &Path,
) -> Result<(), PipelineError> {
    let args = stream_copy_args(source, output);
    run_media_tool(ffmpeg_path, &args).await
}
