use std::path::Path;
use log::error;
use serde_json::{Value, from_str};
use tokio::process::Command;

use crate::errors::PipelineError;

// @module: Video stream metadata probing

/// Geometry and timing of the first video stream of a container
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMeta {
    pub width: u32,
    pub height: u32,
    /// Frames per second, as a float for frame-time arithmetic
    pub fps: f64,
    /// The container's exact frame-rate rational ("30000/1001"), passed
    /// through to the encoder so the output clock matches the source
    pub frame_rate: String,
    /// Total frame count when the container reports one
    pub frame_count: Option<u64>,
}

impl VideoMeta {
    /// Bytes per rgb24 frame
    pub fn frame_size(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// Parse an ffprobe frame-rate rational ("30000/1001", "25/1", "30")
pub fn parse_frame_rate(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let fps = match raw.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => raw.parse().ok()?,
    };

    (fps.is_finite() && fps > 0.0).then_some(fps)
}

/// Probe the first video stream of a media file.
///
/// A missing file or a container without a video stream is an input error;
/// an ffprobe failure carries the tool's diagnostics.
pub async fn probe_video(ffprobe_path: &str, video_path: &Path) -> Result<VideoMeta, PipelineError> {
    if !video_path.exists() {
        return Err(PipelineError::Input(format!(
            "Video file not found: {:?}",
            video_path
        )));
    }

    let ffprobe_future = Command::new(ffprobe_path)
        .args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_streams",
            "-select_streams", "v:0",
            video_path.to_str().unwrap_or(""),
        ])
        .output();

    let timeout_duration = std::time::Duration::from_secs(60);
    let output = tokio::select! {
        result = ffprobe_future => {
            result.map_err(|e| PipelineError::ExternalProcess {
                status: -1,
                detail: format!("Failed to execute ffprobe: {}", e),
            })?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(PipelineError::ExternalProcess {
                status: -1,
                detail: "ffprobe timed out after 60 seconds".to_string(),
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("ffprobe failed: {}", stderr);
        return Err(PipelineError::ExternalProcess {
            status: output.status.code().unwrap_or(-1),
            detail: stderr.to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: Value = from_str(&stdout).map_err(|e| {
        PipelineError::ExternalProcess {
            status: 0,
            detail: format!("Failed to parse ffprobe JSON output: {}", e),
        }
    })?;

    let stream = json
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|s| s.first())
        .ok_or_else(|| {
            PipelineError::Input(format!("No video stream in {:?}", video_path))
        })?;

    parse_stream(stream, video_path)
}

fn parse_stream(stream: &Value, video_path: &Path) -> Result<VideoMeta, PipelineError> {
    let width = stream
        .get("width")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| PipelineError::Input(format!("Missing stream width in {:?}", video_path)))?
        as u32;

    let height = stream
        .get("height")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| PipelineError::Input(format!("Missing stream height in {:?}", video_path)))?
        as u32;

    // r_frame_rate is the real base rate; avg_frame_rate can be 0/0 on
    // variable-rate streams
    let frame_rate = stream
        .get("r_frame_rate")
        .and_then(|v| v.as_str())
        .or_else(|| stream.get("avg_frame_rate").and_then(|v| v.as_str()))
        .unwrap_or_default()
        .to_string();

    let fps = parse_frame_rate(&frame_rate).ok_or_else(|| {
        PipelineError::Input(format!(
            "Unusable frame rate {:?} in {:?}",
            frame_rate, video_path
        ))
    })?;

    let frame_count = stream
        .get("nb_frames")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<u64>().ok())
        .or_else(|| {
            // Matroska omits nb_frames; estimate from the stream duration
            stream
                .get("duration")
                .and_then(|v| v.as_str())
                .and_then(|s| s.parse::<f64>().ok())
                .map(|d| (d * fps).round() as u64)
        });

    Ok(VideoMeta {
        width,
        height,
        fps,
        frame_rate,
        frame_count,
    })
}
