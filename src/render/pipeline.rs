use std::path::Path;
use std::process::Stdio;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};

use crate::errors::PipelineError;
use crate::render::overlay::{draw_caption, CaptionStyle, LoadedFont};
use crate::render::probe::VideoMeta;
use crate::segments::Segment;

// @module: Sequential frame loop producing a silent captioned stream

/// Caption activation state carried across the frame loop.
///
/// The cursor only moves forward: once a segment's end time has passed it is
/// skipped permanently and never re-shown, which holds as long as frame
/// times are fed in presentation order.
#[derive(Debug, Default)]
pub struct CaptionCursor {
    index: usize,
}

impl CaptionCursor {
    pub fn new() -> Self {
        CaptionCursor { index: 0 }
    }

    /// Caption text active at `frame_time`, if any.
    ///
    /// A segment is active on the closed interval `[start, end]`; a frame
    /// before the current segment's start or after the last segment gets no
    /// caption.
    pub fn active_text<'a>(&mut self, segments: &'a [Segment], frame_time: f64) -> Option<&'a str> {
        while self.index < segments.len() && frame_time > segments[self.index].end_seconds {
            self.index += 1;
        }

        let segment = segments.get(self.index)?;
        (segment.start_seconds <= frame_time && frame_time <= segment.end_seconds)
            .then_some(segment.text.as_str())
    }
}

/// Read exactly one frame; Ok(false) on a clean end of stream, an error when
/// the stream ends inside a frame
async fn read_frame<R: AsyncRead + Unpin>(
    reader: &mut R,
    buffer: &mut [u8],
) -> std::io::Result<bool> {
    let mut filled = 0;
    while filled < buffer.len() {
        let n = reader.read(&mut buffer[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(false);
            }
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        filled += n;
    }
    Ok(true)
}

/// Drain a child's stderr concurrently so the pipe never stalls the tool
fn spawn_stderr_drain(child: &mut Child) -> tokio::task::JoinHandle<String> {
    let stderr = child.stderr.take();
    tokio::spawn(async move {
        let mut collected = String::new();
        if let Some(mut stderr) = stderr {
            let _ = stderr.read_to_string(&mut collected).await;
        }
        collected
    })
}

fn frame_progress_bar(frame_count: Option<u64>) -> ProgressBar {
    let progress = match frame_count {
        Some(total) => ProgressBar::new(total),
        None => ProgressBar::new_spinner(),
    };

    let template_result = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames ({percent}%) {msg}")
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(template_result.progress_chars("█▓▒░"));

    progress
}

/// Walk the source's video frames in presentation order, composite the
/// active caption onto each, and write a silent H.264 stream to `dest`.
///
/// The loop is strictly sequential: decode, overlay, encode, one frame at a
/// time, with the segment cursor as the only carried state. Audio is never
/// touched here. Any failure to read or write a frame aborts the job;
/// resuming mid-stream could desynchronize audio and video downstream.
pub async fn render_silent(
    ffmpeg_path: &str,
    source: &Path,
    meta: &VideoMeta,
    segments: &[Segment],
    font: &LoadedFont,
    style: &CaptionStyle,
    dest: &Path,
) -> Result<(), PipelineError> {
    let frame_size = meta.frame_size();
    let geometry = format!("{}x{}", meta.width, meta.height);

    let mut decoder = Command::new(ffmpeg_path)
        .args([
            "-v", "error",
            "-i", source.to_str().unwrap_or_default(),
            "-map", "0:v:0",
            "-f", "rawvideo",
            "-pix_fmt", "rgb24",
            "pipe:1",
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| PipelineError::ExternalProcess {
            status: -1,
            detail: format!("Failed to spawn ffmpeg decoder: {}", e),
        })?;

    let mut encoder = Command::new(ffmpeg_path)
        .args([
            "-y",
            "-v", "error",
            "-f", "rawvideo",
            "-pix_fmt", "rgb24",
            "-s", &geometry,
            "-r", &meta.frame_rate,
            "-i", "pipe:0",
            "-an",
            "-c:v", "libx264",
            "-preset", "medium",
            "-crf", "18",
            "-pix_fmt", "yuv420p",
            dest.to_str().unwrap_or_default(),
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| PipelineError::ExternalProcess {
            status: -1,
            detail: format!("Failed to spawn ffmpeg encoder: {}", e),
        })?;

    let decoder_stderr = spawn_stderr_drain(&mut decoder);
    let encoder_stderr = spawn_stderr_drain(&mut encoder);

    let mut decoded = decoder
        .stdout
        .take()
        .ok_or_else(|| PipelineError::FrameIo("Failed to capture decoder stdout".to_string()))?;
    let mut encoding = encoder
        .stdin
        .take()
        .ok_or_else(|| PipelineError::FrameIo("Failed to capture encoder stdin".to_string()))?;

    let progress = frame_progress_bar(meta.frame_count);
    let mut cursor = CaptionCursor::new();
    let mut buffer = vec![0u8; frame_size];
    let mut frame_index: u64 = 0;

    loop {
        match read_frame(&mut decoded, &mut buffer).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                return Err(PipelineError::FrameIo(format!(
                    "Failed to decode frame {}: {}",
                    frame_index, e
                )));
            }
        }

        let frame_time = frame_index as f64 / meta.fps;
        if let Some(text) = cursor.active_text(segments, frame_time) {
            let mut frame = image::RgbImage::from_raw(
                meta.width,
                meta.height,
                std::mem::take(&mut buffer),
            )
            .ok_or_else(|| {
                PipelineError::FrameIo(format!("Frame {} has an unexpected size", frame_index))
            })?;

            draw_caption(&mut frame, font, style, text);
            buffer = frame.into_raw();
        }

        encoding.write_all(&buffer).await.map_err(|e| {
            PipelineError::FrameIo(format!("Failed to encode frame {}: {}", frame_index, e))
        })?;

        frame_index += 1;
        progress.inc(1);
    }

    progress.finish_and_clear();

    // Closing stdin flushes the encoder and lets it finalize the container
    encoding.shutdown().await.map_err(|e| {
        PipelineError::FrameIo(format!("Failed to flush encoder input: {}", e))
    })?;
    drop(encoding);

    let decoder_status = decoder.wait().await.map_err(|e| PipelineError::ExternalProcess {
        status: -1,
        detail: format!("Failed to wait for decoder: {}", e),
    })?;
    let encoder_status = encoder.wait().await.map_err(|e| PipelineError::ExternalProcess {
        status: -1,
        detail: format!("Failed to wait for encoder: {}", e),
    })?;

    if !decoder_status.success() {
        let detail = decoder_stderr.await.unwrap_or_default();
        return Err(PipelineError::ExternalProcess {
            status: decoder_status.code().unwrap_or(-1),
            detail: crate::remux::filter_ffmpeg_stderr(&detail),
        });
    }

    if !encoder_status.success() {
        let detail = encoder_stderr.await.unwrap_or_default();
        return Err(PipelineError::ExternalProcess {
            status: encoder_status.code().unwrap_or(-1),
            detail: crate::remux::filter_ffmpeg_stderr(&detail),
        });
    }

    debug!("Rendered {} frames to {:?}", frame_index, dest);
    info!("Silent captioned stream complete ({} frames)", frame_index);

    Ok(())
}
