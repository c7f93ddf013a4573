use std::fs::File;
use std::io::Write;
use std::path::Path;
use anyhow::{Result, Context};

use crate::segments::CaptionTrack;

// @module: SRT interchange format writer
//
// Write-only by design: this pipeline regenerates the subtitle file from the
// caption track at any time and never reads one back. The emitted format must
// stay parseable by third-party subtitle tools, which is the compatibility
// contract covered by the golden tests.

/// Convert floating-point seconds to whole milliseconds.
///
/// Rounds at microsecond precision first, then half-up to milliseconds.
/// Values like 1.2345 have no exact binary representation and a single
/// rounding step would misplace them by one millisecond, drifting every
/// timestamp derived from decimal input.
pub fn seconds_to_ms(seconds: f64) -> u64 {
    let micros = (seconds * 1_000_000.0).round() as u64;
    (micros + 500) / 1000
}

/// Format a millisecond timestamp as SRT format (HH:MM:SS,mmm)
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Serialize a caption track to SRT text.
///
/// Blocks are `index / timecode range / text / blank line` with a 1-based
/// sequential index and comma millisecond separator. Identical input
/// produces byte-identical output. An empty track serializes to an empty
/// string, which is a valid empty-body subtitle file.
pub fn serialize(track: &CaptionTrack) -> String {
    let mut out = String::new();

    for (i, segment) in track.segments().iter().enumerate() {
        out.push_str(&(i + 1).to_string());
        out.push('\n');
        out.push_str(&format_timestamp(seconds_to_ms(segment.start_seconds)));
        out.push_str(" --> ");
        out.push_str(&format_timestamp(seconds_to_ms(segment.end_seconds)));
        out.push('\n');
        out.push_str(&segment.text);
        out.push_str("\n\n");
    }

    out
}

/// Serialize a caption track and write it to disk as UTF-8.
pub fn write_to_srt<P: AsRef<Path>>(track: &CaptionTrack, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

    file.write_all(serialize(track).as_bytes())
        .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

    Ok(())
}
