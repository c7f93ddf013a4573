/*!
 * Common test utilities for the subburn test suite
 */

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use tempfile::TempDir;

use subburn::segments::Segment;

/// Initialize logging for tests that want visible pipeline output
/// (RUST_LOG=debug cargo test)
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A short three-segment track with one-second silences between captions
pub fn sample_segments() -> Vec<Segment> {
    vec![
        Segment::new(0.0, 1.5, "This is a test caption."),
        Segment::new(3.0, 4.5, "It has multiple segments."),
        Segment::new(6.0, 7.5, "For testing purposes."),
    ]
}

/// A whisper-style transcript document matching `sample_segments`
pub fn sample_transcript_json() -> &'static str {
    r#"{
  "language": "en",
  "segments": [
    {"id": 0, "start": 0.0, "end": 1.5, "text": "This is a test caption.", "avg_logprob": -0.2},
    {"id": 1, "start": 3.0, "end": 4.5, "text": "It has multiple segments.", "avg_logprob": -0.3},
    {"id": 2, "start": 6.0, "end": 7.5, "text": "For testing purposes.", "avg_logprob": -0.25}
  ]
}"#
}

/// Locate a usable TTF/OTF on the host for compositing tests.
///
/// Compositing needs a real font face to rasterize; tests that call this
/// skip themselves on hosts without one rather than fail.
pub fn find_test_font() -> Option<PathBuf> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ];

    for candidate in CANDIDATES {
        let path = PathBuf::from(candidate);
        if path.is_file() {
            return Some(path);
        }
    }

    // Fall back to the first face found under the usual font roots
    for root in ["/usr/share/fonts", "/usr/local/share/fonts"] {
        for entry in walkdir_fonts(root) {
            return Some(entry);
        }
    }

    None
}

fn walkdir_fonts(root: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let Ok(entries) = fs::read_dir(root) else {
        return found;
    };

    let mut stack: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(children) = fs::read_dir(&path) {
                stack.extend(children.flatten().map(|e| e.path()));
            }
        } else if matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("ttf") | Some("otf")
        ) {
            found.push(path);
            break;
        }
    }

    found
}
