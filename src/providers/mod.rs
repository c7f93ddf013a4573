/*!
 * Boundary with the external ASR and MT collaborators.
 *
 * The speech recognizer and the translator are consumed through narrow
 * interfaces only: the recognizer is a black box returning timestamped
 * segments plus a detected language, the translator a fallible
 * `text, target -> text` function. Raw collaborator output is loosely
 * structured, so it is reshaped into validated [`Segment`] records here,
 * before anything enters the merger.
 */

use async_trait::async_trait;
use log::warn;
use serde::Deserialize;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::ProviderError;
use crate::segments::Segment;

/// Sentinel caption substituted when a single segment's translation fails.
/// Per-segment failures degrade the captions, they never abort the job.
pub const TRANSLATION_FAILED_SENTINEL: &str = "[Translation Failed]";

/// Result of a transcription call: ordered segments plus the language the
/// recognizer detected (a 2- or 3-letter ISO code)
#[derive(Debug, Clone)]
pub struct TranscriptionOutput {
    pub segments: Vec<Segment>,
    pub language: String,
}

/// External speech-recognition collaborator
#[async_trait]
pub trait TranscriptionProvider: Send + Sync + Debug {
    /// Transcribe a media file into ordered, validated segments
    async fn transcribe(&self, media_path: &Path) -> Result<TranscriptionOutput, ProviderError>;
}

/// External machine-translation collaborator
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Translate one segment's text into the target language
    async fn translate(&self, text: &str, target_language: &str)
        -> Result<String, ProviderError>;
}

/// One segment as collaborators emit it: extra fields are ignored, required
/// fields are validated before the segment is accepted
#[derive(Debug, Clone, Deserialize)]
pub struct RawSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Reshape loosely structured collaborator segments into validated records.
///
/// Malformed entries (reversed windows, negative starts, blank text) are
/// rejected with an error naming the first offender; the merger never sees
/// unvalidated data.
pub fn segments_from_raw(raw: Vec<RawSegment>) -> Result<Vec<Segment>, ProviderError> {
    raw.into_iter()
        .enumerate()
        .map(|(i, r)| {
            Segment::new_validated(r.start, r.end, r.text)
                .map_err(|e| ProviderError::MalformedOutput(format!("segment {}: {}", i, e)))
        })
        .collect()
}

/// Translate every segment of a track 1:1, with local recovery.
///
/// A failed translation call substitutes [`TRANSLATION_FAILED_SENTINEL`] for
/// that segment only and continues; timing windows are always preserved.
pub async fn translate_track(
    segments: &[Segment],
    provider: &dyn TranslationProvider,
    target_language: &str,
) -> Vec<Segment> {
    let mut translated = Vec::with_capacity(segments.len());

    for segment in segments {
        let text = match provider.translate(&segment.text, target_language).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!(
                    "Translator returned empty text at {:.3}s, substituting sentinel",
                    segment.start_seconds
                );
                TRANSLATION_FAILED_SENTINEL.to_string()
            }
            Err(e) => {
                warn!(
                    "Translation failed at {:.3}s ({}), substituting sentinel",
                    segment.start_seconds, e
                );
                TRANSLATION_FAILED_SENTINEL.to_string()
            }
        };

        translated.push(Segment::new(segment.start_seconds, segment.end_seconds, text));
    }

    translated
}

pub mod transcript_file;
pub mod mock;
