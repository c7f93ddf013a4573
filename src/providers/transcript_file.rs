/*!
 * Transcript-file provider: consumes the JSON a whisper-style recognizer
 * writes (`{"language": "...", "segments": [{"start", "end", "text"}, ...]}`)
 * so the pipeline can run against a recognizer invoked out of band.
 */

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::errors::ProviderError;
use crate::providers::{
    segments_from_raw, RawSegment, TranscriptionOutput, TranscriptionProvider,
};

#[derive(Debug, Deserialize)]
struct TranscriptDocument {
    #[serde(default = "default_language")]
    language: String,
    segments: Vec<RawSegment>,
}

fn default_language() -> String {
    "und".to_string()
}

/// Reads recognizer output from a JSON file next to the job
#[derive(Debug, Clone)]
pub struct TranscriptFile {
    path: PathBuf,
}

impl TranscriptFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        TranscriptFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Conventional transcript location for a media file: `<stem>.json`
    /// beside the media
    pub fn sibling_of(media_path: &Path) -> Self {
        Self::new(media_path.with_extension("json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TranscriptionProvider for TranscriptFile {
    async fn transcribe(&self, _media_path: &Path) -> Result<TranscriptionOutput, ProviderError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ProviderError::RequestFailed(format!(
                "Cannot read transcript file {:?}: {}",
                self.path, e
            ))
        })?;

        let document: TranscriptDocument = serde_json::from_str(&content).map_err(|e| {
            ProviderError::MalformedOutput(format!(
                "Transcript file {:?} is not valid JSON: {}",
                self.path, e
            ))
        })?;

        Ok(TranscriptionOutput {
            segments: segments_from_raw(document.segments)?,
            language: document.language,
        })
    }
}
