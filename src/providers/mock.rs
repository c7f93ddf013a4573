/*!
 * Mock providers for testing.
 *
 * - `MockTranslation::working()` - echoes the input with a marker prefix
 * - `MockTranslation::failing()` - always fails
 * - `MockTranslation::intermittent(n)` - fails every nth request
 * - `MockTranscription::with_segments(...)` - returns a canned transcript
 */

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::{
    TranscriptionOutput, TranscriptionProvider, TranslationProvider,
};
use crate::segments::Segment;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, prefixing the text so tests can assert it ran
    Working,
    /// Fails every nth request
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Succeeds but returns an empty string
    Empty,
}

/// Mock translation collaborator
#[derive(Debug)]
pub struct MockTranslation {
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
}

impl MockTranslation {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for MockTranslation {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Working => Ok(format!("[{}] {}", target_language, text)),
            MockBehavior::Intermittent { fail_every } if count % fail_every == 0 => Err(
                ProviderError::RequestFailed(format!("simulated failure on request {}", count)),
            ),
            MockBehavior::Intermittent { .. } => {
                Ok(format!("[{}] {}", target_language, text))
            }
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "simulated permanent failure".to_string(),
            )),
            MockBehavior::Empty => Ok(String::new()),
        }
    }
}

/// Mock transcription collaborator returning a canned segment list
#[derive(Debug)]
pub struct MockTranscription {
    segments: Vec<Segment>,
    language: String,
    fail: bool,
}

impl MockTranscription {
    pub fn with_segments(segments: Vec<Segment>, language: &str) -> Self {
        Self {
            segments,
            language: language.to_string(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            segments: Vec::new(),
            language: String::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl TranscriptionProvider for MockTranscription {
    async fn transcribe(&self, media_path: &Path) -> Result<TranscriptionOutput, ProviderError> {
        if self.fail {
            return Err(ProviderError::Unavailable(format!(
                "simulated recognizer failure for {:?}",
                media_path
            )));
        }

        Ok(TranscriptionOutput {
            segments: self.segments.clone(),
            language: self.language.clone(),
        })
    }
}
