/*!
 * Tests for the ASR/MT boundary: reshaping, sentinel recovery, transcript files
 */

use std::path::Path;
use subburn::providers::mock::{MockTranscription, MockTranslation};
use subburn::providers::transcript_file::TranscriptFile;
use subburn::providers::{
    segments_from_raw, translate_track, RawSegment, TranscriptionProvider,
    TRANSLATION_FAILED_SENTINEL,
};
use subburn::segments::Segment;
use crate::common;

#[test]
fn test_segments_from_raw_withValidEntries_shouldValidateAll() {
    let raw = vec![
        RawSegment { start: 0.0, end: 1.0, text: "one".to_string() },
        RawSegment { start: 1.5, end: 2.0, text: " two ".to_string() },
    ];

    let segments = segments_from_raw(raw).unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].text, "two");
}

#[test]
fn test_segments_from_raw_withReversedWindow_shouldNameOffender() {
    let raw = vec![
        RawSegment { start: 0.0, end: 1.0, text: "fine".to_string() },
        RawSegment { start: 3.0, end: 2.0, text: "broken".to_string() },
    ];

    let error = segments_from_raw(raw).unwrap_err();
    assert!(error.to_string().contains("segment 1"), "got: {}", error);
}

/// Collaborator output carries extra fields; only start/end/text matter
#[test]
fn test_raw_segment_withExtraJsonFields_shouldIgnoreThem() {
    let json = r#"{"id": 7, "seek": 120, "start": 1.0, "end": 2.0, "text": "hi", "temperature": 0.0}"#;
    let raw: RawSegment = serde_json::from_str(json).unwrap();
    assert_eq!(raw.start, 1.0);
    assert_eq!(raw.end, 2.0);
    assert_eq!(raw.text, "hi");
}

#[tokio::test]
async fn test_translate_track_withWorkingProvider_shouldTranslateAll() {
    let segments = common::sample_segments();
    let provider = MockTranslation::working();

    let translated = translate_track(&segments, &provider, "es").await;

    assert_eq!(translated.len(), segments.len());
    for (original, result) in segments.iter().zip(&translated) {
        assert_eq!(result.start_seconds, original.start_seconds);
        assert_eq!(result.end_seconds, original.end_seconds);
        assert_eq!(result.text, format!("[es] {}", original.text));
    }
}

/// A dead translator degrades every caption, it never aborts the job
#[tokio::test]
async fn test_translate_track_withFailingProvider_shouldSubstituteSentinel() {
    let segments = common::sample_segments();
    let provider = MockTranslation::failing();

    let translated = translate_track(&segments, &provider, "es").await;

    assert_eq!(translated.len(), segments.len());
    for result in &translated {
        assert_eq!(result.text, TRANSLATION_FAILED_SENTINEL);
    }
}

/// Only the failing segments degrade, the rest keep their translations
#[tokio::test]
async fn test_translate_track_withIntermittentProvider_shouldRecoverLocally() {
    let segments = common::sample_segments();
    let provider = MockTranslation::intermittent(2);

    let translated = translate_track(&segments, &provider, "es").await;

    assert_eq!(translated[0].text, format!("[es] {}", segments[0].text));
    assert_eq!(translated[1].text, TRANSLATION_FAILED_SENTINEL);
    assert_eq!(translated[2].text, format!("[es] {}", segments[2].text));
}

#[tokio::test]
async fn test_translate_track_withEmptyResponses_shouldSubstituteSentinel() {
    let segments = common::sample_segments();
    let provider = MockTranslation::empty();

    let translated = translate_track(&segments, &provider, "es").await;
    assert!(translated.iter().all(|s| s.text == TRANSLATION_FAILED_SENTINEL));
}

#[tokio::test]
async fn test_transcript_file_withWhisperJson_shouldLoadSegments() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "movie.json",
        common::sample_transcript_json(),
    )
    .unwrap();

    let provider = TranscriptFile::new(&path);
    let output = provider.transcribe(Path::new("movie.mkv")).await.unwrap();

    assert_eq!(output.language, "en");
    assert_eq!(output.segments.len(), 3);
    assert_eq!(output.segments[0].text, "This is a test caption.");
}

#[tokio::test]
async fn test_transcript_file_withMissingLanguage_shouldDefaultToUnd() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "bare.json",
        r#"{"segments": [{"start": 0.0, "end": 1.0, "text": "hi"}]}"#,
    )
    .unwrap();

    let output = TranscriptFile::new(&path)
        .transcribe(Path::new("x.mkv"))
        .await
        .unwrap();
    assert_eq!(output.language, "und");
}

#[tokio::test]
async fn test_transcript_file_withInvalidJson_shouldReportMalformed() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "broken.json",
        "{not json",
    )
    .unwrap();

    let error = TranscriptFile::new(&path)
        .transcribe(Path::new("x.mkv"))
        .await
        .unwrap_err();
    assert!(error.to_string().contains("not valid JSON"), "got: {}", error);
}

#[tokio::test]
async fn test_transcript_file_withMissingFile_shouldReportRequestFailure() {
    let error = TranscriptFile::new("nope/missing.json")
        .transcribe(Path::new("x.mkv"))
        .await
        .unwrap_err();
    assert!(error.to_string().contains("Cannot read"), "got: {}", error);
}

#[test]
fn test_transcript_file_siblingOf_shouldSwapExtension() {
    let provider = TranscriptFile::sibling_of(Path::new("/media/movie.mkv"));
    assert_eq!(provider.path(), Path::new("/media/movie.json"));
}

#[tokio::test]
async fn test_mock_transcription_withCannedSegments_shouldReturnThem() {
    let provider = MockTranscription::with_segments(
        vec![Segment::new(0.0, 1.0, "hello")],
        "fr",
    );

    let output = provider.transcribe(Path::new("x.mkv")).await.unwrap();
    assert_eq!(output.language, "fr");
    assert_eq!(output.segments.len(), 1);
}
