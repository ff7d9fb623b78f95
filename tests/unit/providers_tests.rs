/*!
 * Tests for engine response handling and the mock engine
 */

use std::path::Path;
use anyhow::Result;
use sublines::errors::EngineError;
use sublines::providers::{TranscriptionEngine, TranscriptionRequest};
use sublines::providers::mock::MockEngine;
use sublines::providers::whisper_api::VerboseTranscriptionResponse;

/// Test deserializing the local server shape (words nested per segment)
#[test]
fn test_verbose_response_withNestedWords_shouldKeepSegmentWords() -> Result<()> {
    let json = r#"{
        "text": " Hello world.",
        "language": "en",
        "segments": [
            {
                "text": " Hello world.",
                "start": 0.0,
                "end": 1.2,
                "words": [
                    {"word": " Hello", "start": 0.0, "end": 0.5},
                    {"word": " world.", "start": 0.5, "end": 1.2}
                ]
            }
        ]
    }"#;

    let response: VerboseTranscriptionResponse = serde_json::from_str(json)?;
    let transcription = response.into_transcription();

    assert_eq!(transcription.segments.len(), 1);
    assert_eq!(transcription.segments[0].words.len(), 2);
    assert_eq!(transcription.segments[0].words[0].word, " Hello");
    assert_eq!(transcription.word_count(), 2);

    Ok(())
}

/// Test deserializing the hosted API shape (flat top-level words)
#[test]
fn test_verbose_response_withFlatWords_shouldDistributeOntoSegments() -> Result<()> {
    let json = r#"{
        "text": " One two. Three four.",
        "language": "en",
        "duration": 4.0,
        "segments": [
            {"text": " One two.", "start": 0.0, "end": 2.0},
            {"text": " Three four.", "start": 2.0, "end": 4.0}
        ],
        "words": [
            {"word": "One", "start": 0.0, "end": 0.8},
            {"word": "two", "start": 0.8, "end": 1.9},
            {"word": "Three", "start": 2.0, "end": 2.9},
            {"word": "four", "start": 2.9, "end": 4.0}
        ]
    }"#;

    let response: VerboseTranscriptionResponse = serde_json::from_str(json)?;
    let transcription = response.into_transcription();

    assert_eq!(transcription.segments.len(), 2);
    assert_eq!(transcription.segments[0].words.len(), 2);
    assert_eq!(transcription.segments[1].words.len(), 2);
    assert_eq!(transcription.segments[1].words[0].word, "Three");

    Ok(())
}

/// Test flat words with no segments fall back to one synthetic segment
#[test]
fn test_verbose_response_withFlatWordsAndNoSegments_shouldSynthesizeSegment() -> Result<()> {
    let json = r#"{
        "text": "One two",
        "words": [
            {"word": "One", "start": 0.0, "end": 0.8},
            {"word": "two", "start": 0.8, "end": 1.9}
        ]
    }"#;

    let response: VerboseTranscriptionResponse = serde_json::from_str(json)?;
    let transcription = response.into_transcription();

    assert_eq!(transcription.segments.len(), 1);
    assert_eq!(transcription.segments[0].start, 0.0);
    assert_eq!(transcription.segments[0].end, 1.9);
    assert_eq!(transcription.segments[0].words.len(), 2);

    Ok(())
}

/// Test trailing words land on the last segment instead of being dropped
#[test]
fn test_verbose_response_withTrailingWords_shouldAttachToLastSegment() -> Result<()> {
    let json = r#"{
        "text": "a b c",
        "segments": [
            {"text": "a", "start": 0.0, "end": 1.0},
            {"text": "b c", "start": 1.0, "end": 2.0}
        ],
        "words": [
            {"word": "a", "start": 0.0, "end": 0.9},
            {"word": "b", "start": 1.0, "end": 1.9},
            {"word": "c", "start": 2.5, "end": 3.0}
        ]
    }"#;

    let response: VerboseTranscriptionResponse = serde_json::from_str(json)?;
    let transcription = response.into_transcription();

    assert_eq!(transcription.word_count(), 3);
    assert_eq!(transcription.segments[1].words.len(), 2);

    Ok(())
}

/// Test the working mock engine
#[tokio::test]
async fn test_mock_engine_withWorkingBehavior_shouldReturnCannedTranscription() {
    let engine = MockEngine::working();
    let request = TranscriptionRequest::new("base");

    let transcription = engine
        .transcribe(Path::new("test.wav"), &request)
        .await
        .unwrap();

    assert!(!transcription.is_empty());
    assert_eq!(engine.request_count(), 1);
    assert_eq!(engine.name(), "mock");
}

/// Test the failing mock engine
#[tokio::test]
async fn test_mock_engine_withFailingBehavior_shouldReturnRequestFailed() {
    let engine = MockEngine::failing();
    let request = TranscriptionRequest::new("base");

    let result = engine.transcribe(Path::new("test.wav"), &request).await;

    assert!(matches!(result, Err(EngineError::RequestFailed(_))));
    assert!(engine.test_connection().await.is_err());
}

/// Test the empty mock engine names the offending input
#[tokio::test]
async fn test_mock_engine_withEmptyBehavior_shouldReturnEmptyTranscription() {
    let engine = MockEngine::empty();
    let request = TranscriptionRequest::new("base");

    let result = engine.transcribe(Path::new("quiet.wav"), &request).await;

    match result {
        Err(EngineError::EmptyTranscription(input)) => assert!(input.contains("quiet.wav")),
        other => panic!("expected EmptyTranscription, got {:?}", other),
    }
}

/// Test the request builder
#[test]
fn test_transcription_request_withBuilder_shouldSetFields() {
    let request = TranscriptionRequest::new("whisper-1")
        .language("en")
        .temperature(0.2);

    assert_eq!(request.model, "whisper-1");
    assert_eq!(request.language.as_deref(), Some("en"));
    assert_eq!(request.temperature, Some(0.2));
}
