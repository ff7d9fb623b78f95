/*!
 * Tests for error types and conversions
 */

use sublines::errors::{AppError, EngineError, SubtitleError};

#[test]
fn test_engineError_requestFailed_shouldDisplayCorrectly() {
    let error = EngineError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Engine request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_engineError_apiError_shouldDisplayStatusAndMessage() {
    let error = EngineError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_engineError_authenticationError_shouldDisplayCorrectly() {
    let error = EngineError::AuthenticationError("Invalid API key".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Authentication error"));
    assert!(display.contains("Invalid API key"));
}

#[test]
fn test_engineError_emptyTranscription_shouldNameTheInput() {
    let error = EngineError::EmptyTranscription("talk.wav".to_string());
    let display = format!("{}", error);
    assert!(display.contains("empty transcription"));
    assert!(display.contains("talk.wav"));
}

#[test]
fn test_subtitleError_malformedSegment_shouldNameSegmentAndReason() {
    let error = SubtitleError::MalformedSegment {
        segment: 3,
        reason: "word 2 has time range 5 > 4".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("Malformed segment 3"));
    assert!(display.contains("5 > 4"));
}

#[test]
fn test_subtitleError_invalidLineBudget_shouldDisplayValue() {
    let error = SubtitleError::InvalidLineBudget(0);
    let display = format!("{}", error);
    assert!(display.contains("max_chars must be positive"));
}

#[test]
fn test_subtitleError_invalidLineGap_shouldDisplayValue() {
    let error = SubtitleError::InvalidLineGap(-0.05);
    let display = format!("{}", error);
    assert!(display.contains("lines_distance"));
    assert!(display.contains("-0.05"));
}

#[test]
fn test_appError_fromEngineError_shouldWrapCorrectly() {
    let engine_error = EngineError::RequestFailed("Test error".to_string());
    let app_error: AppError = engine_error.into();
    assert!(matches!(app_error, AppError::Engine(_)));
    assert!(format!("{}", app_error).contains("Engine error"));
}

#[test]
fn test_appError_fromSubtitleError_shouldWrapCorrectly() {
    let subtitle_error = SubtitleError::InvalidLineBudget(0);
    let app_error: AppError = subtitle_error.into();
    assert!(matches!(app_error, AppError::Subtitle(_)));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
    assert!(format!("{}", app_error).contains("missing"));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let any_error = anyhow::anyhow!("something odd");
    let app_error: AppError = any_error.into();
    assert!(matches!(app_error, AppError::Unknown(_)));
}
