/*!
 * Mock engine implementation for testing.
 *
 * This module provides a mock transcription engine that simulates different
 * behaviors:
 * - `MockEngine::working()` - Always succeeds with a canned transcription
 * - `MockEngine::failing()` - Always fails with an error
 * - `MockEngine::empty()` - Succeeds but reports no speech
 * - `MockEngine::slow(delay_ms)` - Succeeds after a delay
 */

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::EngineError;
use crate::providers::{Transcription, TranscriptSegment, TranscriptWord, TranscriptionEngine, TranscriptionRequest};

/// Behavior mode for the mock engine
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a canned transcription
    Working,
    /// Always fails with a request error
    Failing,
    /// Succeeds but the transcription carries no words
    Empty,
    /// Succeeds after a delay (for timeout testing)
    Slow { delay_ms: u64 },
    /// Returns a caller-supplied transcription
    Fixed(Transcription),
}

/// Mock transcription engine for testing pipeline behavior
#[derive(Debug)]
pub struct MockEngine {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of transcribe calls made against this engine
    request_count: Arc<AtomicUsize>,
}

impl MockEngine {
    /// Create a new mock engine with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock engine that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock engine that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock engine that reports no speech
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock engine that succeeds after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Create a mock engine that returns the given transcription
    pub fn with_transcription(transcription: Transcription) -> Self {
        Self::new(MockBehavior::Fixed(transcription))
    }

    /// Get the number of transcribe calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the request counter, for assertions after a move
    pub fn request_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.request_count)
    }

    /// Canned transcription used by the working behavior
    pub fn canned_transcription() -> Transcription {
        Transcription {
            text: " Hello world, this is a test.".to_string(),
            language: Some("en".to_string()),
            segments: vec![TranscriptSegment {
                text: " Hello world, this is a test.".to_string(),
                start: 0.0,
                end: 2.5,
                words: vec![
                    TranscriptWord { word: " Hello".to_string(), start: 0.0, end: 0.5 },
                    TranscriptWord { word: " world,".to_string(), start: 0.5, end: 1.0 },
                    TranscriptWord { word: " this".to_string(), start: 1.0, end: 1.4 },
                    TranscriptWord { word: " is".to_string(), start: 1.4, end: 1.7 },
                    TranscriptWord { word: " a".to_string(), start: 1.7, end: 1.9 },
                    TranscriptWord { word: " test.".to_string(), start: 1.9, end: 2.5 },
                ],
            }],
        }
    }
}

#[async_trait]
impl TranscriptionEngine for MockEngine {
    async fn transcribe(&self, audio_path: &Path, _request: &TranscriptionRequest) -> Result<Transcription, EngineError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working => Ok(Self::canned_transcription()),
            MockBehavior::Failing => Err(EngineError::RequestFailed(
                "Mock engine configured to fail".to_string(),
            )),
            MockBehavior::Empty => Err(EngineError::EmptyTranscription(
                audio_path.to_string_lossy().to_string(),
            )),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(Self::canned_transcription())
            }
            MockBehavior::Fixed(transcription) => Ok(transcription.clone()),
        }
    }

    async fn test_connection(&self) -> Result<(), EngineError> {
        match self.behavior {
            MockBehavior::Failing => Err(EngineError::ConnectionError(
                "Mock engine configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
