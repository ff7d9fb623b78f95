/*!
 * Engine implementations for speech-to-text transcription.
 *
 * This module contains client implementations for transcription engines:
 * - WhisperApi: OpenAI-compatible transcription endpoint (hosted API or a
 *   local Whisper server such as whisper.cpp / faster-whisper-server)
 * - Mock: deterministic engine for tests
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;

use crate::errors::EngineError;

/// One timestamped word as reported by the engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptWord {
    /// Raw word text, whitespace and punctuation included
    pub word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

/// A contiguous span of transcribed speech
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptSegment {
    /// Segment text as rendered by the engine
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Word-level timestamps within this segment
    #[serde(default)]
    pub words: Vec<TranscriptWord>,
}

/// Full transcription result for one audio input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transcription {
    /// Full transcript text
    #[serde(default)]
    pub text: String,
    /// Detected or requested language, if the engine reports one
    #[serde(default)]
    pub language: Option<String>,
    /// Ordered speech segments with word-level timestamps
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

impl Transcription {
    // @returns: true when no segment carries any word
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.words.is_empty())
    }

    // @returns: Total word count across segments
    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|s| s.words.len()).sum()
    }
}

/// Parameters for a single transcription request
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// Model name, e.g. "whisper-1"
    pub model: String,
    /// ISO 639-1 language hint, or None for engine auto-detection
    pub language: Option<String>,
    /// Sampling temperature, None for the engine default
    pub temperature: Option<f32>,
}

impl TranscriptionRequest {
    /// Create a request for the given model with engine defaults
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            language: None,
            temperature: None,
        }
    }

    /// Set the language hint
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Common trait for all transcription engines
///
/// This trait defines the interface that all engine implementations must follow.
/// It is object safe so the controller can hold whichever engine the
/// configuration selects behind a `Box<dyn TranscriptionEngine>`.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync + Debug {
    /// Transcribe one audio file with word-level timestamps
    ///
    /// # Arguments
    /// * `audio_path` - Path to the audio file to transcribe
    /// * `request` - Model and decoding parameters for this call
    ///
    /// # Returns
    /// * `Result<Transcription, EngineError>` - The full transcription or an error
    async fn transcribe(&self, audio_path: &Path, request: &TranscriptionRequest) -> Result<Transcription, EngineError>;

    /// Test the connection to the engine
    ///
    /// # Returns
    /// * `Result<(), EngineError>` - Ok if the engine is reachable, or an error
    async fn test_connection(&self) -> Result<(), EngineError>;

    /// Short engine name for logs
    fn name(&self) -> &'static str;
}

pub mod whisper_api;
pub mod mock;
