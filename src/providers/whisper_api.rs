use reqwest::{Client, StatusCode, multipart};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use async_trait::async_trait;
use log::{debug, warn};
use url::Url;

use crate::errors::EngineError;
use crate::providers::{Transcription, TranscriptSegment, TranscriptWord, TranscriptionEngine, TranscriptionRequest};

/// Client for an OpenAI-compatible `audio/transcriptions` endpoint
///
/// The same client serves the hosted API and local Whisper servers
/// (whisper.cpp server, faster-whisper-server); the only differences are the
/// endpoint and whether an API key is attached.
#[derive(Debug)]
pub struct WhisperApi {
    /// Base URL of the transcription API, up to and including `/v1`
    base_url: String,
    /// Optional bearer token; local servers run key-less
    api_key: Option<String>,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts on transport errors
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
    /// Engine name reported in logs
    engine_name: &'static str,
}

/// Verbose JSON transcription response
///
/// Local servers report word timestamps nested per segment; the hosted API
/// reports them as a flat top-level array next to the segments. Both shapes
/// deserialize into this struct.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerboseTranscriptionResponse {
    /// Full transcript text
    #[serde(default)]
    pub text: String,
    /// Detected language, if reported
    #[serde(default)]
    pub language: Option<String>,
    /// Audio duration in seconds, if reported
    #[serde(default)]
    pub duration: Option<f64>,
    /// Speech segments
    #[serde(default)]
    pub segments: Vec<VerboseSegment>,
    /// Flat word timestamps (hosted API shape)
    #[serde(default)]
    pub words: Vec<VerboseWord>,
}

/// One segment of the verbose response
#[derive(Debug, Serialize, Deserialize)]
pub struct VerboseSegment {
    /// Segment text
    #[serde(default)]
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Word timestamps nested in the segment (local server shape)
    #[serde(default)]
    pub words: Vec<VerboseWord>,
}

/// One timestamped word of the verbose response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerboseWord {
    /// Raw word text
    pub word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

/// Error payload returned by OpenAI-compatible servers
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl WhisperApi {
    /// Create a client for a key-less local Whisper server
    pub fn local(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, EngineError> {
        Self::build(endpoint, None, timeout_secs, "whisper-server")
    }

    /// Create a client for the hosted API
    pub fn hosted(endpoint: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Result<Self, EngineError> {
        Self::build(endpoint, Some(api_key.into()), timeout_secs, "whisper-api")
    }

    fn build(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
        engine_name: &'static str,
    ) -> Result<Self, EngineError> {
        let endpoint = endpoint.into();
        let base_url = endpoint.trim_end_matches('/').to_string();

        Url::parse(&base_url)
            .map_err(|e| EngineError::ConnectionError(format!("Invalid endpoint URL {}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EngineError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            api_key,
            client,
            max_retries: 2,
            backoff_base_ms: 1000,
            engine_name,
        })
    }

    /// Build the multipart form for one transcription call
    ///
    /// The audio file is read fully into memory; transcription inputs are
    /// bounded by the engines' own upload limits, not by streaming needs.
    fn build_form(&self, audio_path: &Path, request: &TranscriptionRequest) -> Result<multipart::Form, EngineError> {
        let bytes = std::fs::read(audio_path)
            .map_err(|e| EngineError::RequestFailed(format!("Failed to read audio file {:?}: {}", audio_path, e)))?;

        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| EngineError::RequestFailed(format!("Failed to build upload part: {}", e)))?;

        let mut form = multipart::Form::new()
            .part("file", part)
            .text("model", request.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word")
            .text("timestamp_granularities[]", "segment");

        if let Some(language) = &request.language {
            form = form.text("language", language.clone());
        }
        if let Some(temperature) = request.temperature {
            form = form.text("temperature", temperature.to_string());
        }

        Ok(form)
    }

    /// Map a non-success HTTP status to a typed engine error
    fn map_status_error(status: StatusCode, body: &str) -> EngineError {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| body.chars().take(200).collect());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                EngineError::AuthenticationError(message)
            }
            StatusCode::TOO_MANY_REQUESTS => EngineError::RateLimitExceeded(message),
            _ => EngineError::ApiError {
                status_code: status.as_u16(),
                message,
            },
        }
    }
}

impl VerboseTranscriptionResponse {
    /// Convert the wire response into the engine-neutral transcription model
    ///
    /// When word timestamps only arrived as a flat array, they are
    /// distributed onto segments by start-time containment so callers always
    /// see per-segment words. Words past the last segment end up on the last
    /// segment rather than being dropped.
    pub fn into_transcription(self) -> Transcription {
        let flat_words: Vec<TranscriptWord> = self
            .words
            .into_iter()
            .map(|w| TranscriptWord { word: w.word, start: w.start, end: w.end })
            .collect();

        let mut segments: Vec<TranscriptSegment> = self
            .segments
            .into_iter()
            .map(|s| TranscriptSegment {
                text: s.text,
                start: s.start,
                end: s.end,
                words: s.words
                    .into_iter()
                    .map(|w| TranscriptWord { word: w.word, start: w.start, end: w.end })
                    .collect(),
            })
            .collect();

        let needs_distribution = !flat_words.is_empty()
            && segments.iter().all(|s| s.words.is_empty());

        if needs_distribution {
            if segments.is_empty() {
                // No segment boundaries reported at all; treat the whole
                // transcript as one segment covering every word
                let start = flat_words.first().map_or(0.0, |w| w.start);
                let end = flat_words.last().map_or(0.0, |w| w.end);
                segments.push(TranscriptSegment {
                    text: self.text.clone(),
                    start,
                    end,
                    words: flat_words,
                });
            } else {
                let mut cursor = 0;
                let last_idx = segments.len() - 1;
                for (idx, segment) in segments.iter_mut().enumerate() {
                    while cursor < flat_words.len() {
                        let word = &flat_words[cursor];
                        if idx < last_idx && word.start >= segment.end {
                            break;
                        }
                        segment.words.push(word.clone());
                        cursor += 1;
                    }
                }
            }
        }

        Transcription {
            text: self.text,
            language: self.language,
            segments,
        }
    }
}

#[async_trait]
impl TranscriptionEngine for WhisperApi {
    async fn transcribe(&self, audio_path: &Path, request: &TranscriptionRequest) -> Result<Transcription, EngineError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let mut attempt = 0;
        loop {
            // multipart forms are consumed on send, so rebuild per attempt
            let form = self.build_form(audio_path, request)?;

            let mut http_request = self.client.post(&url).multipart(form);
            if let Some(api_key) = &self.api_key {
                http_request = http_request.bearer_auth(api_key);
            }

            match http_request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.map_err(|e| {
                        EngineError::RequestFailed(format!("Failed to read engine response: {}", e))
                    })?;

                    if !status.is_success() {
                        return Err(Self::map_status_error(status, &body));
                    }

                    let parsed: VerboseTranscriptionResponse = serde_json::from_str(&body)
                        .map_err(|e| EngineError::ParseError(format!("{}", e)))?;

                    let transcription = parsed.into_transcription();
                    if transcription.is_empty() {
                        return Err(EngineError::EmptyTranscription(
                            audio_path.to_string_lossy().to_string(),
                        ));
                    }

                    debug!(
                        "Engine returned {} segments / {} words for {:?}",
                        transcription.segments.len(),
                        transcription.word_count(),
                        audio_path
                    );
                    return Ok(transcription);
                }
                Err(e) if attempt < self.max_retries && (e.is_connect() || e.is_timeout()) => {
                    let backoff = self.backoff_base_ms * (1 << attempt);
                    warn!(
                        "Engine request failed ({}), retrying in {}ms (attempt {}/{})",
                        e, backoff, attempt + 1, self.max_retries
                    );
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(EngineError::ConnectionError(format!("{}", e)));
                }
            }
        }
    }

    async fn test_connection(&self) -> Result<(), EngineError> {
        let url = format!("{}/models", self.base_url);

        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EngineError::ConnectionError(format!("{}", e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Self::map_status_error(status, &body))
        }
    }

    fn name(&self) -> &'static str {
        self.engine_name
    }
}
