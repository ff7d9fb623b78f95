use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::subtitle_builder::{DEFAULT_LINES_DISTANCE, DEFAULT_MAX_CHARS};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Spoken language hint (ISO code), empty for engine auto-detection
    #[serde(default)]
    pub language: String,

    /// Line packing config
    #[serde(default)]
    pub line: LineConfig,

    /// Transcription config
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Transcription engine type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionEngineKind {
    // @engine: Local Whisper server (whisper.cpp / faster-whisper, OpenAI-compatible)
    #[default]
    #[serde(rename = "whisper-server")]
    WhisperServer,
    // @engine: Hosted OpenAI-compatible transcription API
    #[serde(rename = "whisper-api")]
    WhisperApi,
}

impl TranscriptionEngineKind {
    // @returns: Capitalized engine name
    pub fn display_name(&self) -> &str {
        match self {
            Self::WhisperServer => "Whisper server",
            Self::WhisperApi => "Whisper API",
        }
    }

    // @returns: Lowercase engine identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::WhisperServer => "whisper-server".to_string(),
            Self::WhisperApi => "whisper-api".to_string(),
        }
    }
}

// Implement Display trait for TranscriptionEngineKind
impl std::fmt::Display for TranscriptionEngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranscriptionEngineKind
impl std::str::FromStr for TranscriptionEngineKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "whisper-server" | "whisperserver" => Ok(Self::WhisperServer),
            "whisper-api" | "whisperapi" => Ok(Self::WhisperApi),
            _ => Err(anyhow!("Invalid engine type: {}", s)),
        }
    }
}

/// Engine configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    // @field: Engine type identifier
    #[serde(rename = "type")]
    pub engine_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Max concurrent transcriptions
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl EngineConfig {
    // @param engine_type: Engine enum
    // @returns: Engine config with defaults
    pub fn new(engine_type: TranscriptionEngineKind) -> Self {
        match engine_type {
            TranscriptionEngineKind::WhisperServer => Self {
                engine_type: "whisper-server".to_string(),
                model: default_whisper_server_model(),
                api_key: String::new(),
                endpoint: default_whisper_server_endpoint(),
                concurrent_requests: default_concurrent_requests(),
                timeout_secs: default_timeout_secs(),
            },
            TranscriptionEngineKind::WhisperApi => Self {
                engine_type: "whisper-api".to_string(),
                model: default_whisper_api_model(),
                api_key: String::new(),
                endpoint: default_whisper_api_endpoint(),
                concurrent_requests: default_concurrent_requests(),
                timeout_secs: default_whisper_api_timeout_secs(),
            },
        }
    }
}

/// Line packing configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LineConfig {
    /// Soft character budget per subtitle line
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Gap in seconds inserted between time-abutting lines
    #[serde(default = "default_lines_distance")]
    pub lines_distance: f64,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            lines_distance: default_lines_distance(),
        }
    }
}

/// Transcription service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    /// Transcription engine to use
    #[serde(default)]
    pub engine: TranscriptionEngineKind,

    /// Available transcription engines
    #[serde(default)]
    pub available_engines: Vec<EngineConfig>,

    /// Sampling temperature passed to the engine
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn default_lines_distance() -> f64 {
    DEFAULT_LINES_DISTANCE
}

fn default_concurrent_requests() -> usize {
    2
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_whisper_api_timeout_secs() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.0
}

fn default_whisper_server_endpoint() -> String {
    "http://localhost:8000/v1".to_string()
}

fn default_whisper_api_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_whisper_server_model() -> String {
    "base".to_string()
}

fn default_whisper_api_model() -> String {
    "whisper-1".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate line packing parameters up front so a bad budget is
        // rejected before any transcription work happens
        if self.line.max_chars == 0 {
            return Err(anyhow!("line.max_chars must be positive"));
        }
        if !self.line.lines_distance.is_finite() || self.line.lines_distance < 0.0 {
            return Err(anyhow!(
                "line.lines_distance must be a non-negative number of seconds, got {}",
                self.line.lines_distance
            ));
        }

        // Validate the language hint when one is set
        if !self.language.is_empty() {
            let _name = crate::language_utils::get_language_name(&self.language)?;
        }

        // The hosted API refuses key-less requests; fail early instead
        if self.transcription.engine == TranscriptionEngineKind::WhisperApi
            && self.transcription.get_api_key().is_empty()
        {
            return Err(anyhow!("Transcription API key is required for the whisper-api engine"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: String::new(),
            line: LineConfig::default(),
            transcription: TranscriptionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranscriptionConfig {
    /// Get the active engine configuration from the available_engines array
    pub fn get_active_engine_config(&self) -> Option<&EngineConfig> {
        let engine_str = self.engine.to_lowercase_string();
        self.available_engines.iter()
            .find(|e| e.engine_type == engine_str)
    }

    /// Get a specific engine configuration by type
    pub fn get_engine_config(&self, engine_type: &TranscriptionEngineKind) -> Option<&EngineConfig> {
        let engine_str = engine_type.to_lowercase_string();
        self.available_engines.iter()
            .find(|e| e.engine_type == engine_str)
    }

    /// Get the model for the active engine
    pub fn get_model(&self) -> String {
        if let Some(engine_config) = self.get_active_engine_config() {
            if !engine_config.model.is_empty() {
                return engine_config.model.clone();
            }
        }

        // Default fallback based on engine type
        match self.engine {
            TranscriptionEngineKind::WhisperServer => default_whisper_server_model(),
            TranscriptionEngineKind::WhisperApi => default_whisper_api_model(),
        }
    }

    /// Get the API key for the active engine
    pub fn get_api_key(&self) -> String {
        if let Some(engine_config) = self.get_active_engine_config() {
            if !engine_config.api_key.is_empty() {
                return engine_config.api_key.clone();
            }
        }

        // Default fallback - the local server doesn't use API keys
        String::new()
    }

    /// Get the endpoint for the active engine
    pub fn get_endpoint(&self) -> String {
        if let Some(engine_config) = self.get_active_engine_config() {
            if !engine_config.endpoint.is_empty() {
                return engine_config.endpoint.clone();
            }
        }

        // Default fallback based on engine type
        match self.engine {
            TranscriptionEngineKind::WhisperServer => default_whisper_server_endpoint(),
            TranscriptionEngineKind::WhisperApi => default_whisper_api_endpoint(),
        }
    }

    /// Get the request timeout for the active engine
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(engine_config) = self.get_active_engine_config() {
            if engine_config.timeout_secs > 0 {
                return engine_config.timeout_secs;
            }
        }

        match self.engine {
            TranscriptionEngineKind::WhisperServer => default_timeout_secs(),
            TranscriptionEngineKind::WhisperApi => default_whisper_api_timeout_secs(),
        }
    }

    /// Get the number of concurrent transcriptions for the active engine
    pub fn concurrent_requests(&self) -> usize {
        if let Some(engine_config) = self.get_active_engine_config() {
            if engine_config.concurrent_requests > 0 {
                return engine_config.concurrent_requests;
            }
        }

        default_concurrent_requests()
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        let mut config = Self {
            engine: TranscriptionEngineKind::default(),
            available_engines: Vec::new(),
            temperature: default_temperature(),
        };

        // Add default engines
        config.available_engines.push(EngineConfig::new(TranscriptionEngineKind::WhisperServer));
        config.available_engines.push(EngineConfig::new(TranscriptionEngineKind::WhisperApi));

        config
    }
}
