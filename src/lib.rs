/*!
 * # sublines - audio transcription to subtitle lines
 *
 * A Rust library for generating character-budgeted subtitle lines from audio.
 *
 * ## Features
 *
 * - Transcribe audio through an OpenAI-compatible Whisper engine
 *   (local server or hosted API)
 * - Normalize word-level timestamps (punctuation stripping, uppercasing,
 *   hyphenated-word merging)
 * - Greedy per-line character-budget packing with boundary gap insertion
 * - Render packed lines as SRT files
 * - Configurable line budget and inter-line gap
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_builder`: Word extraction and line packing (the core pipeline)
 * - `srt`: SRT rendering of packed lines
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Transcription engine clients:
 *   - `providers::whisper_api`: OpenAI-compatible transcription client
 *   - `providers::mock`: Mock engine for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod srt;
pub mod subtitle_builder;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use subtitle_builder::{SubtitleLine, WordUnit, extract_words, format_word, pack_lines};
pub use providers::{Transcription, TranscriptSegment, TranscriptWord, TranscriptionEngine, TranscriptionRequest};
pub use errors::{AppError, EngineError, SubtitleError};
