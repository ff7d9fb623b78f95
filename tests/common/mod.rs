/*!
 * Common test utilities for the sublines test suite
 */

use std::fs;
use std::path::PathBuf;
use std::sync::Once;
use anyhow::Result;
use tempfile::TempDir;

use sublines::providers::{Transcription, TranscriptSegment, TranscriptWord};

static INIT_LOGGING: Once = Once::new();

/// Enable env_logger output for a test run (opt-in via RUST_LOG)
#[allow(dead_code)]
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a minimal RIFF/WAVE file that passes audio detection
pub fn create_test_audio(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&36u32.to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    fs::write(&file_path, bytes)?;
    Ok(file_path)
}

/// Build a timestamped word the way an engine reports it
pub fn make_word(word: &str, start: f64, end: f64) -> TranscriptWord {
    TranscriptWord {
        word: word.to_string(),
        start,
        end,
    }
}

/// Build a segment around a word list, spanning the words' time range
pub fn make_segment(words: Vec<TranscriptWord>) -> TranscriptSegment {
    let start = words.first().map_or(0.0, |w| w.start);
    let end = words.last().map_or(0.0, |w| w.end);
    let text = words.iter().map(|w| w.word.as_str()).collect::<Vec<_>>().join("");

    TranscriptSegment {
        text,
        start,
        end,
        words,
    }
}

/// Build a single-segment transcription from raw (word, start, end) triples
pub fn make_transcription(words: &[(&str, f64, f64)]) -> Transcription {
    let words: Vec<TranscriptWord> = words
        .iter()
        .map(|&(w, s, e)| make_word(w, s, e))
        .collect();
    let segment = make_segment(words);

    Transcription {
        text: segment.text.clone(),
        language: Some("en".to_string()),
        segments: vec![segment],
    }
}
