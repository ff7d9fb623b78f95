use once_cell::sync::Lazy;
use regex::Regex;
use log::debug;

use crate::errors::SubtitleError;
use crate::providers::TranscriptSegment;

// @module: Word extraction and greedy subtitle line packing

/// Default character budget per subtitle line
pub const DEFAULT_MAX_CHARS: usize = 13;

/// Default gap in seconds inserted between time-abutting lines
pub const DEFAULT_LINES_DISTANCE: f64 = 0.05;

// @const: Punctuation stripped from every word
static PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[;,.]").unwrap()
});

// @struct: Atomic subtitle element with its own time span
#[derive(Debug, Clone, PartialEq)]
pub struct WordUnit {
    // @field: Normalized word text
    pub text: String,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,
}

impl WordUnit {
    /// Create a new word unit
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        WordUnit {
            text: text.into(),
            start,
            end,
        }
    }
}

/// An ordered group of words rendered together as one subtitle line
///
/// Start, end and text are derived from the word sequence rather than stored,
/// so a line can never disagree with its own words.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleLine {
    /// Words in temporal order; never empty for lines produced by the packer
    pub words: Vec<WordUnit>,
}

impl SubtitleLine {
    /// Create a line from an ordered word sequence
    pub fn new(words: Vec<WordUnit>) -> Self {
        SubtitleLine { words }
    }

    /// Start time of the first word, in seconds
    pub fn start(&self) -> f64 {
        self.words.first().map_or(0.0, |w| w.start)
    }

    /// End time of the last word, in seconds
    pub fn end(&self) -> f64 {
        self.words.last().map_or(0.0, |w| w.end)
    }

    /// Rendered line text: word texts joined with single spaces
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Normalize a raw engine word: strip `;` `,` `.`, uppercase, trim
pub fn format_word(word: &str) -> String {
    PUNCTUATION_REGEX
        .replace_all(word, "")
        .to_uppercase()
        .trim()
        .to_string()
}

/// Flatten engine segments into a time-ordered sequence of normalized words
///
/// A word whose successor starts with `-` is treated as a hyphenated
/// continuation: the two raw texts are concatenated, the unit's end time is
/// extended to the successor's end, and the successor is consumed. Only one
/// lookahead merge is checked per emitted unit, so a chain of three
/// continuations yields a merged pair followed by the trailing fragment.
pub fn extract_words(segments: &[TranscriptSegment]) -> Result<Vec<WordUnit>, SubtitleError> {
    let mut words = Vec::new();

    for (segment_idx, segment) in segments.iter().enumerate() {
        validate_segment(segment_idx, segment)?;

        let segment_words = &segment.words;
        let num_of_words = segment_words.len();
        let mut i = 0;

        while i < num_of_words {
            let word = &segment_words[i];
            let mut raw_text = word.word.clone();
            let mut end = word.end;

            if i + 1 < num_of_words {
                let next_word = &segment_words[i + 1];
                if next_word.word.starts_with('-') {
                    raw_text.push_str(&next_word.word);
                    end = next_word.end;
                    // Skip the next word in the next iteration
                    i += 1;
                    debug!("Combined hyphenated word: {}", raw_text);
                }
            }

            words.push(WordUnit::new(format_word(&raw_text), word.start, end));
            i += 1;
        }
    }

    debug!("Extracted {} words from {} segments", words.len(), segments.len());
    Ok(words)
}

/// Group words into subtitle lines with a greedy single-pass packer
///
/// A line is committed as soon as appending the next word would push the
/// rendered text past `max_chars`; the overflowing word opens the next line.
/// When a committed line's end time exactly equals the next word's start
/// time, `lines_distance` seconds are added to that word's start so the two
/// lines do not render as perfectly continuous.
pub fn pack_lines(
    words: Vec<WordUnit>,
    max_chars: usize,
    lines_distance: f64,
) -> Result<Vec<SubtitleLine>, SubtitleError> {
    if max_chars == 0 {
        return Err(SubtitleError::InvalidLineBudget(max_chars));
    }
    if !lines_distance.is_finite() || lines_distance < 0.0 {
        return Err(SubtitleError::InvalidLineGap(lines_distance));
    }

    let mut lines: Vec<SubtitleLine> = Vec::new();
    let mut current_line: Vec<WordUnit> = Vec::new();
    let mut line_text = String::new();

    for mut word in words {
        let temp_line_text = format!("{} {}", line_text, word.text).trim().to_string();

        if !current_line.is_empty() && temp_line_text.chars().count() > max_chars {
            let committed_end = current_line.last().map(|w| w.end);
            lines.push(SubtitleLine::new(std::mem::take(&mut current_line)));
            debug!("Created line: {}", lines[lines.len() - 1].text());

            // The equality is intentionally exact: the gap is only inserted
            // when the engine reported zero silence between the two words.
            if committed_end == Some(word.start) {
                word.start += lines_distance;
                debug!("Added time gap of {}s", lines_distance);
            }

            line_text = word.text.clone();
            current_line.push(word);
        } else {
            line_text = temp_line_text;
            current_line.push(word);
        }
    }

    if !current_line.is_empty() {
        lines.push(SubtitleLine::new(current_line));
        debug!("Created final line: {}", lines[lines.len() - 1].text());
    }

    debug!("Created {} subtitle lines", lines.len());
    Ok(lines)
}

// @validates: Segment and word time ranges before any packing happens
fn validate_segment(segment_idx: usize, segment: &TranscriptSegment) -> Result<(), SubtitleError> {
    if !segment.start.is_finite() || !segment.end.is_finite() || segment.start > segment.end {
        return Err(SubtitleError::MalformedSegment {
            segment: segment_idx,
            reason: format!("segment time range {} > {}", segment.start, segment.end),
        });
    }

    for (word_idx, word) in segment.words.iter().enumerate() {
        if !word.start.is_finite() || !word.end.is_finite() || word.start > word.end {
            return Err(SubtitleError::MalformedSegment {
                segment: segment_idx,
                reason: format!(
                    "word {} ({:?}) has time range {} > {}",
                    word_idx, word.word, word.start, word.end
                ),
            });
        }
    }

    Ok(())
}
