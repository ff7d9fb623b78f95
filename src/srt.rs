use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use anyhow::{Context, Result, anyhow};

use crate::subtitle_builder::SubtitleLine;

// @module: SRT rendering for packed subtitle lines

// @struct: Single SRT entry
#[derive(Debug, Clone, PartialEq)]
pub struct SrtEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Entry text
    pub text: String,
}

impl SrtEntry {
    /// Creates a new SRT entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SrtEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SrtEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// A complete SRT document built from packed subtitle lines
#[derive(Debug, Clone, Default)]
pub struct SrtFile {
    /// Ordered entries, numbered from 1
    pub entries: Vec<SrtEntry>,
}

impl SrtFile {
    /// Build an SRT document from packed lines, rounding seconds to milliseconds
    pub fn from_lines(lines: &[SubtitleLine]) -> Result<Self> {
        let mut entries = Vec::with_capacity(lines.len());

        for (i, line) in lines.iter().enumerate() {
            if line.words.is_empty() {
                return Err(anyhow!("Subtitle line {} has no words", i + 1));
            }
            entries.push(SrtEntry::new(
                i + 1,
                seconds_to_ms(line.start()),
                seconds_to_ms(line.end()),
                line.text(),
            ));
        }

        Ok(SrtFile { entries })
    }

    /// Render the whole document as a string
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            // fmt::Write on String cannot fail
            let _ = fmt::Write::write_fmt(&mut out, format_args!("{}", entry));
        }
        out
    }

    /// Write the document to a file in one shot
    ///
    /// The content is rendered fully in memory first, so a failed run never
    /// leaves a partially written subtitle file behind.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = self.render();
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }
}

/// Convert floating-point seconds to whole milliseconds
fn seconds_to_ms(seconds: f64) -> u64 {
    if seconds <= 0.0 {
        0
    } else {
        (seconds * 1000.0).round() as u64
    }
}
