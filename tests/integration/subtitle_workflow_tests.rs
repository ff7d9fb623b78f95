/*!
 * End-to-end tests for the word-to-subtitle workflow
 */

use anyhow::Result;
use sublines::srt::SrtFile;
use sublines::subtitle_builder::{extract_words, pack_lines};
use crate::common;

/// Test the full pipeline from engine segments to an SRT document
#[test]
fn test_workflow_withShortSentence_shouldProduceBudgetedSrt() -> Result<()> {
    common::init_test_logging();

    let transcription = common::make_transcription(&[
        (" Run", 0.0, 0.3),
        (" far,", 0.3, 0.6),
        (" fast.", 0.6, 0.9),
    ]);

    let words = extract_words(&transcription.segments)?;
    let lines = pack_lines(words, 7, 0.05)?;

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text(), "RUN FAR");
    assert_eq!(lines[1].text(), "FAST");

    let srt = SrtFile::from_lines(&lines)?;
    assert_eq!(srt.entries.len(), 2);
    assert_eq!(srt.entries[0].start_time_ms, 0);
    assert_eq!(srt.entries[0].end_time_ms, 600);
    // The boundary gap pushed the second entry off the first one's end
    assert_eq!(srt.entries[1].start_time_ms, 650);

    Ok(())
}

/// Test the pipeline writes a parseable SRT file to disk
#[test]
fn test_workflow_withFileOutput_shouldWriteAllBlocks() -> Result<()> {
    let transcription = common::make_transcription(&[
        (" The", 0.0, 0.2),
        (" quick", 0.2, 0.5),
        (" brown", 0.5, 0.8),
        (" fox", 0.8, 1.0),
        (" jumps", 1.0, 1.3),
        (" over", 1.3, 1.5),
        (" the", 1.5, 1.7),
        (" lazy", 1.7, 1.9),
        (" dog.", 1.9, 2.2),
    ]);

    let words = extract_words(&transcription.segments)?;
    let lines = pack_lines(words, 13, 0.05)?;
    let srt = SrtFile::from_lines(&lines)?;

    let temp_dir = common::create_temp_dir()?;
    let output_path = temp_dir.path().join("fox.srt");
    srt.write_to(&output_path)?;

    let content = std::fs::read_to_string(&output_path)?;
    let blocks: Vec<&str> = content.trim_end().split("\n\n").collect();
    assert_eq!(blocks.len(), lines.len());

    // Every word survived into the file, uppercased and unpunctuated
    for word in ["THE", "QUICK", "BROWN", "FOX", "JUMPS", "OVER", "LAZY", "DOG"] {
        assert!(content.contains(word), "missing {}", word);
    }
    assert!(!content.contains("dog."));

    Ok(())
}

/// Test hyphen merging flows through packing untouched
#[test]
fn test_workflow_withHyphenatedWords_shouldKeepMergedUnitsTogether() -> Result<()> {
    let transcription = common::make_transcription(&[
        (" inter", 0.0, 0.5),
        ("-related", 0.5, 1.0),
        (" topics", 1.0, 1.5),
    ]);

    let words = extract_words(&transcription.segments)?;
    assert_eq!(words.len(), 2);

    let lines = pack_lines(words, 13, 0.05)?;

    // INTER-RELATED is 13 chars, TOPICS overflows onto its own line
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text(), "INTER-RELATED");
    assert_eq!(lines[1].text(), "TOPICS");
    // 1.0 == 1.0 at the boundary, so the gap applies
    assert_eq!(lines[1].start(), 1.0 + 0.05);

    Ok(())
}

/// Test an empty transcription produces no lines and no failure
#[test]
fn test_workflow_withNoSegments_shouldProduceNothing() -> Result<()> {
    let words = extract_words(&[])?;
    let lines = pack_lines(words, 13, 0.05)?;
    let srt = SrtFile::from_lines(&lines)?;

    assert!(srt.entries.is_empty());
    assert!(srt.render().is_empty());

    Ok(())
}
