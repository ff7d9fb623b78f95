use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Transcription engines take an ISO 639-1 (2-letter) language hint, while
/// users may hand us 2-letter codes, 3-letter codes, or bibliographic
/// variants. This module normalizes whatever we get into the form the
/// engine request wants.

// ISO 639-2/B codes whose terminological (639-2/T) form differs
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
];

/// Normalize a language code to ISO 639-1 (2-letter) format
///
/// Accepts 2-letter codes, 3-letter ISO 639-2/T codes, and the common
/// bibliographic 639-2/B variants. Fails for languages with no 639-1 code,
/// since the engine cannot be hinted with one.
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    let language = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(b, _)| *b == normalized_code)
                .map(|(_, t)| *t)
                .unwrap_or(&normalized_code);
            Language::from_639_3(part2t)
        }
        _ => None,
    };

    let language = language
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))?;

    language
        .to_639_1()
        .map(|c| c.to_string())
        .ok_or_else(|| anyhow!("Language {} has no ISO 639-1 code", language.to_name()))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let part1 = normalize_to_part1(code)?;
    let lang = Language::from_639_1(&part1)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", part1))?;

    Ok(lang.to_name().to_string())
}
