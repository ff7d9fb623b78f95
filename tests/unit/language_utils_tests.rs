/*!
 * Tests for language code utilities
 */

use sublines::language_utils::{get_language_name, normalize_to_part1};

/// Test normalizing 2-letter codes
#[test]
fn test_normalize_to_part1_withTwoLetterCode_shouldPassThrough() {
    assert_eq!(normalize_to_part1("en").unwrap(), "en");
    assert_eq!(normalize_to_part1("FR").unwrap(), "fr");
    assert_eq!(normalize_to_part1(" es ").unwrap(), "es");
}

/// Test normalizing 3-letter terminological codes
#[test]
fn test_normalize_to_part1_withThreeLetterCode_shouldConvert() {
    assert_eq!(normalize_to_part1("eng").unwrap(), "en");
    assert_eq!(normalize_to_part1("spa").unwrap(), "es");
}

/// Test normalizing bibliographic variants
#[test]
fn test_normalize_to_part1_withBibliographicCode_shouldConvert() {
    assert_eq!(normalize_to_part1("fre").unwrap(), "fr");
    assert_eq!(normalize_to_part1("ger").unwrap(), "de");
    assert_eq!(normalize_to_part1("chi").unwrap(), "zh");
}

/// Test invalid codes are rejected
#[test]
fn test_normalize_to_part1_withInvalidCode_shouldFail() {
    assert!(normalize_to_part1("zz").is_err());
    assert!(normalize_to_part1("nope").is_err());
    assert!(normalize_to_part1("").is_err());
}

/// Test language name lookup
#[test]
fn test_get_language_name_withValidCodes_shouldReturnName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("deu").unwrap(), "German");
}

/// Test language name lookup failure
#[test]
fn test_get_language_name_withInvalidCode_shouldFail() {
    assert!(get_language_name("xx").is_err());
}
