/*!
 * Tests for language code utilities and the name lookup table
 */

use subburn::language_utils::{
    language_codes_match, normalize_code, validate_language_code, LanguageTable,
};

#[test]
fn test_validate_withKnownCodes_shouldAccept() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("eng").is_ok());
    assert!(validate_language_code("ja").is_ok());
    assert!(validate_language_code(" FR ").is_ok());
}

#[test]
fn test_validate_withUnknownCodes_shouldReject() {
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("english").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_normalize_withThreeLetterCode_shouldPreferTwoLetter() {
    assert_eq!(normalize_code("eng").unwrap(), "en");
    assert_eq!(normalize_code("fra").unwrap(), "fr");
    assert_eq!(normalize_code("EN").unwrap(), "en");
}

#[test]
fn test_codes_match_withMixedSpellings_shouldCompareLanguages() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("ja", "jpn"));
    assert!(language_codes_match("en", "EN"));
    assert!(!language_codes_match("en", "fr"));
}

#[test]
fn test_table_withEnglishNames_shouldResolveCodes() {
    let table = LanguageTable::new();
    assert_eq!(table.code_for_name("Japanese").as_deref(), Some("ja"));
    assert_eq!(table.code_for_name("french").as_deref(), Some("fr"));
    assert_eq!(table.code_for_name(" Spanish ").as_deref(), Some("es"));
}

#[test]
fn test_table_withAliasSpellings_shouldResolveCodes() {
    let table = LanguageTable::new();
    assert_eq!(table.code_for_name("Farsi").as_deref(), Some("fa"));
    assert_eq!(table.code_for_name("chinese").as_deref(), Some("zh"));
}

#[test]
fn test_table_withUnknownName_shouldReturnNone() {
    let table = LanguageTable::new();
    assert_eq!(table.code_for_name("Klingon"), None);
    assert_eq!(table.code_for_name(""), None);
}

#[test]
fn test_table_withCodes_shouldResolveNames() {
    let table = LanguageTable::new();
    assert_eq!(table.name_for_code("en").as_deref(), Some("English"));
    assert_eq!(table.name_for_code("jpn").as_deref(), Some("Japanese"));
    assert_eq!(table.name_for_code("zz"), None);
}
