use std::collections::HashMap;
use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating, normalizing, and matching
/// ISO 639-1 (2-letter) and ISO 639-3 (3-letter) language codes, plus the
/// immutable language-name lookup table built once at process initialization
/// and passed by reference into the components that need it.

/// Immutable language-name-to-code table.
///
/// Construct once (e.g. in main) and share by reference; there is no global
/// mutable state. Names are matched case-insensitively against the English
/// inventory names plus a small alias set for spellings the inventory does
/// not carry.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    aliases: HashMap<&'static str, &'static str>,
}

impl LanguageTable {
    pub fn new() -> Self {
        // Spellings seen in collaborator output that the ISO inventory names differently
        let aliases = HashMap::from([
            ("farsi", "fa"),
            ("mandarin", "zh"),
            ("chinese", "zh"),
            ("burmese", "my"),
            ("filipino", "tl"),
        ]);

        LanguageTable { aliases }
    }

    /// Look up the preferred code (639-1 where one exists, 639-3 otherwise)
    /// for an English language name, e.g. "Japanese" -> "ja".
    pub fn code_for_name(&self, name: &str) -> Option<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(code) = self.aliases.get(trimmed.to_lowercase().as_str()) {
            return Some((*code).to_string());
        }

        // isolang matches names case-sensitively; try as-is, then title case
        let lang = Language::from_name(trimmed).or_else(|| {
            let mut chars = trimmed.chars();
            let titled = chars.next().map(|c| {
                c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            })?;
            Language::from_name(&titled)
        })?;

        Some(preferred_code(lang))
    }

    /// English name for a 2- or 3-letter code, e.g. "ja" -> "Japanese"
    pub fn name_for_code(&self, code: &str) -> Option<String> {
        parse_code(code).map(|lang| lang.to_name().to_string())
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a 2-letter (639-1) or 3-letter (639-3) code
fn parse_code(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }
}

/// 639-1 code where one exists, 639-3 otherwise
fn preferred_code(lang: Language) -> String {
    lang.to_639_1()
        .map(|c| c.to_string())
        .unwrap_or_else(|| lang.to_639_3().to_string())
}

/// Validate that a string is a known ISO 639-1 or 639-3 language code
pub fn validate_language_code(code: &str) -> Result<()> {
    parse_code(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-1 where possible, 639-3 otherwise
pub fn normalize_code(code: &str) -> Result<String> {
    parse_code(code)
        .map(preferred_code)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Whether two codes denote the same language, regardless of 639-1 vs 639-3
/// spelling ("en" matches "eng")
pub fn language_codes_match(a: &str, b: &str) -> bool {
    match (parse_code(a), parse_code(b)) {
        (Some(lang_a), Some(lang_b)) => lang_a == lang_b,
        _ => a.trim().eq_ignore_ascii_case(b.trim()),
    }
}
