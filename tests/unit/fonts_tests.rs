/*!
 * Tests for script classification and font resolution
 */

use std::path::PathBuf;
use subburn::fonts::{FontResolver, DEFAULT_FONT_FILE};

fn resolver() -> FontResolver {
    FontResolver::new("fonts")
}

#[test]
fn test_resolve_withArabicText_shouldPickArabicFont() {
    let path = resolver().resolve("مرحبا بالعالم");
    assert_eq!(path, PathBuf::from("fonts/NotoSansArabic-Regular.ttf"));
}

#[test]
fn test_resolve_withHebrewText_shouldPickHebrewFont() {
    let path = resolver().resolve("שלום עולם");
    assert_eq!(path, PathBuf::from("fonts/NotoSansHebrew-Regular.ttf"));
}

/// Kana outranks the unified ideographs so kanji-carrying Japanese stays Japanese
#[test]
fn test_resolve_withKanaAndKanji_shouldPickJapaneseFont() {
    let path = resolver().resolve("日本語のテスト");
    assert_eq!(path, PathBuf::from("fonts/NotoSansCJKjp-Regular.otf"));
}

#[test]
fn test_resolve_withKanjiOnly_shouldPickSimplifiedChineseFont() {
    let path = resolver().resolve("中文字幕");
    assert_eq!(path, PathBuf::from("fonts/NotoSansSC-Regular.ttf"));
}

#[test]
fn test_resolve_withHangul_shouldPickKoreanFont() {
    let path = resolver().resolve("안녕하세요");
    assert_eq!(path, PathBuf::from("fonts/NotoSansCJKkr-Regular.otf"));
}

#[test]
fn test_resolve_withDevanagari_shouldPickDevanagariFont() {
    let path = resolver().resolve("नमस्ते");
    assert_eq!(path, PathBuf::from("fonts/NotoSansDevanagari-Regular.ttf"));
}

#[test]
fn test_resolve_withThai_shouldPickThaiFont() {
    let path = resolver().resolve("สวัสดี");
    assert_eq!(path, PathBuf::from("fonts/NotoSansThai-Regular.ttf"));
}

/// Table order decides mixed-script samples, not character counts
#[test]
fn test_resolve_withMixedArabicAndLatin_shouldPickArabicFont() {
    let path = resolver().resolve("Hello world and then some مرحبا");
    assert_eq!(path, PathBuf::from("fonts/NotoSansArabic-Regular.ttf"));
}

#[test]
fn test_resolve_withLatinText_shouldFallBackToDefault() {
    let path = resolver().resolve("Just plain English");
    assert_eq!(path, PathBuf::from("fonts").join(DEFAULT_FONT_FILE));
}

/// Cyrillic has no table row; it lands on the default font
#[test]
fn test_resolve_withCyrillicText_shouldFallBackToDefault() {
    let path = resolver().resolve("Привет мир");
    assert_eq!(path, PathBuf::from("fonts").join(DEFAULT_FONT_FILE));
}

#[test]
fn test_resolve_withEmptyText_shouldFallBackToDefault() {
    let path = resolver().resolve("");
    assert_eq!(path, PathBuf::from("fonts").join(DEFAULT_FONT_FILE));
}

#[test]
fn test_resolve_withCustomFontsDir_shouldPrefixIt() {
    let path = FontResolver::new("/opt/share/noto").resolve("مرحبا");
    assert_eq!(path, PathBuf::from("/opt/share/noto/NotoSansArabic-Regular.ttf"));
}

/// The filter strategy needs the family name without the weight suffix
#[test]
fn test_font_name_withResolvedFile_shouldDropWeightSuffix() {
    assert_eq!(FontResolver::font_name("مرحبا"), "NotoSansArabic");
    assert_eq!(FontResolver::font_name("hello"), "NotoSans");
    assert_eq!(FontResolver::font_name("こんにちは"), "NotoSansCJKjp");
}
