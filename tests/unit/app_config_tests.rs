/*!
 * Tests for app configuration
 */

use std::path::PathBuf;
use std::str::FromStr;
use subburn::app_config::{BurnStrategy, Config, LogLevel, RenderConfig};
use crate::common;

#[test]
fn test_config_withDefaults_shouldMatchContract() {
    let config = Config::default();

    assert_eq!(config.target_language, "en");
    assert_eq!(config.strategy, BurnStrategy::FilterBurn);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.render.max_gap_seconds, 1.0);
    assert_eq!(config.render.line_wrap_width, 40);
    assert_eq!(config.render.font_size_pt, 32);
    assert_eq!(config.render.padding_px, 24);
    assert_eq!(config.render.fonts_dir, PathBuf::from("fonts"));
}

#[test]
fn test_config_withDefaults_shouldValidate() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_config_withBadLanguage_shouldFailValidation() {
    let config = Config {
        target_language: "klingon".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_render_config_withBadValues_shouldFailValidation() {
    let negative_gap = RenderConfig {
        max_gap_seconds: -0.5,
        ..RenderConfig::default()
    };
    assert!(negative_gap.validate().is_err());

    let narrow_wrap = RenderConfig {
        line_wrap_width: 4,
        ..RenderConfig::default()
    };
    assert!(narrow_wrap.validate().is_err());

    let tiny_font = RenderConfig {
        font_size_pt: 4,
        ..RenderConfig::default()
    };
    assert!(tiny_font.validate().is_err());
}

#[test]
fn test_strategy_fromStr_withKebabNames_shouldParse() {
    assert_eq!(BurnStrategy::from_str("filter-burn").unwrap(), BurnStrategy::FilterBurn);
    assert_eq!(BurnStrategy::from_str("render-remux").unwrap(), BurnStrategy::RenderRemux);
    assert_eq!(BurnStrategy::from_str("FilterBurn").unwrap(), BurnStrategy::FilterBurn);
    assert!(BurnStrategy::from_str("mystery").is_err());
}

#[test]
fn test_strategy_display_shouldRoundTripThroughFromStr() {
    for strategy in [BurnStrategy::FilterBurn, BurnStrategy::RenderRemux] {
        let parsed = BurnStrategy::from_str(&strategy.to_string()).unwrap();
        assert_eq!(parsed, strategy);
    }
}

#[test]
fn test_config_withPartialJson_shouldFillDefaults() {
    let json = r#"{"target_language": "ja", "strategy": "render-remux"}"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.target_language, "ja");
    assert_eq!(config.strategy, BurnStrategy::RenderRemux);
    assert_eq!(config.render.line_wrap_width, 40);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_saveAndLoad_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_language = "ko".to_string();
    config.strategy = BurnStrategy::RenderRemux;
    config.render.font_size_pt = 28;

    config.save(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.target_language, "ko");
    assert_eq!(loaded.strategy, BurnStrategy::RenderRemux);
    assert_eq!(loaded.render.font_size_pt, 28);
}

#[test]
fn test_config_fromFile_withBrokenJson_shouldError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{oops")
        .unwrap();
    assert!(Config::from_file(&path).is_err());
}
