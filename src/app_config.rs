use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::language_utils;

// @const: PATH lookups for the external tools, done once per process
static FFMPEG_ON_PATH: Lazy<String> = Lazy::new(|| {
    which::which("ffmpeg").map_or_else(
        |_| "ffmpeg".to_string(),
        |p| p.to_string_lossy().to_string(),
    )
});

static FFPROBE_ON_PATH: Lazy<String> = Lazy::new(|| {
    which::which("ffprobe").map_or_else(
        |_| "ffprobe".to_string(),
        |p| p.to_string_lossy().to_string(),
    )
});

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target caption language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Burn strategy
    #[serde(default)]
    pub strategy: BurnStrategy,

    /// Caption rendering settings
    #[serde(default)]
    pub render: RenderConfig,

    /// External tool locations
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            strategy: BurnStrategy::default(),
            render: RenderConfig::default(),
            tools: ToolsConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow!("Failed to open config file {:?}: {}", path.as_ref(), e))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path.as_ref(), e))?;
        Ok(config)
    }

    /// Write configuration to a JSON file, pretty-printed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)
            .map_err(|e| anyhow!("Failed to write config file {:?}: {}", path.as_ref(), e))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.target_language)
            .map_err(|e| anyhow!("Invalid target language: {}", e))?;

        self.render.validate()
    }
}

/// Burn strategy for producing the final captioned video
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BurnStrategy {
    // @strategy: Single ffmpeg pass, subtitle filter burn, audio stream-copied
    #[default]
    FilterBurn,
    // @strategy: Frame-by-frame overlay to a silent stream, then audio remux
    RenderRemux,
}

impl BurnStrategy {
    // @returns: Lowercase strategy identifier
    pub fn to_kebab_string(&self) -> String {
        match self {
            Self::FilterBurn => "filter-burn".to_string(),
            Self::RenderRemux => "render-remux".to_string(),
        }
    }
}

impl std::fmt::Display for BurnStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_kebab_string())
    }
}

impl std::str::FromStr for BurnStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "filter-burn" | "filterburn" => Ok(Self::FilterBurn),
            "render-remux" | "renderremux" => Ok(Self::RenderRemux),
            _ => Err(anyhow!("Invalid burn strategy: {}", s)),
        }
    }
}

/// Caption rendering settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    /// Maximum silence between segments that still merges them, seconds.
    /// A presentation-smoothing heuristic, not a correctness threshold.
    #[serde(default = "default_max_gap_seconds")]
    pub max_gap_seconds: f64,

    /// Characters per caption line before wrapping
    #[serde(default = "default_line_wrap_width")]
    pub line_wrap_width: usize,

    /// Caption font size in points
    #[serde(default = "default_font_size_pt")]
    pub font_size_pt: u32,

    /// Padding between the caption block and the bottom frame edge, pixels
    #[serde(default = "default_padding_px")]
    pub padding_px: u32,

    /// Directory holding the Noto font assets
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            max_gap_seconds: default_max_gap_seconds(),
            line_wrap_width: default_line_wrap_width(),
            font_size_pt: default_font_size_pt(),
            padding_px: default_padding_px(),
            fonts_dir: default_fonts_dir(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.max_gap_seconds.is_finite() || self.max_gap_seconds < 0.0 {
            return Err(anyhow!(
                "max_gap_seconds must be a non-negative number, got {}",
                self.max_gap_seconds
            ));
        }

        if self.line_wrap_width < 8 {
            return Err(anyhow!(
                "line_wrap_width must be at least 8, got {}",
                self.line_wrap_width
            ));
        }

        if !(8..=144).contains(&self.font_size_pt) {
            return Err(anyhow!(
                "font_size_pt must be between 8 and 144, got {}",
                self.font_size_pt
            ));
        }

        Ok(())
    }
}

/// External tool locations, discovered on PATH when not configured
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolsConfig {
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            ffmpeg_path: default_ffmpeg_path(),
            ffprobe_path: default_ffprobe_path(),
        }
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_max_gap_seconds() -> f64 {
    1.0
}

fn default_line_wrap_width() -> usize {
    40
}

fn default_font_size_pt() -> u32 {
    32
}

fn default_padding_px() -> u32 {
    24
}

fn default_fonts_dir() -> PathBuf {
    PathBuf::from("fonts")
}

fn default_ffmpeg_path() -> String {
    FFMPEG_ON_PATH.clone()
}

fn default_ffprobe_path() -> String {
    FFPROBE_ON_PATH.clone()
}
