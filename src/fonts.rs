use std::path::{Path, PathBuf};
use log::debug;

// @module: Script classification and font asset resolution

/// One row of the script priority table: a script name, the code-point
/// ranges that identify it, and the font asset file able to render it.
#[derive(Debug, Clone, Copy)]
pub struct ScriptFont {
    /// Script name, for logging only
    pub script: &'static str,
    /// Inclusive Unicode code-point ranges
    pub ranges: &'static [(u32, u32)],
    /// Font file name under the fonts directory
    pub file: &'static str,
}

/// Font file used when no script row matches. Covers Latin; Cyrillic
/// coverage via this fallback is not guaranteed.
pub const DEFAULT_FONT_FILE: &str = "NotoSans-Regular.ttf";

/// Priority-ordered script table. Scanned top to bottom; the first row with
/// at least one matching character wins even if the sample mixes scripts.
/// Kana is listed before the unified ideographs so Japanese text carrying
/// kanji still selects the Japanese font.
const SCRIPT_TABLE: &[ScriptFont] = &[
    ScriptFont { script: "Arabic", ranges: &[(0x0600, 0x06FF), (0x0750, 0x077F)], file: "NotoSansArabic-Regular.ttf" },
    ScriptFont { script: "Hebrew", ranges: &[(0x0590, 0x05FF)], file: "NotoSansHebrew-Regular.ttf" },
    ScriptFont { script: "Japanese kana", ranges: &[(0x3040, 0x30FF), (0x31F0, 0x31FF)], file: "NotoSansCJKjp-Regular.otf" },
    ScriptFont { script: "Hangul", ranges: &[(0xAC00, 0xD7AF), (0x1100, 0x11FF)], file: "NotoSansCJKkr-Regular.otf" },
    ScriptFont { script: "CJK ideographs", ranges: &[(0x4E00, 0x9FFF), (0x3400, 0x4DBF)], file: "NotoSansSC-Regular.ttf" },
    ScriptFont { script: "Devanagari", ranges: &[(0x0900, 0x097F)], file: "NotoSansDevanagari-Regular.ttf" },
    ScriptFont { script: "Bengali", ranges: &[(0x0980, 0x09FF)], file: "NotoSansBengali-Regular.ttf" },
    ScriptFont { script: "Gurmukhi", ranges: &[(0x0A00, 0x0A7F)], file: "NotoSansGurmukhi-Regular.ttf" },
    ScriptFont { script: "Gujarati", ranges: &[(0x0A80, 0x0AFF)], file: "NotoSansGujarati-Regular.ttf" },
    ScriptFont { script: "Oriya", ranges: &[(0x0B00, 0x0B7F)], file: "NotoSansOriya-Regular.ttf" },
    ScriptFont { script: "Tamil", ranges: &[(0x0B80, 0x0BFF)], file: "NotoSansTamil-Regular.ttf" },
    ScriptFont { script: "Telugu", ranges: &[(0x0C00, 0x0C7F)], file: "NotoSansTelugu-Regular.ttf" },
    ScriptFont { script: "Kannada", ranges: &[(0x0C80, 0x0CFF)], file: "NotoSansKannada-Regular.ttf" },
    ScriptFont { script: "Malayalam", ranges: &[(0x0D00, 0x0D7F)], file: "NotoSansMalayalam-Regular.ttf" },
    ScriptFont { script: "Thai", ranges: &[(0x0E00, 0x0E7F)], file: "NotoSansThai-Regular.ttf" },
    ScriptFont { script: "Lao", ranges: &[(0x0E80, 0x0EFF)], file: "NotoSansLao-Regular.ttf" },
    ScriptFont { script: "Khmer", ranges: &[(0x1780, 0x17FF)], file: "NotoSansKhmer-Regular.ttf" },
    ScriptFont { script: "Myanmar", ranges: &[(0x1000, 0x109F)], file: "NotoSansMyanmar-Regular.ttf" },
    ScriptFont { script: "Ethiopic", ranges: &[(0x1200, 0x137F)], file: "NotoSansEthiopic-Regular.ttf" },
    ScriptFont { script: "Armenian", ranges: &[(0x0530, 0x058F)], file: "NotoSansArmenian-Regular.ttf" },
    ScriptFont { script: "Georgian", ranges: &[(0x10A0, 0x10FF)], file: "NotoSansGeorgian-Regular.ttf" },
];

/// Maps a text sample to the font asset able to render its script.
///
/// The resolver is constructed once per process with the fonts directory and
/// passed by reference into each render job. Resolution never fails: a sample
/// matching no script row resolves to [`DEFAULT_FONT_FILE`]. Whether the
/// resolved file actually exists on disk is a caller-side concern surfaced at
/// render time.
///
/// By convention a job resolves its font from the FIRST caption's text only.
/// A track that switches scripts later renders those captions in the job
/// font; per-character font switching is out of scope.
#[derive(Debug, Clone)]
pub struct FontResolver {
    fonts_dir: PathBuf,
}

impl FontResolver {
    pub fn new<P: AsRef<Path>>(fonts_dir: P) -> Self {
        FontResolver {
            fonts_dir: fonts_dir.as_ref().to_path_buf(),
        }
    }

    /// Resolve the font file for a text sample. Infallible.
    pub fn resolve(&self, sample_text: &str) -> PathBuf {
        self.fonts_dir.join(Self::resolve_file(sample_text))
    }

    /// Font family name for the resolved file, as the subtitle filter expects it
    /// (file stem without the weight suffix)
    pub fn font_name(sample_text: &str) -> &'static str {
        let file = Self::resolve_file(sample_text);
        file.split('-').next().unwrap_or(file)
    }

    // @returns: First matching table row's file, or the default font
    fn resolve_file(sample_text: &str) -> &'static str {
        for entry in SCRIPT_TABLE {
            let matches = sample_text.chars().any(|c| {
                let cp = c as u32;
                entry.ranges.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
            });
            if matches {
                debug!("Resolved script {} for caption sample", entry.script);
                return entry.file;
            }
        }

        debug!("No script row matched, using default font");
        DEFAULT_FONT_FILE
    }
}
