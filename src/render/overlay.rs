use std::path::Path;
use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use image::RgbImage;

use crate::errors::PipelineError;

// @module: Caption layout and frame-buffer compositing

/// Fixed caption appearance for one render job
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionStyle {
    /// Point size glyphs are rasterized at
    pub font_size_pt: u32,
    /// Character count a line is wrapped at. A coarse proxy for pixel width;
    /// the pixel bounding box is still measured per line for the backdrop.
    pub line_wrap_width: usize,
    /// Distance between the caption block and the bottom frame edge
    pub padding_px: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        CaptionStyle {
            font_size_pt: 32,
            line_wrap_width: 40,
            padding_px: 24,
        }
    }
}

impl CaptionStyle {
    /// Rasterization scale: CSS-style 96 dpi pixels from points
    pub fn px_scale(&self) -> PxScale {
        PxScale::from(self.font_size_pt as f32 * 96.0 / 72.0)
    }
}

/// A font asset loaded into memory for glyph rasterization.
///
/// Loading is where a dangling font reference from the resolver surfaces;
/// resolution itself never fails.
#[derive(Debug)]
pub struct LoadedFont {
    font: FontVec,
}

impl LoadedFont {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            PipelineError::Input(format!("Cannot read font file {:?}: {}", path, e))
        })?;

        let font = FontVec::try_from_vec(data).map_err(|e| {
            PipelineError::Input(format!("Cannot parse font file {:?}: {}", path, e))
        })?;

        Ok(LoadedFont { font })
    }

    /// Build from raw font bytes - used by tests with an embedded face
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, PipelineError> {
        let font = FontVec::try_from_vec(data)
            .map_err(|e| PipelineError::Input(format!("Cannot parse font data: {}", e)))?;
        Ok(LoadedFont { font })
    }

    pub fn font(&self) -> &FontVec {
        &self.font
    }
}

/// Wrap caption text into lines of at most `max_chars` characters.
///
/// Greedy word wrap; a single word longer than the limit is hard-broken at
/// the limit rather than overflowing the frame. Embedded newlines are kept
/// as existing breaks.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_chars = 0usize;

        for word in paragraph.split_whitespace() {
            let word_chars = word.chars().count();

            if current_chars > 0 && current_chars + 1 + word_chars > max_chars {
                lines.push(std::mem::take(&mut current));
                current_chars = 0;
            }

            if word_chars > max_chars {
                // Hard-break an overlong word across as many lines as needed
                if current_chars > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_chars = 0;
                }
                let mut chunk = String::new();
                for c in word.chars() {
                    chunk.push(c);
                    if chunk.chars().count() == max_chars {
                        lines.push(std::mem::take(&mut chunk));
                    }
                }
                if !chunk.is_empty() {
                    current_chars = chunk.chars().count();
                    current = chunk;
                }
                continue;
            }

            if current_chars > 0 {
                current.push(' ');
                current_chars += 1;
            }
            current.push_str(word);
            current_chars += word_chars;
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Advance width of a line at the given scale, in pixels
fn measure_line(font: &FontVec, scale: PxScale, line: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0;
    let mut previous = None;

    for c in line.chars() {
        let id = font.glyph_id(c);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }

    width
}

/// Position the glyphs of one line left-to-right from `(x, baseline_y)`
fn layout_line(font: &FontVec, scale: PxScale, line: &str, x: f32, baseline_y: f32) -> Vec<Glyph> {
    let scaled = font.as_scaled(scale);
    let mut glyphs = Vec::with_capacity(line.len());
    let mut caret = x;
    let mut previous = None;

    for c in line.chars() {
        let id = font.glyph_id(c);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }

        let mut glyph = scaled.scaled_glyph(c);
        glyph.position = point(caret, baseline_y);
        caret += scaled.h_advance(id);
        glyphs.push(glyph);
        previous = Some(id);
    }

    glyphs
}

/// Darken a backdrop rectangle so glyphs stay legible against arbitrary video
fn fill_backdrop(frame: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64) {
    let (width, height) = (frame.width() as i64, frame.height() as i64);
    let x0 = x0.clamp(0, width);
    let x1 = x1.clamp(0, width);
    let y0 = y0.clamp(0, height);
    let y1 = y1.clamp(0, height);

    for y in y0..y1 {
        for x in x0..x1 {
            let pixel = frame.get_pixel_mut(x as u32, y as u32);
            for channel in pixel.0.iter_mut() {
                // 60% black over the original pixel
                *channel = (*channel as u32 * 2 / 5) as u8;
            }
        }
    }
}

/// Composite one caption onto a frame buffer in place.
///
/// Lines are wrapped at the style's character width, stacked bottom-aligned
/// with the style's padding from the bottom edge, each line centered
/// horizontally over a filled backdrop. A blank caption leaves the frame
/// untouched.
pub fn draw_caption(frame: &mut RgbImage, font: &LoadedFont, style: &CaptionStyle, text: &str) {
    if text.trim().is_empty() {
        return;
    }

    let face = font.font();
    let scale = style.px_scale();
    let scaled = face.as_scaled(scale);

    let ascent = scaled.ascent();
    let descent = scaled.descent(); // negative below the baseline
    let line_height = (ascent - descent + scaled.line_gap()).ceil();

    let lines = wrap_text(text, style.line_wrap_width);
    if lines.is_empty() {
        return;
    }

    let frame_w = frame.width() as f32;
    let frame_h = frame.height() as f32;
    let block_height = lines.len() as f32 * line_height;
    let box_pad = (line_height * 0.15).ceil();

    // Baseline of the first (top) line; the block is anchored to the bottom edge
    let mut baseline_y = frame_h - style.padding_px as f32 - block_height + ascent;

    for line in &lines {
        let line_width = measure_line(face, scale, line);
        let x = ((frame_w - line_width) / 2.0).max(0.0);

        fill_backdrop(
            frame,
            (x - box_pad) as i64,
            (baseline_y - ascent - box_pad) as i64,
            (x + line_width + box_pad) as i64,
            (baseline_y - descent + box_pad) as i64,
        );

        for glyph in layout_line(face, scale, line, x, baseline_y) {
            let Some(outlined) = face.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();

            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                if px < 0 || py < 0 || px >= frame.width() as i64 || py >= frame.height() as i64 {
                    return;
                }

                let pixel = frame.get_pixel_mut(px as u32, py as u32);
                for channel in pixel.0.iter_mut() {
                    let lit = *channel as f32 + (255.0 - *channel as f32) * coverage;
                    *channel = lit as u8;
                }
            });
        }

        baseline_y += line_height;
    }
}
