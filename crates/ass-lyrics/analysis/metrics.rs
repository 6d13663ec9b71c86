//! Text measurement seam
//!
//! Line geometry depends on the rendered size of the text. Real font metrics
//! need a font stack, so measurement sits behind [`TextMetrics`] and the crate
//! ships [`EstimatedMetrics`], a font-free approximation based on Unicode cell
//! widths.

use unicode_width::UnicodeWidthChar;

/// Font parameters that affect measured size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Font size in points (ASS uses script pixels)
    pub size: f64,

    /// Horizontal scale in percent
    pub scale_x: f64,

    /// Vertical scale in percent
    pub scale_y: f64,

    /// Extra spacing per character in pixels
    pub spacing: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size: 20.0,
            scale_x: 100.0,
            scale_y: 100.0,
            spacing: 0.0,
        }
    }
}

/// Rendered size of a block of text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtents {
    /// Width of the widest visual line
    pub width: f64,

    /// Total height of all visual lines
    pub height: f64,
}

/// Measures plain text (override blocks already removed)
pub trait TextMetrics {
    /// Measure `text` rendered with `font`
    fn measure(&self, text: &str, font: &FontSpec) -> TextExtents;
}

/// Font-free metrics estimate
///
/// Each visual line is `size * scale_y / 100` tall. A narrow character is
/// `advance_ratio` em wide and a wide (CJK) character twice that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedMetrics {
    /// Advance of a single-cell character, in em
    pub advance_ratio: f64,
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        Self { advance_ratio: 0.5 }
    }
}

impl TextMetrics for EstimatedMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> TextExtents {
        let line_height = font.size * font.scale_y / 100.0;
        let em = font.size * font.scale_x / 100.0;

        let mut width: f64 = 0.0;
        let mut lines = 0_u32;
        for visual_line in split_visual_lines(text) {
            lines += 1;
            let mut cells = 0_usize;
            let mut chars = 0_usize;
            for ch in visual_line.chars() {
                cells += ch.width().unwrap_or(0);
                chars += 1;
            }
            #[allow(clippy::cast_precision_loss)]
            let line_width = (cells as f64).mul_add(em * self.advance_ratio, chars as f64 * font.spacing);
            width = width.max(line_width);
        }

        TextExtents {
            width,
            height: line_height * f64::from(lines.max(1)),
        }
    }
}

/// Split text on hard (`\N`) and soft (`\n`) line breaks
///
/// `\h` is expanded to a plain space inside each piece.
fn split_visual_lines(text: &str) -> Vec<String> {
    text.replace("\\N", "\n")
        .replace("\\n", "\n")
        .split('\n')
        .map(|piece| piece.replace("\\h", " "))
        .collect()
}

/// Remove `{...}` override blocks, leaving only displayed text
///
/// ```rust
/// use ass_lyrics::analysis::metrics::strip_override_blocks;
///
/// assert_eq!(strip_override_blocks("{\\k20}Hel{\\k30}lo"), "Hello");
/// assert_eq!(strip_override_blocks("no tags"), "no tags");
/// ```
#[must_use]
pub fn strip_override_blocks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0_usize;
    for ch in text.chars() {
        match ch {
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}
