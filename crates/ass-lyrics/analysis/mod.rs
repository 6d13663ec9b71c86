//! Turns parsed dialogue into [`SourceLine`] records
//!
//! The layout generator needs each lyric line's timing and on-screen
//! geometry. This module resolves the event's style, applies margin
//! overrides, measures the displayed text and places it with
//! [`geometry::LineGeometry`].
//!
//! # Example
//!
//! ```rust
//! use ass_lyrics::analysis::{resolve_lines, EstimatedMetrics};
//! use ass_lyrics::parser::Script;
//!
//! let text = "[Script Info]\nPlayResX: 1280\nPlayResY: 720\n\n[V4+ Styles]\nStyle: Default,Arial,40,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,5,10,10,10,1\n\n[Events]\nDialogue: 0,0:00:01.00,0:00:03.00,Default,,0,0,0,,{\\k100}Hello\n";
//! let script = Script::parse(text)?;
//! let lines = resolve_lines(&script, &EstimatedMetrics::default())?;
//!
//! assert_eq!(lines.len(), 1);
//! assert_eq!(lines[0].duration(), 2000);
//! assert_eq!(lines[0].text_stripped, "Hello");
//! assert_eq!(lines[0].geometry.middle, 360.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod geometry;
pub mod metrics;

pub use geometry::{LineGeometry, PlacementInput};
pub use metrics::{strip_override_blocks, EstimatedMetrics, FontSpec, TextExtents, TextMetrics};

use crate::parser::{Event, Script, Style};
use crate::utils::{CoreError, Result};
use log::{debug, trace};

/// A timed lyric line with its resolved geometry
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    /// Position in the dialogue sequence (0-based)
    pub index: usize,

    /// Source layer
    pub layer: i32,

    /// Start time in milliseconds
    pub start_ms: u32,

    /// End time in milliseconds
    pub end_ms: u32,

    /// Style name as written on the event
    pub style: String,

    /// Actor/speaker tag
    pub actor: String,

    /// Raw margin overrides (left, right, vertical), 0 meaning "use the style"
    pub margins: (i32, i32, i32),

    /// Effect field
    pub effect: String,

    /// Raw text, override blocks included
    pub text: String,

    /// Displayed text with override blocks removed
    pub text_stripped: String,

    /// On-screen placement
    pub geometry: LineGeometry,
}

impl SourceLine {
    /// Display duration in milliseconds, 0 for inverted timings
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Build a line from an event and its resolved style
    ///
    /// # Errors
    ///
    /// Returns an error if any timing, margin or style field is malformed.
    pub fn from_event<M: TextMetrics + ?Sized>(
        index: usize,
        event: &Event<'_>,
        style: &Style<'_>,
        play_res: (f64, f64),
        metrics: &M,
    ) -> Result<Self> {
        let (scale_x, scale_y) = style.scale()?;
        let font = FontSpec {
            size: style.font_size()?,
            scale_x,
            scale_y,
            spacing: style.spacing()?,
        };

        let text_stripped = strip_override_blocks(event.text);
        let extents = metrics.measure(&text_stripped, &font);

        let margins = event.margins()?;
        let style_margins = style.margins()?;
        let effective = |line: i32, fallback: i32| f64::from(if line == 0 { fallback } else { line });

        let geometry = LineGeometry::place(&PlacementInput {
            play_res,
            alignment: style.alignment()?,
            margin_l: effective(margins.0, style_margins.0),
            margin_r: effective(margins.1, style_margins.1),
            margin_v: effective(margins.2, style_margins.2),
            width: extents.width,
            height: extents.height,
        });

        Ok(Self {
            index,
            layer: event.layer_number()?,
            start_ms: event.start_ms()?,
            end_ms: event.end_ms()?,
            style: event.style.to_string(),
            actor: event.name.to_string(),
            margins,
            effect: event.effect.to_string(),
            text: event.text.to_string(),
            text_stripped,
            geometry,
        })
    }
}

/// Resolve every dialogue event of a script into [`SourceLine`]s
///
/// Comment events are skipped. Lines keep document order.
///
/// # Errors
///
/// Returns [`CoreError::UnknownStyle`] when an event references an undefined
/// style, or a format error for malformed fields.
pub fn resolve_lines<M: TextMetrics + ?Sized>(
    script: &Script<'_>,
    metrics: &M,
) -> Result<Vec<SourceLine>> {
    let play_res = script.play_res();
    let styles = script.style_map();

    let lines = script
        .dialogue()
        .enumerate()
        .map(|(index, event)| -> Result<SourceLine> {
            let name = event.style.strip_prefix('*').unwrap_or(event.style);
            let style = styles
                .get(name)
                .ok_or_else(|| CoreError::UnknownStyle {
                    name: name.to_string(),
                    line: event.line_number,
                })?;
            let line = SourceLine::from_event(index, event, style, play_res, metrics)?;
            trace!(
                "line {index}: {}ms-{}ms height {:.1} center {:.1} middle {:.1}",
                line.start_ms,
                line.end_ms,
                line.geometry.height,
                line.geometry.center,
                line.geometry.middle
            );
            Ok(line)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "resolved {} dialogue lines at {}x{}",
        lines.len(),
        play_res.0,
        play_res.1
    );
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "[Script Info]
PlayResX: 1920
PlayResY: 1080

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Lyric,Arial,60,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,50,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 1,0:00:01.00,0:00:02.50,Lyric,Alice,0,0,0,,{\\k50}one
Comment: 0,0:00:02.50,0:00:03.00,Lyric,,0,0,0,,skipped
Dialogue: 0,0:00:02.50,0:00:04.00,*Lyric,,0,0,100,fx,two
";

    #[test]
    fn resolves_dialogue_only() {
        let script = Script::parse(SCRIPT).unwrap();
        let lines = resolve_lines(&script, &EstimatedMetrics::default()).unwrap();
        assert_eq!(lines.len(), 2);

        let first = &lines[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.layer, 1);
        assert_eq!(first.actor, "Alice");
        assert_eq!(first.text, "{\\k50}one");
        assert_eq!(first.duration(), 1500);
        assert!((first.geometry.height - 60.0).abs() < 1e-9);
        assert!((first.geometry.bottom - 1030.0).abs() < 1e-9);

        let second = &lines[1];
        assert_eq!(second.index, 1);
        assert_eq!(second.effect, "fx");
        assert_eq!(second.margins, (0, 0, 100));
        assert!((second.geometry.bottom - 980.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_style_reports_line() {
        let text = "[Events]\nDialogue: 0,0:00:01.00,0:00:02.00,Missing,,0,0,0,,x\n";
        let script = Script::parse(text).unwrap();
        let err = resolve_lines(&script, &EstimatedMetrics::default()).unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownStyle {
                name: "Missing".to_string(),
                line: 2
            }
        );
    }
}
