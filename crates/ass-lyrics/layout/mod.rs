//! Karaoke "now playing" layout generation
//!
//! For every lyric line the generator emits one highlighted rendering of the
//! line itself plus renderings of its neighbours: previous lines stacked
//! above and upcoming lines stacked below. Each rendering is a
//! [`DerivedLine`] whose text carries the override tags that place, scale,
//! fade and slide it.
//!
//! # Stack Layout
//!
//! ```text
//! layer K_prev         prev K_prev   (fading out)
//! layer 1              prev 1
//! source layer         current       (main scale)
//! layer K_prev + 1     next 1
//! layer K_prev+K_next  next K_next   (fading in)
//! ```
//!
//! # Example
//!
//! ```rust
//! use ass_lyrics::analysis::{resolve_lines, EstimatedMetrics};
//! use ass_lyrics::layout::{generate, LayoutConfig, LayoutGenerator};
//! use ass_lyrics::parser::Script;
//!
//! let text = "[Script Info]\nPlayResX: 1280\nPlayResY: 720\n\n[V4+ Styles]\nStyle: Default,Arial,40,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,5,10,10,10,1\n\n[Events]\nDialogue: 0,0:00:01.00,0:00:03.00,Default,,0,0,0,,first\nDialogue: 0,0:00:03.00,0:00:05.00,Default,,0,0,0,,second\n";
//! let script = Script::parse(text)?;
//! let lines = resolve_lines(&script, &EstimatedMetrics::default())?;
//!
//! let generator = LayoutGenerator::new(LayoutConfig::default())?;
//! let mut output = Vec::new();
//! let stats = generate(&generator, &lines, &mut output)?;
//!
//! assert_eq!(stats.total(), 4);
//! assert!(output[0].text.ends_with("first"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod driver;
pub mod generator;

pub use config::LayoutConfig;
pub use driver::{generate, GenerationStats, LineSink};
pub use generator::LayoutGenerator;

use crate::parser::ast::Event;
use crate::utils::format_ass_time_ms;

/// Which part of the stack a rendering belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// A preceding line stacked above
    Previous,
    /// The highlighted line
    Current,
    /// An upcoming line stacked below
    Next,
}

/// One generated rendering, ready to be written as a `Dialogue` event
///
/// Timing, margins and effect always come from the current line of the
/// context the rendering was produced for.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedLine {
    /// Stack position
    pub kind: LineKind,

    /// Distance from the current line (0 for the current line itself)
    pub slot: usize,

    /// Drawing layer
    pub layer: i32,

    /// Start time in milliseconds
    pub start_ms: u32,

    /// End time in milliseconds
    pub end_ms: u32,

    /// Target style, actor suffix included
    pub style: String,

    /// Actor of the line whose text is shown
    pub actor: String,

    /// Margin overrides (left, right, vertical)
    pub margins: (i32, i32, i32),

    /// Effect field
    pub effect: String,

    /// `{tags}text`
    pub text: String,

    /// Top of the rendering after stacking
    pub y: f64,
}

impl DerivedLine {
    /// Display duration in milliseconds
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Serialize as a `Dialogue:` line with the given field order
    ///
    /// Margins are zero-padded to four digits.
    #[must_use]
    pub fn to_ass_string(&self, format: &[&str]) -> String {
        let layer = self.layer.to_string();
        let start = format_ass_time_ms(self.start_ms);
        let end = format_ass_time_ms(self.end_ms);
        let margin_l = format!("{:04}", self.margins.0);
        let margin_r = format!("{:04}", self.margins.1);
        let margin_v = format!("{:04}", self.margins.2);

        Event {
            layer: &layer,
            start: &start,
            end: &end,
            style: &self.style,
            name: &self.actor,
            margin_l: &margin_l,
            margin_r: &margin_r,
            margin_v: &margin_v,
            effect: &self.effect,
            text: &self.text,
            ..Event::default()
        }
        .to_ass_string(format)
    }
}
