//! ASS override tag builders
//!
//! Every animation parameter the layout generator computes ends up as one of
//! a handful of override tags. Each tag is a small value built by a pure
//! function and formatted through `Display`, so equal inputs always give
//! byte-identical markup.
//!
//! # Supported Tags
//!
//! - `\an`: numpad alignment ([`alignment::alignment`])
//! - `\fscx` + `\fscy`: font scale ([`alignment::font_scale`])
//! - `\pos`: absolute position ([`position::position`])
//! - `\move`: timed movement ([`position::movement`])
//! - `\fad`: two-point fade ([`fade::simple_fade`])
//! - `\fade`: three-level, four-time fade ([`fade::fade`])
//!
//! # Example
//!
//! ```rust
//! use ass_lyrics::tags::{alignment, font_scale, position, OverrideBlock};
//!
//! let mut block = OverrideBlock::new();
//! block.push(alignment(5));
//! block.push(font_scale(70, 70));
//! block.push(position(640.0, 360.0));
//! assert_eq!(block.apply("lyric"), "{\\an5\\fscx70\\fscy70\\pos(640.000,360.000)}lyric");
//! ```

pub mod alignment;
pub mod fade;
pub mod position;

pub use alignment::{alignment, font_scale};
pub use fade::{fade, simple_fade};
pub use position::{movement, position};

use core::fmt;
use smallvec::SmallVec;

/// A single override tag with its numeric parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverrideTag {
    /// `\an<n>`, numpad alignment 1-9
    Alignment(u8),
    /// `\fscx<x>\fscy<y>`, scale in percent
    FontScale {
        /// Horizontal scale
        x: u32,
        /// Vertical scale
        y: u32,
    },
    /// `\pos(x,y)`
    Position {
        /// Anchor x
        x: f64,
        /// Anchor y
        y: f64,
    },
    /// `\move(x1,y1,x2,y2,t1,t2)`, times relative to line start in ms
    Move {
        /// Start x
        x1: f64,
        /// Start y
        y1: f64,
        /// End x
        x2: f64,
        /// End y
        y2: f64,
        /// Movement start
        t1: u32,
        /// Movement end
        t2: u32,
    },
    /// `\fad(fade_in,fade_out)` in ms
    SimpleFade {
        /// Fade-in duration from line start
        fade_in: u32,
        /// Fade-out duration before line end
        fade_out: u32,
    },
    /// `\fade(a1,a2,a3,t1,t2,t3,t4)`, alpha 0 = opaque, 255 = invisible
    Fade {
        /// Alpha before `t1`
        a1: u8,
        /// Alpha between `t2` and `t3`
        a2: u8,
        /// Alpha after `t4`
        a3: u8,
        /// Start of first transition
        t1: u32,
        /// End of first transition
        t2: u32,
        /// Start of second transition
        t3: u32,
        /// End of second transition
        t4: u32,
    },
}

impl fmt::Display for OverrideTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Alignment(an) => write!(f, "\\an{an}"),
            Self::FontScale { x, y } => write!(f, "\\fscx{x}\\fscy{y}"),
            Self::Position { x, y } => write!(f, "\\pos({x:.3},{y:.3})"),
            Self::Move {
                x1,
                y1,
                x2,
                y2,
                t1,
                t2,
            } => write!(f, "\\move({x1:.3},{y1:.3},{x2:.3},{y2:.3},{t1},{t2})"),
            Self::SimpleFade { fade_in, fade_out } => write!(f, "\\fad({fade_in},{fade_out})"),
            Self::Fade {
                a1,
                a2,
                a3,
                t1,
                t2,
                t3,
                t4,
            } => write!(f, "\\fade({a1},{a2},{a3},{t1},{t2},{t3},{t4})"),
        }
    }
}

/// Ordered set of tags rendered as one `{...}` block
///
/// Tags are emitted in push order. The generator always pushes alignment,
/// scale, position or move, then fade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideBlock {
    /// Tags in emission order
    tags: SmallVec<[OverrideTag; 4]>,
}

impl OverrideBlock {
    /// Create an empty block
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag
    pub fn push(&mut self, tag: OverrideTag) -> &mut Self {
        self.tags.push(tag);
        self
    }

    /// Append a tag when present
    pub fn push_opt(&mut self, tag: Option<OverrideTag>) -> &mut Self {
        if let Some(tag) = tag {
            self.tags.push(tag);
        }
        self
    }

    /// Tags in emission order
    #[must_use]
    pub fn tags(&self) -> &[OverrideTag] {
        &self.tags
    }

    /// Prefix `text` with this block
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        format!("{self}{text}")
    }
}

impl fmt::Display for OverrideBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for tag in &self.tags {
            write!(f, "{tag}")?;
        }
        f.write_str("}")
    }
}
