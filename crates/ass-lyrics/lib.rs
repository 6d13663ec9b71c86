//! # ass-lyrics
//!
//! Karaoke "now playing" lyric layouts for ASS (Advanced `SubStation` Alpha)
//! subtitles. Each timed lyric line becomes a highlighted center rendering
//! surrounded by scaled-down, faded copies of the lines before and after it,
//! animated with `\move` and `\fade` override tags.
//!
//! ## Features
//!
//! - **Zero-copy reading**: sections, styles and events borrow from the input
//! - **Pure layout**: the generator is a deterministic function of its inputs
//! - **Pluggable measurement**: line geometry goes through [`analysis::TextMetrics`]
//! - **Faithful output**: untouched sections are written back verbatim
//!
//! ## Quick Start
//!
//! ```rust
//! use ass_lyrics::{
//!     generate, resolve_lines, EstimatedMetrics, LayoutConfig, LayoutGenerator, Script,
//!     ScriptWriter, WriteOptions,
//! };
//!
//! let source = r"[Script Info]
//! PlayResX: 1920
//! PlayResY: 1080
//!
//! [V4+ Styles]
//! Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
//! Style: Default,Arial,48,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,5,10,10,10,1
//!
//! [Events]
//! Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
//! Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,{\k100}first line
//! Dialogue: 0,0:00:04.00,0:00:07.00,Default,,0,0,0,,{\k100}second line
//! ";
//!
//! let script = Script::parse(source)?;
//! let lines = resolve_lines(&script, &EstimatedMetrics::default())?;
//! let generator = LayoutGenerator::new(LayoutConfig::default())?;
//!
//! let mut writer = ScriptWriter::new(&script, WriteOptions::default());
//! let stats = generate(&generator, &lines, &mut writer)?;
//! let output = writer.finish();
//!
//! assert_eq!(stats.current, 2);
//! assert!(output.contains("\\an5\\fscx100\\fscy100\\pos(960.000,540.000)"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]

pub mod analysis;
pub mod layout;
pub mod parser;
pub mod tags;
pub mod utils;
pub mod writer;

pub use analysis::{resolve_lines, EstimatedMetrics, SourceLine, TextMetrics};
pub use layout::{
    generate, DerivedLine, GenerationStats, LayoutConfig, LayoutGenerator, LineKind, LineSink,
};
pub use parser::Script;
pub use tags::{OverrideBlock, OverrideTag};
pub use utils::{CoreError, Result};
pub use writer::{ScriptWriter, WriteOptions};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
