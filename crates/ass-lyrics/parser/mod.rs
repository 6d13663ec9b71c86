//! Zero-copy ASS reader
//!
//! Parses just enough of an ASS document for the lyric generator: script
//! resolution from `[Script Info]`, style definitions and events. Every other
//! section is kept verbatim so the writer can reproduce it.
//!
//! # Example
//!
//! ```rust
//! use ass_lyrics::parser::Script;
//!
//! let text = "[Script Info]\nPlayResX: 1920\nPlayResY: 1080\n\n[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\nDialogue: 0,0:00:01.00,0:00:03.00,Default,,0,0,0,,Hello\n";
//! let script = Script::parse(text)?;
//! assert_eq!(script.play_res(), (1920.0, 1080.0));
//! assert_eq!(script.events().unwrap().events.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ast;
pub mod sections;

pub use ast::{Event, EventType, Style};
pub use sections::{EventsSection, RawSection, ScriptInfo, StylesSection};

use crate::utils::{create_hash_map_with_capacity, parse_numeric, CoreError, Result};
use ahash::RandomState;
use log::debug;
use sections::{parse_event_line, parse_format_fields, parse_style_line};
use std::collections::HashMap;

/// libass default resolution when `[Script Info]` declares none
pub const DEFAULT_PLAY_RES: (f64, f64) = (384.0, 288.0);

/// Top-level section of an ASS document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<'a> {
    /// `[Script Info]`
    ScriptInfo(ScriptInfo<'a>),
    /// `[V4+ Styles]` / `[V4 Styles]`
    Styles(StylesSection<'a>),
    /// `[Events]`
    Events(EventsSection<'a>),
    /// Anything else, kept verbatim
    Other(RawSection<'a>),
}

impl Section<'_> {
    /// Raw header line of this section
    #[must_use]
    pub const fn header(&self) -> &str {
        match self {
            Self::ScriptInfo(info) => info.header,
            Self::Styles(styles) => styles.header,
            Self::Events(events) => events.header,
            Self::Other(raw) => raw.header,
        }
    }
}

/// Parsed ASS document borrowing from its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script<'a> {
    /// Sections in document order
    sections: Vec<Section<'a>>,
}

/// Which section the line loop is currently filling
#[derive(Clone, Copy)]
enum Cursor {
    /// Before the first header
    Preamble,
    /// Inside `sections[idx]`
    In(usize),
}

impl<'a> Script<'a> {
    /// Parse an ASS document
    ///
    /// A UTF-8 BOM is skipped and both LF and CRLF line endings are accepted.
    /// Lines before the first section header are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] for malformed style or event lines.
    pub fn parse(source: &'a str) -> Result<Self> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut sections: Vec<Section<'a>> = Vec::new();
        let mut cursor = Cursor::Preamble;

        for (idx, raw_line) in source.lines().enumerate() {
            let line_number = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                sections.push(Self::open_section(line));
                cursor = Cursor::In(sections.len() - 1);
                continue;
            }

            let Cursor::In(current) = cursor else {
                debug!("ignoring line {line_number} before the first section header");
                continue;
            };

            match &mut sections[current] {
                Section::ScriptInfo(info) => {
                    info.lines.push(raw_line);
                    if !line.starts_with(';') {
                        if let Some((key, value)) = line.split_once(':') {
                            info.fields.push((key.trim(), value.trim()));
                        }
                    }
                }
                Section::Styles(styles) => {
                    styles.lines.push(raw_line);
                    if let Some(data) = line.strip_prefix("Format:") {
                        styles.format = parse_format_fields(data);
                    } else if let Some(data) = line.strip_prefix("Style:") {
                        let legacy = styles.header.eq_ignore_ascii_case("[V4 Styles]");
                        let style =
                            parse_style_line(data.trim(), &styles.format, legacy, line_number)?;
                        styles.styles.push(style);
                    }
                }
                Section::Events(events) => {
                    if let Some(data) = line.strip_prefix("Format:") {
                        events.format = parse_format_fields(data);
                    } else if !line.starts_with(';') {
                        let event = parse_event_line(
                            raw_line.trim_start(),
                            &events.format,
                            line_number,
                        )?;
                        events.events.push(event);
                    }
                }
                Section::Other(raw) => raw.lines.push(raw_line),
            }
        }

        debug!("parsed {} sections", sections.len());
        Ok(Self { sections })
    }

    /// Create an empty section for a header line
    fn open_section(header: &'a str) -> Section<'a> {
        let name = &header[1..header.len() - 1];
        if name.eq_ignore_ascii_case("Script Info") {
            Section::ScriptInfo(ScriptInfo {
                header,
                lines: Vec::new(),
                fields: Vec::new(),
            })
        } else if name.eq_ignore_ascii_case("V4+ Styles") || name.eq_ignore_ascii_case("V4 Styles")
        {
            Section::Styles(StylesSection {
                header,
                lines: Vec::new(),
                format: Vec::new(),
                styles: Vec::new(),
            })
        } else if name.eq_ignore_ascii_case("Events") {
            Section::Events(EventsSection {
                header,
                format: Vec::new(),
                events: Vec::new(),
            })
        } else {
            Section::Other(RawSection {
                header,
                lines: Vec::new(),
            })
        }
    }

    /// Sections in document order
    #[must_use]
    pub fn sections(&self) -> &[Section<'a>] {
        &self.sections
    }

    /// The `[Script Info]` section, if present
    #[must_use]
    pub fn script_info(&self) -> Option<&ScriptInfo<'a>> {
        self.sections.iter().find_map(|section| match section {
            Section::ScriptInfo(info) => Some(info),
            _ => None,
        })
    }

    /// The first styles section, if present
    #[must_use]
    pub fn styles(&self) -> Option<&StylesSection<'a>> {
        self.sections.iter().find_map(|section| match section {
            Section::Styles(styles) => Some(styles),
            _ => None,
        })
    }

    /// The `[Events]` section, if present
    #[must_use]
    pub fn events(&self) -> Option<&EventsSection<'a>> {
        self.sections.iter().find_map(|section| match section {
            Section::Events(events) => Some(events),
            _ => None,
        })
    }

    /// Dialogue events in document order
    pub fn dialogue(&self) -> impl Iterator<Item = &Event<'a>> + '_ {
        self.events()
            .into_iter()
            .flat_map(|section| section.events.iter())
            .filter(|event| event.is_dialogue())
    }

    /// Find a style by name
    ///
    /// A leading `*` on the event's style reference is ignored, matching
    /// VSFilter and libass.
    #[must_use]
    pub fn find_style(&self, name: &str) -> Option<&Style<'a>> {
        let name = name.strip_prefix('*').unwrap_or(name);
        self.styles()?.styles.iter().find(|style| style.name == name)
    }

    /// Index all styles by name for repeated lookups
    #[must_use]
    pub fn style_map(&self) -> HashMap<&'a str, &Style<'a>, RandomState> {
        let styles = self.styles().map_or(&[][..], |section| &section.styles[..]);
        let mut map = create_hash_map_with_capacity(styles.len());
        for style in styles {
            map.insert(style.name, style);
        }
        map
    }

    /// Script resolution as (`PlayResX`, `PlayResY`)
    ///
    /// Falls back to 384x288 when neither is set. When only one is set the
    /// other is derived assuming 4:3, except the 1280x1024 special case.
    #[must_use]
    pub fn play_res(&self) -> (f64, f64) {
        let read = |key: &str| -> Option<f64> {
            self.script_info()
                .and_then(|info| info.get(key))
                .and_then(|value| parse_numeric::<f64>(value).ok())
                .filter(|value| *value > 0.0)
        };

        match (read("PlayResX"), read("PlayResY")) {
            (Some(x), Some(y)) => (x, y),
            (Some(x), None) if (x - 1280.0).abs() < f64::EPSILON => (x, 1024.0),
            (Some(x), None) => (x, x * 3.0 / 4.0),
            (None, Some(y)) if (y - 1024.0).abs() < f64::EPSILON => (1280.0, y),
            (None, Some(y)) => (y * 4.0 / 3.0, y),
            (None, None) => DEFAULT_PLAY_RES,
        }
    }

    /// Check that the document has an `[Events]` section
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] when the section is missing.
    pub fn require_events(&self) -> Result<&EventsSection<'a>> {
        self.events()
            .ok_or_else(|| CoreError::parse("document has no [Events] section"))
    }
}
