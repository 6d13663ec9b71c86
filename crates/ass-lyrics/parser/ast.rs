//! AST nodes for the sections the lyric generator reads
//!
//! All fields are zero-copy `&str` slices into the source document. Numeric
//! accessors parse on demand so that a document with odd but unused fields
//! still loads.

use crate::utils::{parse_ass_time_ms, parse_numeric, parse_numeric_or, CoreError, Result};

/// Standard `[V4+ Styles]` field order, used when a section has no `Format:` line
pub const DEFAULT_STYLE_FORMAT: &[&str] = &[
    "Name",
    "Fontname",
    "Fontsize",
    "PrimaryColour",
    "SecondaryColour",
    "OutlineColour",
    "BackColour",
    "Bold",
    "Italic",
    "Underline",
    "StrikeOut",
    "ScaleX",
    "ScaleY",
    "Spacing",
    "Angle",
    "BorderStyle",
    "Outline",
    "Shadow",
    "Alignment",
    "MarginL",
    "MarginR",
    "MarginV",
    "Encoding",
];

/// Standard `[Events]` field order, used when a section has no `Format:` line
pub const DEFAULT_EVENT_FORMAT: &[&str] = &[
    "Layer", "Start", "End", "Style", "Name", "MarginL", "MarginR", "MarginV", "Effect", "Text",
];

/// Style definition from `[V4+ Styles]`
///
/// # Examples
///
/// ```rust
/// use ass_lyrics::parser::ast::Style;
///
/// let style = Style {
///     name: "MainStyle",
///     fontsize: "48",
///     ..Style::default()
/// };
///
/// assert_eq!(style.font_size().unwrap(), 48.0);
/// assert_eq!(style.alignment().unwrap(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style<'a> {
    /// Style name (must be unique within script)
    pub name: &'a str,

    /// Font name for text rendering
    pub fontname: &'a str,

    /// Font size in points
    pub fontsize: &'a str,

    /// Primary color in BGR format (&HBBGGRR)
    pub primary_colour: &'a str,

    /// Secondary color, the unsung karaoke color
    pub secondary_colour: &'a str,

    /// Outline color
    pub outline_colour: &'a str,

    /// Shadow/background color
    pub back_colour: &'a str,

    /// Bold flag (-1/0 or weight)
    pub bold: &'a str,

    /// Italic flag
    pub italic: &'a str,

    /// Horizontal scale percentage
    pub scale_x: &'a str,

    /// Vertical scale percentage
    pub scale_y: &'a str,

    /// Character spacing in pixels
    pub spacing: &'a str,

    /// Outline width in pixels
    pub outline: &'a str,

    /// Shadow depth in pixels
    pub shadow: &'a str,

    /// Numpad alignment (1-9), or legacy SSA alignment in `[V4 Styles]`
    pub alignment: &'a str,

    /// Left margin in pixels
    pub margin_l: &'a str,

    /// Right margin in pixels
    pub margin_r: &'a str,

    /// Vertical margin in pixels
    pub margin_v: &'a str,

    /// Font encoding identifier
    pub encoding: &'a str,

    /// Whether `alignment` uses the legacy SSA scheme
    pub legacy_alignment: bool,
}

impl Style<'_> {
    /// Font size in points
    ///
    /// # Errors
    ///
    /// Returns an error if the field is not a number.
    pub fn font_size(&self) -> Result<f64> {
        parse_numeric(self.fontsize)
    }

    /// Horizontal and vertical scale in percent, defaulting to 100
    ///
    /// # Errors
    ///
    /// Returns an error if either field is present and not a number.
    pub fn scale(&self) -> Result<(f64, f64)> {
        Ok((
            parse_numeric_or(self.scale_x, 100.0)?,
            parse_numeric_or(self.scale_y, 100.0)?,
        ))
    }

    /// Extra spacing between characters in pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the field is present and not a number.
    pub fn spacing(&self) -> Result<f64> {
        parse_numeric_or(self.spacing, 0.0)
    }

    /// Numpad alignment (1-9)
    ///
    /// Legacy SSA codes are converted: 1-3 bottom, +4 top, +8 middle.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is not a valid alignment code.
    pub fn alignment(&self) -> Result<u8> {
        let raw: u8 = parse_numeric_or(self.alignment, 2)?;
        let numpad = if self.legacy_alignment {
            legacy_to_numpad(raw)
        } else {
            Some(raw)
        };
        numpad
            .filter(|an| (1..=9).contains(an))
            .ok_or_else(|| CoreError::invalid_numeric(self.alignment, "alignment must be 1-9"))
    }

    /// Margins as (left, right, vertical)
    ///
    /// # Errors
    ///
    /// Returns an error if a margin is present and not an integer.
    pub fn margins(&self) -> Result<(i32, i32, i32)> {
        Ok((
            parse_numeric_or(self.margin_l, 0)?,
            parse_numeric_or(self.margin_r, 0)?,
            parse_numeric_or(self.margin_v, 0)?,
        ))
    }
}

/// Convert SSA `\a`-style alignment to numpad alignment
const fn legacy_to_numpad(code: u8) -> Option<u8> {
    match code {
        1..=3 => Some(code),
        5..=7 => Some(code + 2),
        9..=11 => Some(code - 5),
        _ => None,
    }
}

impl Default for Style<'_> {
    /// Standard ASS default style values
    fn default() -> Self {
        Self {
            name: "Default",
            fontname: "Arial",
            fontsize: "20",
            primary_colour: "&H00FFFFFF",
            secondary_colour: "&H000000FF",
            outline_colour: "&H00000000",
            back_colour: "&H00000000",
            bold: "0",
            italic: "0",
            scale_x: "100",
            scale_y: "100",
            spacing: "0",
            outline: "2",
            shadow: "2",
            alignment: "2",
            margin_l: "10",
            margin_r: "10",
            margin_v: "10",
            encoding: "1",
            legacy_alignment: false,
        }
    }
}

/// Event type discriminant for timeline events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Dialogue line (displayed during playback)
    Dialogue,
    /// Comment (ignored during playback)
    Comment,
    /// Picture display event
    Picture,
    /// Sound playback event
    Sound,
    /// Movie playback event
    Movie,
    /// Command execution event
    Command,
}

impl EventType {
    /// Parse event type from its line prefix
    ///
    /// ```rust
    /// # use ass_lyrics::parser::ast::EventType;
    /// assert_eq!(EventType::parse_type("Dialogue"), Some(EventType::Dialogue));
    /// assert_eq!(EventType::parse_type("Unknown"), None);
    /// ```
    #[must_use]
    pub fn parse_type(s: &str) -> Option<Self> {
        match s.trim() {
            "Dialogue" => Some(Self::Dialogue),
            "Comment" => Some(Self::Comment),
            "Picture" => Some(Self::Picture),
            "Sound" => Some(Self::Sound),
            "Movie" => Some(Self::Movie),
            "Command" => Some(Self::Command),
            _ => None,
        }
    }

    /// Canonical ASS event type name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dialogue => "Dialogue",
            Self::Comment => "Comment",
            Self::Picture => "Picture",
            Self::Sound => "Sound",
            Self::Movie => "Movie",
            Self::Command => "Command",
        }
    }
}

/// Event from the `[Events]` section
///
/// ```rust
/// use ass_lyrics::parser::ast::{Event, EventType};
///
/// let event = Event {
///     start: "0:00:05.00",
///     end: "0:00:07.50",
///     text: "{\\k20}la {\\k30}la",
///     ..Event::default()
/// };
///
/// assert!(event.is_dialogue());
/// assert_eq!(event.duration_ms().unwrap(), 2500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<'a> {
    /// Event type (Dialogue, Comment, etc.)
    pub event_type: EventType,

    /// Layer for drawing order (higher layers drawn on top)
    pub layer: &'a str,

    /// Start time in ASS time format (H:MM:SS.CC)
    pub start: &'a str,

    /// End time in ASS time format (H:MM:SS.CC)
    pub end: &'a str,

    /// Style name reference
    pub style: &'a str,

    /// Character name or speaker
    pub name: &'a str,

    /// Left margin override (pixels)
    pub margin_l: &'a str,

    /// Right margin override (pixels)
    pub margin_r: &'a str,

    /// Vertical margin override (pixels)
    pub margin_v: &'a str,

    /// Effect specification
    pub effect: &'a str,

    /// Text content with possible override blocks
    pub text: &'a str,

    /// 1-based line number in the source document
    pub line_number: usize,
}

impl Event<'_> {
    /// Check if this is a dialogue event
    #[must_use]
    pub const fn is_dialogue(&self) -> bool {
        matches!(self.event_type, EventType::Dialogue)
    }

    /// Start time in milliseconds
    ///
    /// # Errors
    ///
    /// Returns an error if the time format is invalid.
    pub fn start_ms(&self) -> Result<u32> {
        parse_ass_time_ms(self.start)
    }

    /// End time in milliseconds
    ///
    /// # Errors
    ///
    /// Returns an error if the time format is invalid.
    pub fn end_ms(&self) -> Result<u32> {
        parse_ass_time_ms(self.end)
    }

    /// Duration in milliseconds, 0 when the end precedes the start
    ///
    /// # Errors
    ///
    /// Returns an error if either time is invalid.
    pub fn duration_ms(&self) -> Result<u32> {
        Ok(self.end_ms()?.saturating_sub(self.start_ms()?))
    }

    /// Layer number, 0 when empty
    ///
    /// # Errors
    ///
    /// Returns an error if the field is not an integer.
    pub fn layer_number(&self) -> Result<i32> {
        parse_numeric_or(self.layer, 0)
    }

    /// Margin overrides as (left, right, vertical), 0 meaning "use the style"
    ///
    /// # Errors
    ///
    /// Returns an error if a margin is not an integer.
    pub fn margins(&self) -> Result<(i32, i32, i32)> {
        Ok((
            parse_numeric_or(self.margin_l, 0)?,
            parse_numeric_or(self.margin_r, 0)?,
            parse_numeric_or(self.margin_v, 0)?,
        ))
    }

    /// Serialize with the given field order, optionally forcing the event type
    ///
    /// ```rust
    /// # use ass_lyrics::parser::ast::{Event, EventType, DEFAULT_EVENT_FORMAT};
    /// let event = Event { text: "Hello", ..Event::default() };
    /// assert_eq!(
    ///     event.to_ass_string_as(EventType::Comment, DEFAULT_EVENT_FORMAT),
    ///     "Comment: 0,0:00:00.00,0:00:00.00,Default,,0,0,0,,Hello"
    /// );
    /// ```
    #[must_use]
    pub fn to_ass_string_as(&self, event_type: EventType, format: &[&str]) -> String {
        let fields: Vec<&str> = format
            .iter()
            .map(|field| match field.to_ascii_lowercase().as_str() {
                "layer" => self.layer,
                "start" => self.start,
                "end" => self.end,
                "style" => self.style,
                "name" | "actor" => self.name,
                "marginl" => self.margin_l,
                "marginr" => self.margin_r,
                "marginv" => self.margin_v,
                "effect" => self.effect,
                "text" => self.text,
                "marked" => "Marked=0",
                _ => "",
            })
            .collect();
        format!("{}: {}", event_type.as_str(), fields.join(","))
    }

    /// Serialize with the given field order
    #[must_use]
    pub fn to_ass_string(&self, format: &[&str]) -> String {
        self.to_ass_string_as(self.event_type, format)
    }
}

impl Default for Event<'_> {
    fn default() -> Self {
        Self {
            event_type: EventType::Dialogue,
            layer: "0",
            start: "0:00:00.00",
            end: "0:00:00.00",
            style: "Default",
            name: "",
            margin_l: "0",
            margin_r: "0",
            margin_v: "0",
            effect: "",
            text: "",
            line_number: 0,
        }
    }
}
