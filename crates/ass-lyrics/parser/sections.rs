//! Section bodies and the line-level parsers that fill them
//!
//! Each section keeps the raw lines it was built from so the writer can
//! reproduce everything the generator does not touch byte for byte.

use crate::parser::ast::{Event, EventType, Style, DEFAULT_EVENT_FORMAT, DEFAULT_STYLE_FORMAT};
use crate::utils::{CoreError, Result};

/// `[Script Info]` key/value pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInfo<'a> {
    /// Raw header line, e.g. `[Script Info]`
    pub header: &'a str,

    /// Raw body lines, blank lines removed
    pub lines: Vec<&'a str>,

    /// Parsed `Key: Value` pairs in document order
    pub fields: Vec<(&'a str, &'a str)>,
}

impl<'a> ScriptInfo<'a> {
    /// Look up a field by key (case-insensitive)
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| *v)
    }
}

/// `[V4+ Styles]` or `[V4 Styles]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesSection<'a> {
    /// Raw header line
    pub header: &'a str,

    /// Raw body lines, blank lines removed
    pub lines: Vec<&'a str>,

    /// Field order from the `Format:` line
    pub format: Vec<&'a str>,

    /// Parsed style definitions
    pub styles: Vec<Style<'a>>,
}

/// `[Events]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsSection<'a> {
    /// Raw header line
    pub header: &'a str,

    /// Field order from the `Format:` line
    pub format: Vec<&'a str>,

    /// Parsed events in document order
    pub events: Vec<Event<'a>>,
}

/// Any section the generator does not interpret (`[Fonts]`, `[Aegisub Project Garbage]`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection<'a> {
    /// Raw header line
    pub header: &'a str,

    /// Raw body lines, blank lines removed
    pub lines: Vec<&'a str>,
}

/// Split a `Format:` body into trimmed field names
pub(crate) fn parse_format_fields(data: &str) -> Vec<&str> {
    data.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect()
}

/// Split a data line into exactly `format.len()` fields
///
/// When the format contains `Text`, the last field swallows any remaining
/// commas so dialogue text keeps its punctuation.
fn split_fields<'a>(data: &'a str, format: &[&str], line_number: usize) -> Result<Vec<&'a str>> {
    let parts: Vec<&'a str> = data.splitn(format.len(), ',').collect();
    if parts.len() < format.len() {
        return Err(CoreError::parse(format!(
            "line {line_number}: found {} fields, expected {}",
            parts.len(),
            format.len()
        )));
    }
    Ok(parts)
}

/// Parse the body of a `Style:` line
///
/// # Errors
///
/// Returns [`CoreError::Parse`] if the line has fewer fields than the format.
pub fn parse_style_line<'a>(
    data: &'a str,
    format: &[&str],
    legacy_alignment: bool,
    line_number: usize,
) -> Result<Style<'a>> {
    let format = if format.is_empty() {
        DEFAULT_STYLE_FORMAT
    } else {
        format
    };
    let parts = split_fields(data, format, line_number)?;

    let get_field = |name: &str| -> &'a str {
        format
            .iter()
            .position(|field| field.eq_ignore_ascii_case(name))
            .and_then(|idx| parts.get(idx))
            .map_or("", |s| s.trim())
    };

    let name = get_field("Name");
    if name.is_empty() {
        return Err(CoreError::parse(format!(
            "line {line_number}: style without a name"
        )));
    }

    Ok(Style {
        name,
        fontname: get_field("Fontname"),
        fontsize: get_field("Fontsize"),
        primary_colour: get_field("PrimaryColour"),
        secondary_colour: get_field("SecondaryColour"),
        outline_colour: match get_field("OutlineColour") {
            "" => get_field("TertiaryColour"),
            colour => colour,
        },
        back_colour: get_field("BackColour"),
        bold: get_field("Bold"),
        italic: get_field("Italic"),
        scale_x: get_field("ScaleX"),
        scale_y: get_field("ScaleY"),
        spacing: get_field("Spacing"),
        outline: get_field("Outline"),
        shadow: get_field("Shadow"),
        alignment: get_field("Alignment"),
        margin_l: get_field("MarginL"),
        margin_r: get_field("MarginR"),
        margin_v: get_field("MarginV"),
        encoding: get_field("Encoding"),
        legacy_alignment,
    })
}

/// Parse a full event line (`Dialogue: ...`, `Comment: ...`)
///
/// # Errors
///
/// Returns [`CoreError::Parse`] for unknown event types or when the line has
/// fewer fields than the format.
pub fn parse_event_line<'a>(
    line: &'a str,
    format: &[&str],
    line_number: usize,
) -> Result<Event<'a>> {
    let (kind, data) = line.split_once(':').ok_or_else(|| {
        CoreError::parse(format!("line {line_number}: expected 'Type: fields'"))
    })?;
    let event_type = EventType::parse_type(kind).ok_or_else(|| {
        CoreError::parse(format!(
            "line {line_number}: unknown event type '{}'",
            kind.trim()
        ))
    })?;

    let format = if format.is_empty() {
        DEFAULT_EVENT_FORMAT
    } else {
        format
    };
    let parts = split_fields(data.trim_start(), format, line_number)?;

    let get_field = |name: &str| -> &'a str {
        format
            .iter()
            .position(|field| field.eq_ignore_ascii_case(name))
            .and_then(|idx| parts.get(idx))
            .map_or("", |s| {
                if name.eq_ignore_ascii_case("Text") {
                    *s
                } else {
                    s.trim()
                }
            })
    };

    Ok(Event {
        event_type,
        layer: get_field("Layer"),
        start: get_field("Start"),
        end: get_field("End"),
        style: get_field("Style"),
        name: match get_field("Name") {
            "" => get_field("Actor"),
            name => name,
        },
        margin_l: get_field("MarginL"),
        margin_r: get_field("MarginR"),
        margin_v: get_field("MarginV"),
        effect: get_field("Effect"),
        text: get_field("Text"),
        line_number,
    })
}
