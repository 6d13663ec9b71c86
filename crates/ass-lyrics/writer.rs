//! Serializes a parsed script together with generated lines
//!
//! [`ScriptWriter`] is a [`LineSink`]: generated renderings are formatted as
//! they arrive and appended after the original events when the document is
//! finished. Every section other than `[Events]` is reproduced line for line.
//!
//! # Example
//!
//! ```rust
//! use ass_lyrics::parser::Script;
//! use ass_lyrics::writer::{ScriptWriter, WriteOptions};
//!
//! let text = "[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\nDialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,hi\n";
//! let script = Script::parse(text)?;
//! let writer = ScriptWriter::new(&script, WriteOptions::default());
//! let output = writer.finish();
//!
//! assert!(output.contains("Comment: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,hi"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::layout::{DerivedLine, LineSink};
use crate::parser::ast::{EventType, DEFAULT_EVENT_FORMAT};
use crate::parser::{EventsSection, Script, Section};
use crate::utils::{create_hash_map, Result};
use ahash::RandomState;
use core::fmt::Write as _;
use std::collections::HashMap;

/// Output options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriteOptions {
    /// Keep the source dialogue as `Comment` events instead of dropping it
    pub keep_original: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            keep_original: true,
        }
    }
}

/// Collects generated lines and renders the final document
#[derive(Debug)]
pub struct ScriptWriter<'s, 'a> {
    script: &'s Script<'a>,
    options: WriteOptions,
    format: Vec<&'a str>,
    generated: Vec<String>,
    style_uses: HashMap<String, usize, RandomState>,
}

impl<'s, 'a> ScriptWriter<'s, 'a> {
    /// Create a writer for `script`
    ///
    /// Generated lines use the `[Events]` field order, or the standard order
    /// when the script declares none.
    #[must_use]
    pub fn new(script: &'s Script<'a>, options: WriteOptions) -> Self {
        let format = script
            .events()
            .map(|events| events.format.clone())
            .filter(|format| !format.is_empty())
            .unwrap_or_else(|| DEFAULT_EVENT_FORMAT.to_vec());

        Self {
            script,
            options,
            format,
            generated: Vec::new(),
            style_uses: create_hash_map(),
        }
    }

    /// Number of generated lines received so far
    #[must_use]
    pub fn generated_len(&self) -> usize {
        self.generated.len()
    }

    /// Generated style names the script does not define, sorted by name
    ///
    /// Each name is paired with the number of generated lines using it.
    #[must_use]
    pub fn missing_styles(&self) -> Vec<(String, usize)> {
        let mut missing: Vec<(String, usize)> = self
            .style_uses
            .iter()
            .filter(|(name, _)| self.script.find_style(name).is_none())
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Render the document
    #[must_use]
    pub fn finish(self) -> String {
        let mut out = String::new();
        let mut wrote_events = false;

        for (idx, section) in self.script.sections().iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "{}", section.header());
            match section {
                Section::ScriptInfo(info) => push_lines(&mut out, &info.lines),
                Section::Styles(styles) => push_lines(&mut out, &styles.lines),
                Section::Other(raw) => push_lines(&mut out, &raw.lines),
                Section::Events(events) if !wrote_events => {
                    self.write_events(&mut out, Some(events));
                    wrote_events = true;
                }
                Section::Events(events) => self.write_originals(&mut out, events),
            }
        }

        if !wrote_events {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str("[Events]\n");
            self.write_events(&mut out, None);
        }

        out
    }

    fn write_events(&self, out: &mut String, events: Option<&EventsSection<'a>>) {
        let _ = writeln!(out, "Format: {}", self.format.join(", "));
        if let Some(events) = events {
            self.write_originals(out, events);
        }
        for line in &self.generated {
            out.push_str(line);
            out.push('\n');
        }
    }

    fn write_originals(&self, out: &mut String, events: &EventsSection<'a>) {
        for event in &events.events {
            let line = if !event.is_dialogue() {
                event.to_ass_string(&self.format)
            } else if self.options.keep_original {
                event.to_ass_string_as(EventType::Comment, &self.format)
            } else {
                continue;
            };
            out.push_str(&line);
            out.push('\n');
        }
    }
}

impl LineSink for ScriptWriter<'_, '_> {
    fn write_line(&mut self, line: DerivedLine) -> Result<()> {
        *self.style_uses.entry(line.style.clone()).or_insert(0) += 1;
        self.generated.push(line.to_ass_string(&self.format));
        Ok(())
    }
}

fn push_lines(out: &mut String, lines: &[&str]) {
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
}
