//! Layout parameters
//!
//! Every constant the generator uses lives here so one run can differ from
//! another without code changes. All fields have defaults, which lets a
//! configuration file override any subset of them.

use crate::utils::{CoreError, Result};

/// Default number of previous lines stacked above the current one
pub const DEFAULT_PREV_LINES: usize = 2;

/// Default number of upcoming lines stacked below the current one
pub const DEFAULT_NEXT_LINES: usize = 3;

/// Default `\move` duration cap in milliseconds
pub const DEFAULT_MOVEMENT_TIME_MS: u32 = 300;

/// Default fade duration cap in milliseconds
pub const DEFAULT_FADE_TIME_MS: u32 = 300;

/// Configuration for [`LayoutGenerator`](super::LayoutGenerator)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Number of previous lines shown above the current one
    pub prev_lines: usize,

    /// Number of upcoming lines shown below the current one
    pub next_lines: usize,

    /// Upper bound for slide-in animations
    pub movement_time_ms: u32,

    /// Upper bound for fades
    pub fade_time_ms: u32,

    /// Multiplier applied to the current line height for stack spacing
    pub line_distance_rate: f64,

    /// Font scale percent for lines using `main_style`
    pub main_scale: u32,

    /// Font scale percent for everything else
    pub sub_scale: u32,

    /// Alpha of the innermost previous line (0 opaque, 255 invisible)
    pub prev_line_alpha: u8,

    /// Style of the highlighted line
    pub main_style: String,

    /// Style of the surrounding lines
    pub sub_style: String,

    /// Numpad alignment written on every generated line
    pub alignment: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            prev_lines: DEFAULT_PREV_LINES,
            next_lines: DEFAULT_NEXT_LINES,
            movement_time_ms: DEFAULT_MOVEMENT_TIME_MS,
            fade_time_ms: DEFAULT_FADE_TIME_MS,
            line_distance_rate: 1.0,
            main_scale: 100,
            sub_scale: 70,
            prev_line_alpha: 128,
            main_style: "MainStyle".to_string(),
            sub_style: "SubStyle".to_string(),
            alignment: 5,
        }
    }
}

impl LayoutConfig {
    /// Set how many previous lines are stacked
    #[must_use]
    pub fn with_prev_lines(mut self, count: usize) -> Self {
        self.prev_lines = count;
        self
    }

    /// Set how many upcoming lines are stacked
    #[must_use]
    pub fn with_next_lines(mut self, count: usize) -> Self {
        self.next_lines = count;
        self
    }

    /// Set the line distance multiplier
    #[must_use]
    pub fn with_line_distance_rate(mut self, rate: f64) -> Self {
        self.line_distance_rate = rate;
        self
    }

    /// Set the main and sub style names
    #[must_use]
    pub fn with_styles(mut self, main: impl Into<String>, sub: impl Into<String>) -> Self {
        self.main_style = main.into();
        self.sub_style = sub.into();
        self
    }

    /// Check the values the generator relies on
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if the distance rate is negative or not
    /// finite, the alignment is outside 1-9, a style name is empty, or the
    /// stacked line counts would push a layer number past `i32::MAX`.
    pub fn validate(&self) -> Result<()> {
        let max_layer = usize::try_from(i32::MAX).unwrap_or(usize::MAX);
        match self.prev_lines.checked_add(self.next_lines) {
            Some(total) if total <= max_layer => {}
            _ => {
                return Err(CoreError::config(format!(
                    "prev_lines + next_lines must not exceed {max_layer}, got {} + {}",
                    self.prev_lines, self.next_lines
                )));
            }
        }
        if !self.line_distance_rate.is_finite() || self.line_distance_rate < 0.0 {
            return Err(CoreError::config(format!(
                "line_distance_rate must be a finite non-negative number, got {}",
                self.line_distance_rate
            )));
        }
        if !(1..=9).contains(&self.alignment) {
            return Err(CoreError::config(format!(
                "alignment must be between 1 and 9, got {}",
                self.alignment
            )));
        }
        if self.main_style.trim().is_empty() || self.sub_style.trim().is_empty() {
            return Err(CoreError::config("style names must not be empty"));
        }
        Ok(())
    }
}
