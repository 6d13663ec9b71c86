//! Shared helpers: error types, hashing and ASS field conversions
//!
//! ASS stores times as `H:MM:SS.CC` (centiseconds) while the layout generator
//! works in milliseconds, so both directions of the conversion live here.

pub mod errors;
pub mod hashers;

pub use errors::{CoreError, ErrorCategory, Result};
pub use hashers::{create_hash_map, create_hash_map_with_capacity};

use core::fmt;

/// Parse numeric value from ASS field with validation
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as the target numeric type.
pub fn parse_numeric<T>(value_str: &str) -> Result<T>
where
    T: core::str::FromStr,
    T::Err: fmt::Display,
{
    value_str
        .trim()
        .parse()
        .map_err(|e| CoreError::InvalidNumeric(format!("Failed to parse '{value_str}': {e}")))
}

/// Parse an optional numeric field, treating an empty field as `default`
///
/// # Errors
///
/// Returns an error if the field is non-empty and cannot be parsed.
pub fn parse_numeric_or<T>(value_str: &str, default: T) -> Result<T>
where
    T: core::str::FromStr,
    T::Err: fmt::Display,
{
    if value_str.trim().is_empty() {
        Ok(default)
    } else {
        parse_numeric(value_str)
    }
}

/// Parse ASS time format (H:MM:SS.CC) to centiseconds
///
/// # Example
///
/// ```rust
/// # use ass_lyrics::utils::parse_ass_time;
/// assert_eq!(parse_ass_time("0:01:30.50")?, 9050);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns an error if the time format is invalid or cannot be parsed.
pub fn parse_ass_time(time_str: &str) -> Result<u32> {
    let time_str = time_str.trim();
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 3 {
        return Err(CoreError::invalid_time(time_str, "expected H:MM:SS.CC"));
    }

    let hours: u32 = parts[0]
        .parse()
        .map_err(|_| CoreError::invalid_time(time_str, "invalid hours"))?;
    let minutes: u32 = parts[1]
        .parse()
        .map_err(|_| CoreError::invalid_time(time_str, "invalid minutes"))?;

    let (seconds_str, frac_str) = parts[2].split_once('.').unwrap_or((parts[2], ""));
    let seconds: u32 = seconds_str
        .parse()
        .map_err(|_| CoreError::invalid_time(time_str, "invalid seconds"))?;

    let centiseconds = match frac_str.len() {
        0 => 0,
        1 | 2 => {
            let frac_val: u32 = frac_str
                .parse()
                .map_err(|_| CoreError::invalid_time(time_str, "invalid centiseconds"))?;
            if frac_str.len() == 1 {
                frac_val * 10
            } else {
                frac_val
            }
        }
        _ => return Err(CoreError::invalid_time(time_str, "too many decimal places")),
    };

    if minutes >= 60 {
        return Err(CoreError::invalid_time(time_str, "minutes must be < 60"));
    }
    if seconds >= 60 {
        return Err(CoreError::invalid_time(time_str, "seconds must be < 60"));
    }

    hours
        .checked_mul(360_000)
        .and_then(|total| total.checked_add(minutes * 6_000 + seconds * 100 + centiseconds))
        .ok_or_else(|| CoreError::invalid_time(time_str, "time out of range"))
}

/// Parse ASS time format to milliseconds
///
/// # Errors
///
/// Same as [`parse_ass_time`].
pub fn parse_ass_time_ms(time_str: &str) -> Result<u32> {
    parse_ass_time(time_str)?
        .checked_mul(10)
        .ok_or_else(|| CoreError::invalid_time(time_str.trim(), "time out of range"))
}

/// Format centiseconds back to ASS time format
#[must_use]
pub fn format_ass_time(centiseconds: u32) -> String {
    let hours = centiseconds / 360_000;
    let remainder = centiseconds % 360_000;
    let minutes = remainder / 6000;
    let remainder = remainder % 6000;
    let seconds = remainder / 100;
    let cs = remainder % 100;

    format!("{hours}:{minutes:02}:{seconds:02}.{cs:02}")
}

/// Format milliseconds as ASS time, rounding to the nearest centisecond
#[must_use]
pub fn format_ass_time_ms(milliseconds: u32) -> String {
    format_ass_time(milliseconds.saturating_add(5) / 10)
}
