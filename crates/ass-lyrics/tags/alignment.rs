//! Alignment and scale tags
//!
//! - `an`: numpad alignment, clamped into 1-9
//! - `fscx`/`fscy`: font scale percent, always emitted as a pair

use super::OverrideTag;

/// Build a `\an` tag, clamping `pos` into the numpad range
///
/// ```text
/// 7 8 9
/// 4 5 6
/// 1 2 3
/// ```
#[must_use]
pub fn alignment(pos: i32) -> OverrideTag {
    let clamped = pos.clamp(1, 9);
    OverrideTag::Alignment(u8::try_from(clamped).unwrap_or(5))
}

/// Build a `\fscx<x>\fscy<y>` tag pair
#[must_use]
pub const fn font_scale(x: u32, y: u32) -> OverrideTag {
    OverrideTag::FontScale { x, y }
}
