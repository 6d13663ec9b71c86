//! Fade tags
//!
//! `\fad` takes fade-in and fade-out durations. `\fade` takes three alpha
//! levels and the four times between which alpha is interpolated. Alpha 0 is
//! fully opaque and 255 fully transparent.

use super::OverrideTag;

/// Build a `\fad(fade_in,fade_out)` tag
#[must_use]
pub const fn simple_fade(fade_in: u32, fade_out: u32) -> OverrideTag {
    OverrideTag::SimpleFade { fade_in, fade_out }
}

/// Build a `\fade(a1,a2,a3,t1,t2,t3,t4)` tag
///
/// Alpha is `a1` before `t1`, moves to `a2` by `t2`, holds until `t3`, then
/// moves to `a3` by `t4`.
#[must_use]
pub const fn fade(a1: u8, a2: u8, a3: u8, t1: u32, t2: u32, t3: u32, t4: u32) -> OverrideTag {
    OverrideTag::Fade {
        a1,
        a2,
        a3,
        t1,
        t2,
        t3,
        t4,
    }
}
