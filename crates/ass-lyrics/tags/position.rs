//! Position and movement tags
//!
//! Coordinates are written with three decimals and times as integer
//! milliseconds relative to the line's own start.

use super::OverrideTag;

/// Build a `\pos(x,y)` tag
#[must_use]
pub const fn position(x: f64, y: f64) -> OverrideTag {
    OverrideTag::Position { x, y }
}

/// Build a `\move(x1,y1,x2,y2,t1,t2)` tag
#[must_use]
pub const fn movement(x1: f64, y1: f64, x2: f64, y2: f64, t1: u32, t2: u32) -> OverrideTag {
    OverrideTag::Move {
        x1,
        y1,
        x2,
        y2,
        t1,
        t2,
    }
}
