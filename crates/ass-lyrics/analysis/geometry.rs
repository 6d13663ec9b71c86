//! Screen placement of a line from its alignment, margins and size
//!
//! Mirrors how renderers anchor unpositioned text: the numpad alignment picks
//! a column (left/center/right) and a row (bottom/middle/top), and margins
//! push the box in from the screen edges.

/// Inputs needed to place one line on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementInput {
    /// Script resolution (`PlayResX`, `PlayResY`)
    pub play_res: (f64, f64),

    /// Numpad alignment (1-9)
    pub alignment: u8,

    /// Effective left margin
    pub margin_l: f64,

    /// Effective right margin
    pub margin_r: f64,

    /// Effective vertical margin
    pub margin_v: f64,

    /// Measured text width
    pub width: f64,

    /// Measured text height
    pub height: f64,
}

/// Bounding box and anchor point of a line
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineGeometry {
    /// Text width
    pub width: f64,

    /// Text height
    pub height: f64,

    /// Left edge
    pub left: f64,

    /// Horizontal center
    pub center: f64,

    /// Right edge
    pub right: f64,

    /// Top edge
    pub top: f64,

    /// Vertical middle
    pub middle: f64,

    /// Bottom edge
    pub bottom: f64,

    /// Anchor x for the line's alignment
    pub x: f64,

    /// Vertical top, the reference the stacked renderings are offset from
    pub y: f64,
}

impl LineGeometry {
    /// Place a line on screen
    ///
    /// ```rust
    /// use ass_lyrics::analysis::geometry::{LineGeometry, PlacementInput};
    ///
    /// let geometry = LineGeometry::place(&PlacementInput {
    ///     play_res: (1920.0, 1080.0),
    ///     alignment: 5,
    ///     margin_l: 0.0,
    ///     margin_r: 0.0,
    ///     margin_v: 0.0,
    ///     width: 400.0,
    ///     height: 40.0,
    /// });
    /// assert_eq!(geometry.center, 960.0);
    /// assert_eq!(geometry.middle, 540.0);
    /// assert_eq!(geometry.y, 520.0);
    /// ```
    #[must_use]
    pub fn place(input: &PlacementInput) -> Self {
        let (res_x, res_y) = input.play_res;
        let width = input.width;
        let height = input.height;

        let left = match input.alignment {
            1 | 4 | 7 => input.margin_l,
            3 | 6 | 9 => res_x - input.margin_r - width,
            _ => (res_x - width) / 2.0 + (input.margin_l - input.margin_r) / 2.0,
        };
        let top = match input.alignment {
            7..=9 => input.margin_v,
            4..=6 => (res_y - height) / 2.0,
            _ => res_y - input.margin_v - height,
        };

        let center = left + width / 2.0;
        let middle = top + height / 2.0;
        let x = match input.alignment {
            1 | 4 | 7 => left,
            3 | 6 | 9 => left + width,
            _ => center,
        };

        Self {
            width,
            height,
            left,
            center,
            right: left + width,
            top,
            middle,
            bottom: top + height,
            x,
            y: top,
        }
    }
}
