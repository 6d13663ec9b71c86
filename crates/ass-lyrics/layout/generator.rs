//! Per-line renderers
//!
//! [`LayoutGenerator`] is stateless apart from its configuration. All of its
//! methods are pure: the same lines and config always produce the same
//! renderings.

use super::{DerivedLine, LayoutConfig, LineKind};
use crate::analysis::SourceLine;
use crate::tags::{alignment, fade, font_scale, movement, position, simple_fade, OverrideBlock};
use crate::utils::Result;

/// Stack slot as a coordinate multiplier
#[allow(clippy::cast_precision_loss)]
fn steps(idx: usize) -> f64 {
    idx as f64
}

/// Stack slot as a layer number
fn layer_of(idx: usize) -> i32 {
    i32::try_from(idx).unwrap_or(i32::MAX)
}

/// `style` with `-actor` appended when the actor is set
fn actor_style(style: &str, actor: &str) -> String {
    if actor.is_empty() {
        style.to_string()
    } else {
        format!("{style}-{actor}")
    }
}

/// Computes the renderings of one lyric context
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutGenerator {
    config: LayoutConfig,
}

impl LayoutGenerator {
    /// Create a generator after validating `config`
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`](crate::CoreError::Config) when the
    /// configuration is rejected by [`LayoutConfig::validate`].
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Vertical distance between stacked lines, rounded to whole pixels
    #[must_use]
    pub fn line_distance(&self, current: &SourceLine) -> f64 {
        (current.geometry.height * self.config.line_distance_rate).round()
    }

    /// Slide duration, never longer than the line
    #[must_use]
    pub fn movement_time(&self, current: &SourceLine) -> u32 {
        self.config.movement_time_ms.min(current.duration())
    }

    /// Fade duration, never longer than the line
    #[must_use]
    pub fn fade_time(&self, current: &SourceLine) -> u32 {
        self.config.fade_time_ms.min(current.duration())
    }

    /// Alpha of the previous line in slot `idx`
    ///
    /// Slot 1 gets the configured base alpha and outer slots move linearly
    /// towards 255 (invisible).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn prev_alpha(&self, idx: usize) -> u8 {
        let base = f64::from(self.config.prev_line_alpha);
        let step = (255.0 - base) / steps(self.config.prev_lines.max(1));
        let alpha = step.mul_add(steps(idx.saturating_sub(1)), base).trunc();
        alpha.clamp(0.0, 255.0) as u8
    }

    /// Font scale for lines rendered with `style`
    fn scale_for(&self, style: &str) -> u32 {
        if style == self.config.main_style {
            self.config.main_scale
        } else {
            self.config.sub_scale
        }
    }

    /// Alignment and scale, the leading tags of every block
    fn base_block(&self, style: &str) -> OverrideBlock {
        let scale = self.scale_for(style);
        let mut block = OverrideBlock::new();
        block
            .push(alignment(self.config.alignment))
            .push(font_scale(scale, scale));
        block
    }

    /// Copy of `current` carrying the given text, style and placement
    fn derive(
        current: &SourceLine,
        kind: LineKind,
        slot: usize,
        layer: i32,
        style: String,
        actor: &str,
        text: String,
        y: f64,
    ) -> DerivedLine {
        DerivedLine {
            kind,
            slot,
            layer,
            start_ms: current.start_ms,
            end_ms: current.end_ms,
            style,
            actor: actor.to_string(),
            margins: current.margins,
            effect: current.effect.clone(),
            text,
            y,
        }
    }

    /// Render the highlighted line
    ///
    /// With `motion` the line slides up one line distance into its resting
    /// position, otherwise it is placed there directly.
    #[must_use]
    pub fn current_line(&self, line: &SourceLine, style: &str, motion: bool) -> DerivedLine {
        let d = self.line_distance(line);
        let c = line.geometry.center;
        let m = line.geometry.middle;

        let mut block = self.base_block(style);
        if motion {
            block.push(movement(c, m + d, c, m, 0, self.movement_time(line)));
        } else {
            block.push(position(c, m));
        }

        Self::derive(
            line,
            LineKind::Current,
            0,
            line.layer,
            actor_style(style, &line.actor),
            &line.actor,
            block.apply(&line.text),
            line.geometry.y,
        )
    }

    /// Render `prev` in slot `idx` above `current`
    ///
    /// Returns `None` unless `1 <= idx <= prev_lines`. The outermost slot
    /// fades out towards the end of the line.
    #[must_use]
    pub fn previous_line(
        &self,
        current: &SourceLine,
        prev: &SourceLine,
        idx: usize,
        style: &str,
        motion: bool,
    ) -> Option<DerivedLine> {
        let count = self.config.prev_lines;
        if idx == 0 || idx > count {
            return None;
        }

        let d = self.line_distance(current);
        let c = current.geometry.center;
        let m = current.geometry.middle;
        let duration = current.duration();
        let fade_time = self.fade_time(current);
        let alpha = self.prev_alpha(idx);

        let mut block = self.base_block(style);
        if motion {
            block.push(movement(
                c,
                d.mul_add(-steps(idx - 1), m),
                c,
                d.mul_add(-steps(idx), m),
                0,
                self.movement_time(current),
            ));
        } else {
            block.push(position(c, d.mul_add(-steps(idx), m)));
        }
        if idx < count {
            block.push(fade(0, alpha, alpha, 0, fade_time, fade_time, fade_time));
        } else {
            block.push(fade(
                alpha,
                alpha,
                255,
                0,
                fade_time,
                duration.saturating_sub(fade_time).max(fade_time),
                duration,
            ));
        }

        Some(Self::derive(
            current,
            LineKind::Previous,
            idx,
            layer_of(idx),
            actor_style(style, &prev.actor),
            &prev.actor,
            block.apply(&prev.text),
            d.mul_add(-steps(idx), current.geometry.y),
        ))
    }

    /// Render `next` in slot `idx` below `current`
    ///
    /// Returns `None` unless `1 <= idx <= next_lines`. The outermost slot
    /// fades in.
    #[must_use]
    pub fn next_line(
        &self,
        current: &SourceLine,
        next: &SourceLine,
        idx: usize,
        style: &str,
        motion: bool,
    ) -> Option<DerivedLine> {
        let count = self.config.next_lines;
        if idx == 0 || idx > count {
            return None;
        }

        let d = self.line_distance(current);
        let c = current.geometry.center;
        let m = current.geometry.middle;

        let mut block = self.base_block(style);
        if motion {
            block.push(movement(
                c,
                d.mul_add(steps(idx + 1), m),
                c,
                d.mul_add(steps(idx), m),
                0,
                self.movement_time(current),
            ));
        } else {
            block.push(position(c, d.mul_add(steps(idx), m)));
        }
        block.push_opt((idx == count).then(|| simple_fade(self.fade_time(current), 0)));

        Some(Self::derive(
            current,
            LineKind::Next,
            idx,
            layer_of(self.config.prev_lines.saturating_add(idx)),
            actor_style(style, &next.actor),
            &next.actor,
            block.apply(&next.text),
            d.mul_add(steps(idx), current.geometry.y),
        ))
    }

    /// All renderings for lyric `index`, in emission order
    ///
    /// Previous lines come first (innermost to outermost), then the current
    /// line, then upcoming lines (innermost to outermost). Neighbours outside
    /// the sequence are skipped, and an out-of-range `index` yields nothing.
    ///
    /// The first line appears without motion. Previous lines always slide.
    /// An upcoming line that is the last of the sequence uses the main style.
    #[must_use]
    pub fn render_context(&self, lines: &[SourceLine], index: usize) -> Vec<DerivedLine> {
        let Some(current) = lines.get(index) else {
            return Vec::new();
        };
        let motion = index != 0;
        let main = self.config.main_style.as_str();
        let sub = self.config.sub_style.as_str();
        let last = lines.len() - 1;

        let shown =
            1 + index.min(self.config.prev_lines) + (last - index).min(self.config.next_lines);
        let mut out = Vec::with_capacity(shown);

        for idx in 1..=self.config.prev_lines {
            let Some(prev) = index.checked_sub(idx).and_then(|p| lines.get(p)) else {
                break;
            };
            out.extend(self.previous_line(current, prev, idx, sub, true));
        }

        out.push(self.current_line(current, main, motion));

        for idx in 1..=self.config.next_lines {
            let next_index = index + idx;
            let Some(next) = lines.get(next_index) else {
                break;
            };
            let style = if next_index == last { main } else { sub };
            out.extend(self.next_line(current, next, idx, style, motion));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::LineGeometry;
    use crate::utils::CoreError;
    use pretty_assertions::assert_eq;

    fn line(index: usize, start_ms: u32, end_ms: u32, text: &str) -> SourceLine {
        SourceLine {
            index,
            layer: 0,
            start_ms,
            end_ms,
            style: "Default".to_string(),
            actor: String::new(),
            margins: (0, 0, 0),
            effect: String::new(),
            text: text.to_string(),
            text_stripped: text.to_string(),
            geometry: LineGeometry {
                height: 40.0,
                center: 640.0,
                middle: 360.0,
                y: 340.0,
                ..LineGeometry::default()
            },
        }
    }

    fn generator() -> LayoutGenerator {
        LayoutGenerator::new(LayoutConfig::default()).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let err = LayoutGenerator::new(LayoutConfig::default().with_line_distance_rate(-1.0))
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn line_distance_rounds() {
        let mut current = line(0, 0, 1000, "a");
        current.geometry.height = 40.6;
        let generator = LayoutGenerator::new(LayoutConfig::default().with_line_distance_rate(0.5))
            .unwrap();
        assert!((generator.line_distance(&current) - 20.0).abs() < 1e-9);
        assert!((generator.line_distance(&line(0, 0, 1000, "a")) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn times_are_capped_by_duration() {
        let generator = generator();
        let short = line(0, 1000, 1150, "a");
        assert_eq!(generator.movement_time(&short), 150);
        assert_eq!(generator.fade_time(&short), 150);
        let long = line(0, 1000, 5000, "a");
        assert_eq!(generator.movement_time(&long), 300);
    }

    #[test]
    fn prev_alpha_steps() {
        let generator = generator();
        assert_eq!(generator.prev_alpha(1), 128);
        assert_eq!(generator.prev_alpha(2), 191);

        let single = LayoutGenerator::new(LayoutConfig::default().with_prev_lines(0)).unwrap();
        assert_eq!(single.prev_alpha(1), 128);
    }

    #[test]
    fn current_line_with_and_without_motion() {
        let generator = generator();
        let mut current = line(0, 1000, 3000, "{\\k100}hello");
        current.actor = "Alice".to_string();
        current.layer = 7;

        let still = generator.current_line(&current, "MainStyle", false);
        assert_eq!(
            still.text,
            "{\\an5\\fscx100\\fscy100\\pos(640.000,360.000)}{\\k100}hello"
        );
        assert_eq!(still.style, "MainStyle-Alice");
        assert_eq!(still.layer, 7);
        assert_eq!(still.kind, LineKind::Current);

        let moving = generator.current_line(&current, "SubStyle", true);
        assert_eq!(
            moving.text,
            "{\\an5\\fscx70\\fscy70\\move(640.000,400.000,640.000,360.000,0,300)}{\\k100}hello"
        );
    }

    #[test]
    fn previous_line_slots() {
        let generator = generator();
        let current = line(1, 1000, 3000, "now");
        let mut prev = line(0, 0, 1000, "before");
        prev.actor = "Bob".to_string();

        let inner = generator
            .previous_line(&current, &prev, 1, "SubStyle", true)
            .unwrap();
        assert_eq!(
            inner.text,
            "{\\an5\\fscx70\\fscy70\\move(640.000,360.000,640.000,320.000,0,300)\\fade(0,128,128,0,300,300,300)}before"
        );
        assert_eq!(inner.layer, 1);
        assert_eq!(inner.style, "SubStyle-Bob");
        assert_eq!(inner.actor, "Bob");
        assert_eq!(inner.start_ms, 1000);
        assert!((inner.y - 300.0).abs() < 1e-9);

        let outer = generator
            .previous_line(&current, &prev, 2, "SubStyle", false)
            .unwrap();
        assert_eq!(
            outer.text,
            "{\\an5\\fscx70\\fscy70\\pos(640.000,280.000)\\fade(191,191,255,0,300,1700,2000)}before"
        );
        assert_eq!(outer.layer, 2);

        assert!(generator.previous_line(&current, &prev, 0, "SubStyle", true).is_none());
        assert!(generator.previous_line(&current, &prev, 3, "SubStyle", true).is_none());
    }

    #[test]
    fn previous_exit_fade_on_short_line() {
        let generator = generator();
        let current = line(1, 1000, 1200, "now");
        let prev = line(0, 0, 1000, "before");
        let outer = generator
            .previous_line(&current, &prev, 2, "SubStyle", true)
            .unwrap();
        assert!(outer.text.contains("\\fade(191,191,255,0,200,200,200)"));
        assert!(outer.text.contains(",0,200)"));
    }

    #[test]
    fn single_previous_slot_is_exit_slot() {
        let generator = LayoutGenerator::new(LayoutConfig::default().with_prev_lines(1)).unwrap();
        let current = line(1, 1000, 3000, "now");
        let prev = line(0, 0, 1000, "before");

        let only = generator
            .previous_line(&current, &prev, 1, "SubStyle", true)
            .unwrap();
        assert_eq!(
            only.text,
            "{\\an5\\fscx70\\fscy70\\move(640.000,360.000,640.000,320.000,0,300)\\fade(128,128,255,0,300,1700,2000)}before"
        );
        assert_eq!(only.layer, 1);
        assert!(generator.previous_line(&current, &prev, 2, "SubStyle", true).is_none());
    }

    #[test]
    fn single_next_slot_fades_in() {
        let generator = LayoutGenerator::new(LayoutConfig::default().with_next_lines(1)).unwrap();
        let current = line(0, 1000, 3000, "now");
        let next = line(1, 3000, 5000, "after");

        let only = generator
            .next_line(&current, &next, 1, "SubStyle", true)
            .unwrap();
        assert_eq!(
            only.text,
            "{\\an5\\fscx70\\fscy70\\move(640.000,440.000,640.000,400.000,0,300)\\fad(300,0)}after"
        );
        assert_eq!(only.layer, 3);
        assert!(generator.next_line(&current, &next, 2, "SubStyle", true).is_none());
    }

    #[test]
    fn rejects_oversized_stacks() {
        let config = LayoutConfig::default()
            .with_prev_lines(usize::MAX)
            .with_next_lines(1);
        let err = LayoutGenerator::new(config).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn next_line_slots() {
        let generator = generator();
        let current = line(0, 1000, 3000, "now");
        let next = line(1, 3000, 5000, "after");

        let inner = generator
            .next_line(&current, &next, 1, "SubStyle", true)
            .unwrap();
        assert_eq!(
            inner.text,
            "{\\an5\\fscx70\\fscy70\\move(640.000,440.000,640.000,400.000,0,300)}after"
        );
        assert_eq!(inner.layer, 3);
        assert!((inner.y - 380.0).abs() < 1e-9);

        let outer = generator
            .next_line(&current, &next, 3, "MainStyle", false)
            .unwrap();
        assert_eq!(
            outer.text,
            "{\\an5\\fscx100\\fscy100\\pos(640.000,480.000)\\fad(300,0)}after"
        );
        assert_eq!(outer.layer, 5);

        assert!(generator.next_line(&current, &next, 4, "SubStyle", true).is_none());
    }

    #[test]
    fn single_line_context() {
        let lines = vec![line(0, 0, 2000, "only")];
        let out = generator().render_context(&lines, 0);
        assert_eq!(out.len(), 1);
        assert!(out[0].text.contains("\\pos("));
        assert!(!out[0].text.contains("\\move("));
        assert!(generator().render_context(&lines, 1).is_empty());
    }

    #[test]
    fn middle_context_order() {
        let lines: Vec<_> = (0..5)
            .map(|i| line(i, 1000 * i as u32, 1000 * (i as u32 + 1), &format!("l{i}")))
            .collect();
        let out = generator().render_context(&lines, 2);
        let order: Vec<_> = out.iter().map(|l| (l.kind, l.slot)).collect();
        assert_eq!(
            order,
            vec![
                (LineKind::Previous, 1),
                (LineKind::Previous, 2),
                (LineKind::Current, 0),
                (LineKind::Next, 1),
                (LineKind::Next, 2),
            ]
        );
        assert!(out[0].text.ends_with("l1"));
        assert!(out[1].text.ends_with("l0"));
        assert!(out[4].text.ends_with("l4"));
        // last line of the sequence gets the main scale
        assert_eq!(out[4].style, "MainStyle");
        assert!(out[4].text.contains("\\fscx100"));
        assert_eq!(out[3].style, "SubStyle");
    }

    #[test]
    fn first_context_has_no_motion() {
        let lines: Vec<_> = (0..3)
            .map(|i| line(i, 1000 * i as u32, 1000 * (i as u32 + 1), "x"))
            .collect();
        let out = generator().render_context(&lines, 0);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|l| l.text.contains("\\pos(")));
    }
}
