//! Drives the generator over a whole lyric sequence

use super::{DerivedLine, LayoutGenerator, LineKind};
use crate::analysis::SourceLine;
use crate::utils::Result;
use log::{debug, trace};

/// Destination for generated renderings
pub trait LineSink {
    /// Accept one rendering
    ///
    /// # Errors
    ///
    /// Implementations may fail when the line cannot be stored.
    fn write_line(&mut self, line: DerivedLine) -> Result<()>;
}

impl LineSink for Vec<DerivedLine> {
    fn write_line(&mut self, line: DerivedLine) -> Result<()> {
        self.push(line);
        Ok(())
    }
}

/// Counts of generated renderings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Lyric lines processed
    pub contexts: usize,

    /// Previous-line renderings
    pub previous: usize,

    /// Current-line renderings
    pub current: usize,

    /// Next-line renderings
    pub next: usize,
}

impl GenerationStats {
    /// Total renderings written
    #[must_use]
    pub const fn total(&self) -> usize {
        self.previous + self.current + self.next
    }

    fn record(&mut self, kind: LineKind) {
        match kind {
            LineKind::Previous => self.previous += 1,
            LineKind::Current => self.current += 1,
            LineKind::Next => self.next += 1,
        }
    }
}

/// Render every line of `lines` and forward the results to `sink`
///
/// Contexts are processed in order, each in
/// [`LayoutGenerator::render_context`] order.
///
/// # Errors
///
/// Returns the first error reported by `sink`.
pub fn generate<S: LineSink + ?Sized>(
    generator: &LayoutGenerator,
    lines: &[SourceLine],
    sink: &mut S,
) -> Result<GenerationStats> {
    let mut stats = GenerationStats::default();

    for index in 0..lines.len() {
        let rendered = generator.render_context(lines, index);
        trace!("context {index}: {} renderings", rendered.len());
        for line in rendered {
            stats.record(line.kind);
            sink.write_line(line)?;
        }
        stats.contexts += 1;
    }

    debug!(
        "generated {} lines for {} contexts ({} previous, {} current, {} next)",
        stats.total(),
        stats.contexts,
        stats.previous,
        stats.current,
        stats.next
    );
    Ok(stats)
}
