//! Bar line templates and glyph palettes.
//!
//! A [`Template`] turns a [`BarSnapshot`] into the text of one terminal line.
//! The pool never looks inside the text it gets back, so templates can be
//! swapped per bar without touching the scheduling code.
//!
//! # Examples
//!
//! ## Default Template
//!
//! ```rust
//! use barpool::progress::{Bar, DefaultTemplate, ProgressChars};
//! use std::sync::Arc;
//!
//! let bar = Bar::new(100);
//! bar.set_template(Arc::new(DefaultTemplate::new(ProgressChars::new(ProgressChars::BLOCKY))));
//! bar.set_current(50);
//! assert!(bar.render(60).contains("50/100"));
//! ```
//!
//! ## Custom Template
//!
//! ```rust
//! use barpool::progress::{Bar, BarSnapshot, Template};
//! use std::sync::Arc;
//!
//! struct Percent;
//!
//! impl Template for Percent {
//!     fn render(&self, snapshot: &BarSnapshot, _width: usize) -> String {
//!         format!("{:.0}%", snapshot.percent())
//!     }
//! }
//!
//! let bar = Bar::new(4);
//! bar.set_template(Arc::new(Percent));
//! bar.set_current(1);
//! assert_eq!(bar.render(6), "25%   ");
//! ```

use super::BarSnapshot;
use crate::utils::text_width;
use indicatif::HumanCount;

/// Formats one bar snapshot as a single line of text.
///
/// `width` is the number of columns the line will be fitted to. Templates may
/// return shorter or longer text; the bar pads or truncates the result.
pub trait Template: Send + Sync {
    /// Render `snapshot` for a line of `width` columns.
    fn render(&self, snapshot: &BarSnapshot, width: usize) -> String;
}

/// Glyph palette for the bar segment.
///
/// The first glyph marks filled cells, the last one empty cells, and any glyphs
/// in between are partial states, from the most to the least filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressChars {
    glyphs: Vec<char>,
}

impl Default for ProgressChars {
    fn default() -> Self {
        Self::new(Self::FINE)
    }
}

impl ProgressChars {
    /// Plain ASCII: `"=>-"`.
    pub const ASCII: &'static str = "=>-";
    /// Use increasing quarter blocks as progress characters: `"█▛▌▖  "`.
    pub const BLOCKY: &'static str = "█▛▌▖  ";
    /// Use fade-in blocks as progress characters: `"█▓▒░  "`.
    pub const FADE_IN: &'static str = "█▓▒░  ";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾╴─"`.
    pub const LINE: &'static str = "━╾╴─";
    /// Use rough blocks as progress characters: `"█  "`.
    pub const ROUGH: &'static str = "█  ";
    /// Use increasing height blocks as progress characters: `"█▇▆▅▄▃▂   "`.
    pub const VERTICAL: &'static str = "█▇▆▅▄▃▂   ";

    /// Create a palette from a string of glyphs.
    ///
    /// At least two glyphs ("filled" and "empty") are needed; shorter input
    /// falls back to [`ProgressChars::ASCII`].
    pub fn new(glyphs: &str) -> Self {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.len() < 2 {
            return Self {
                glyphs: Self::ASCII.chars().collect(),
            };
        }
        Self { glyphs }
    }

    /// Draw `width` glyphs for a completion ratio in `0.0..=1.0`.
    pub fn draw(&self, ratio: f64, width: usize) -> String {
        if width == 0 {
            return String::new();
        }
        let last = self.glyphs.len() - 1;
        let filled = self.glyphs[0];
        let empty = self.glyphs[last];

        let fill = ratio.clamp(0.0, 1.0) * width as f64;
        let full = (fill.floor() as usize).min(width);
        let mut out = String::with_capacity(width * 3);
        out.extend(std::iter::repeat_n(filled, full));
        if full < width {
            let partials = last - 1;
            let head = if partials == 0 {
                empty
            } else {
                let step = ((fill - full as f64) * partials as f64).floor() as usize;
                self.glyphs[last - 1 - step.min(partials - 1)]
            };
            out.push(head);
            out.extend(std::iter::repeat_n(empty, width - full - 1));
        }
        out
    }
}

/// The stock line layout: `[title ]current/total glyphs percent speed`.
///
/// The glyph run stretches over whatever space the other segments leave. A bar
/// that recorded an error shows the error text in place of the speed.
#[derive(Debug, Clone)]
pub struct DefaultTemplate {
    chars: ProgressChars,
    show_speed: bool,
}

impl Default for DefaultTemplate {
    fn default() -> Self {
        Self {
            chars: ProgressChars::default(),
            show_speed: true,
        }
    }
}

impl DefaultTemplate {
    /// Glyph runs narrower than this are left out of the line.
    const MIN_BAR_WIDTH: usize = 3;

    /// Create a template drawing its bar with `chars`.
    pub fn new(chars: ProgressChars) -> Self {
        Self {
            chars,
            show_speed: true,
        }
    }

    /// Set to `false` to leave the speed estimate out of the line.
    pub fn with_speed(mut self, show_speed: bool) -> Self {
        self.show_speed = show_speed;
        self
    }
}

impl Template for DefaultTemplate {
    fn render(&self, snapshot: &BarSnapshot, width: usize) -> String {
        let mut head = String::new();
        if let Some(title) = &snapshot.title {
            head.push_str(title);
            head.push(' ');
        }
        head.push_str(&format!(
            "{}/{}",
            HumanCount(snapshot.current.max(0) as u64),
            HumanCount(snapshot.total.max(0) as u64)
        ));

        let mut tail = format!("{:.2}%", snapshot.percent());
        if let Some(error) = &snapshot.error {
            tail.push_str(&format!(" ! {error}"));
        } else if self.show_speed {
            tail.push_str(&format!(" {}/s", HumanCount(snapshot.speed.round() as u64)));
        }

        // Two separating spaces plus the brackets around the glyphs.
        let used = text_width(&head) + text_width(&tail) + 4;
        let bar_width = width.saturating_sub(used);
        if bar_width < Self::MIN_BAR_WIDTH {
            return format!("{head} {tail}");
        }
        format!(
            "{head} [{}] {tail}",
            self.chars.draw(snapshot.ratio(), bar_width)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn snapshot(current: i64, total: i64) -> BarSnapshot {
        BarSnapshot {
            total,
            current,
            title: None,
            error: None,
            finished: false,
            elapsed: Duration::ZERO,
            speed: 0.0,
        }
    }

    #[test]
    fn test_draw_empty_and_full() {
        let chars = ProgressChars::new(ProgressChars::ASCII);
        assert_eq!(chars.draw(0.0, 4), ">---");
        assert_eq!(chars.draw(1.0, 4), "====");
    }

    #[test]
    fn test_draw_partial_glyphs() {
        let chars = ProgressChars::new(ProgressChars::LINE);
        // 1.75 cells filled: one full, then the most filled partial.
        assert_eq!(chars.draw(0.4375, 4), "━╾──");
        // 1.25 cells filled: one full, then the least filled partial.
        assert_eq!(chars.draw(0.3125, 4), "━╴──");
    }

    #[test]
    fn test_draw_without_partials() {
        let chars = ProgressChars::new("#.");
        assert_eq!(chars.draw(0.5, 4), "##..");
    }

    #[test]
    fn test_draw_width_in_columns() {
        let chars = ProgressChars::default();
        let drawn = chars.draw(0.37, 20);
        assert_eq!(text_width(&drawn), 20);
    }

    #[test]
    fn test_short_palette_falls_back() {
        assert_eq!(
            ProgressChars::new("#"),
            ProgressChars::new(ProgressChars::ASCII)
        );
    }

    #[test]
    fn test_default_template_layout() {
        let template = DefaultTemplate::new(ProgressChars::new(ProgressChars::ASCII)).with_speed(false);
        let line = template.render(&snapshot(50, 100), 30);
        assert!(line.starts_with("50/100 ["));
        assert!(line.ends_with("] 50.00%"));
        assert_eq!(text_width(&line), 30);
    }

    #[test]
    fn test_default_template_title() {
        let mut snap = snapshot(1, 2);
        snap.title = Some("Upload:".into());
        let line = DefaultTemplate::default().render(&snap, 80);
        assert!(line.starts_with("Upload: 1/2 "));
    }

    #[test]
    fn test_default_template_error_replaces_speed() {
        let mut snap = snapshot(3, 10);
        snap.error = Some("operation cancelled".into());
        let line = DefaultTemplate::default().render(&snap, 80);
        assert!(line.ends_with("30.00% ! operation cancelled"));
        assert!(!line.contains("/s"));
    }

    #[test]
    fn test_default_template_drops_bar_when_narrow() {
        let line = DefaultTemplate::default().render(&snapshot(5, 10), 10);
        assert!(!line.contains('['));
        assert!(line.starts_with("5/10 50.00%"));
    }
}
