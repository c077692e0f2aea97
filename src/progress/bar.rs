//! The renderable progress state bound to one source.
//!
//! A [`Bar`] is a cheap, cloneable handle; all clones share one state guarded by
//! one lock. Every accessor and mutator holds that lock for the duration of the
//! call. [`Bar::render`] copies a [`BarSnapshot`] under the lock and formats it
//! after releasing it.

use super::style::{DefaultTemplate, Template};
use crate::error::Error;
use crate::utils::fit_width;

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Time constant of the speed moving average.
const SPEED_WINDOW: Duration = Duration::from_millis(1500);

/// Exponentially weighted units-per-second estimate.
#[derive(Debug, Clone)]
struct Speed {
    at: Instant,
    value: i64,
    rate: f64,
}

impl Speed {
    fn new(now: Instant, value: i64) -> Self {
        Self {
            at: now,
            value,
            rate: 0.0,
        }
    }

    fn update(&mut self, now: Instant, value: i64) {
        let dt = now.saturating_duration_since(self.at).as_secs_f64();
        if dt <= 0.0 {
            return;
        }
        let instant = (value as f64 - self.value as f64) / dt;
        let alpha = 1.0 - (-dt / SPEED_WINDOW.as_secs_f64()).exp();
        self.rate += alpha * (instant - self.rate);
        self.at = now;
        self.value = value;
    }
}

struct State {
    total: i64,
    current: i64,
    title: Option<String>,
    error: Option<Arc<Error>>,
    finished: bool,
    started: Instant,
    stopped: Option<Instant>,
    speed: Speed,
    template: Arc<dyn Template>,
}

/// An immutable copy of a bar's state, taken under its lock.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSnapshot {
    /// Total amount of work.
    pub total: i64,
    /// Work done so far.
    pub current: i64,
    /// Title shown in front of the bar, if any.
    pub title: Option<String>,
    /// Display text of the recorded error, if any.
    pub error: Option<String>,
    /// Whether the bar has been finished.
    pub finished: bool,
    /// Time since the bar was created, frozen once it finishes.
    pub elapsed: Duration,
    /// Smoothed speed in units per second.
    pub speed: f64,
}

impl BarSnapshot {
    /// Completion ratio in `0.0..=1.0`.
    ///
    /// A bar without a positive total counts as complete once finished.
    pub fn ratio(&self) -> f64 {
        if self.total <= 0 {
            return if self.finished { 1.0 } else { 0.0 };
        }
        (self.current as f64 / self.total as f64).clamp(0.0, 1.0)
    }

    /// Completion percentage. Not clamped, so overshooting sources show above 100.
    pub fn percent(&self) -> f64 {
        if self.total <= 0 {
            return self.ratio() * 100.0;
        }
        self.current as f64 / self.total as f64 * 100.0
    }
}

/// One operation's renderable progress state.
///
/// # Example
///
/// ```rust
/// use barpool::progress::Bar;
///
/// let bar = Bar::new(150);
/// bar.set_current(90);
/// assert_eq!(bar.current(), 90);
///
/// bar.finish();
/// bar.set_current(120);
/// assert_eq!(bar.current(), 90);
/// assert!(bar.is_finished());
/// ```
#[derive(Clone)]
pub struct Bar {
    state: Arc<Mutex<State>>,
}

impl Default for Bar {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Bar")
            .field("total", &state.total)
            .field("current", &state.current)
            .field("title", &state.title)
            .field("error", &state.error)
            .field("finished", &state.finished)
            .finish()
    }
}

impl Bar {
    /// Create a bar with the given total and the default template.
    pub fn new(total: i64) -> Self {
        let now = Instant::now();
        Self {
            state: Arc::new(Mutex::new(State {
                total,
                current: 0,
                title: None,
                error: None,
                finished: false,
                started: now,
                stopped: None,
                speed: Speed::new(now, 0),
                template: Arc::new(DefaultTemplate::default()),
            })),
        }
    }

    /// Whether `self` and `other` are handles to the same bar.
    pub fn ptr_eq(&self, other: &Bar) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Total amount of work.
    pub fn total(&self) -> i64 {
        self.state.lock().total
    }

    /// Revise the total. Ignored once the bar is finished.
    pub fn set_total(&self, total: i64) {
        let mut state = self.state.lock();
        if state.finished {
            trace!(total, "ignoring total update on finished bar");
            return;
        }
        state.total = total;
    }

    /// Work done so far.
    pub fn current(&self) -> i64 {
        self.state.lock().current
    }

    /// Set the current value. Ignored once the bar is finished.
    pub fn set_current(&self, current: i64) {
        let mut state = self.state.lock();
        if state.finished {
            trace!(current, "ignoring current update on finished bar");
            return;
        }
        if state.current != current {
            state.current = current;
            state.speed.update(Instant::now(), current);
        }
    }

    /// Move the current value by `delta`, saturating at the `i64` bounds.
    /// Ignored once the bar is finished.
    pub fn add(&self, delta: i64) {
        let mut state = self.state.lock();
        if state.finished || delta == 0 {
            return;
        }
        state.current = state.current.saturating_add(delta);
        let current = state.current;
        state.speed.update(Instant::now(), current);
    }

    /// The title shown in front of the bar, if any.
    pub fn title(&self) -> Option<String> {
        self.state.lock().title.clone()
    }

    /// Set the title shown in front of the bar. An empty title removes it.
    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.state.lock().title = (!title.is_empty()).then_some(title);
    }

    /// Replace the template used by [`render`](Self::render).
    pub fn set_template(&self, template: Arc<dyn Template>) {
        self.state.lock().template = template;
    }

    /// Record why the operation failed.
    ///
    /// The first recorded error is kept; later ones are dropped.
    pub fn set_err(&self, cause: Error) {
        let mut state = self.state.lock();
        if state.error.is_some() {
            trace!(%cause, "bar already has an error");
            return;
        }
        state.error = Some(Arc::new(cause));
    }

    /// The recorded error, if any.
    pub fn error(&self) -> Option<Arc<Error>> {
        self.state.lock().error.clone()
    }

    /// Mark the bar finished. Its counters are frozen from here on.
    pub fn finish(&self) {
        let mut state = self.state.lock();
        if state.finished {
            return;
        }
        state.finished = true;
        state.stopped = Some(Instant::now());
    }

    /// Whether [`finish`](Self::finish) has been called.
    pub fn is_finished(&self) -> bool {
        self.state.lock().finished
    }

    /// Copy the current state.
    pub fn snapshot(&self) -> BarSnapshot {
        self.snapshot_with_template().0
    }

    fn snapshot_with_template(&self) -> (BarSnapshot, Arc<dyn Template>) {
        let state = self.state.lock();
        let end = state.stopped.unwrap_or_else(Instant::now);
        let snapshot = BarSnapshot {
            total: state.total,
            current: state.current,
            title: state.title.clone(),
            error: state.error.as_ref().map(|e| e.to_string()),
            finished: state.finished,
            elapsed: end.saturating_duration_since(state.started),
            speed: state.speed.rate,
        };
        (snapshot, state.template.clone())
    }

    /// Render the bar as exactly `width` printable columns.
    pub fn render(&self, width: usize) -> String {
        let (snapshot, template) = self.snapshot_with_template();
        fit_width(&template.render(&snapshot, width), width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::text_width;

    #[test]
    fn test_new_bar() {
        let bar = Bar::new(100);
        assert_eq!(bar.total(), 100);
        assert_eq!(bar.current(), 0);
        assert!(!bar.is_finished());
        assert!(bar.error().is_none());
        assert!(bar.title().is_none());
    }

    #[test]
    fn test_finish_freezes_counters() {
        let bar = Bar::new(10);
        bar.set_current(4);
        bar.finish();
        bar.set_current(9);
        bar.set_total(20);
        bar.add(1);
        assert_eq!(bar.current(), 4);
        assert_eq!(bar.total(), 10);
        assert!(bar.is_finished());
    }

    #[test]
    fn test_first_error_is_kept() {
        let bar = Bar::new(10);
        bar.set_err(Error::Cancelled);
        bar.set_err(Error::MissingSource);
        let err = bar.error().expect("error should be recorded");
        assert!(matches!(*err, Error::Cancelled));
    }

    #[test]
    fn test_empty_title_is_no_title() {
        let bar = Bar::new(1);
        bar.set_title("Upload:");
        assert_eq!(bar.title().as_deref(), Some("Upload:"));
        bar.set_title("");
        assert!(bar.title().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let bar = Bar::new(5);
        let other = bar.clone();
        other.set_current(3);
        assert_eq!(bar.current(), 3);
        assert!(bar.ptr_eq(&other));
        assert!(!bar.ptr_eq(&Bar::new(5)));
    }

    #[test]
    fn test_render_exact_width() {
        let bar = Bar::new(150);
        bar.set_current(40);
        for width in [0, 5, 20, 80, 200] {
            assert_eq!(text_width(&bar.render(width)), width);
        }
    }

    #[test]
    fn test_render_shows_error() {
        let bar = Bar::new(10);
        bar.set_err(Error::Cancelled);
        assert!(bar.render(100).contains("operation cancelled"));
    }

    #[test]
    fn test_snapshot_ratio() {
        let bar = Bar::new(0);
        assert_eq!(bar.snapshot().ratio(), 0.0);
        bar.finish();
        assert_eq!(bar.snapshot().ratio(), 1.0);

        let bar = Bar::new(4);
        bar.set_current(6);
        let snapshot = bar.snapshot();
        assert_eq!(snapshot.ratio(), 1.0);
        assert_eq!(snapshot.percent(), 150.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_extreme_values_do_not_overflow() {
        let bar = Bar::new(i64::MAX);
        tokio::time::advance(Duration::from_millis(100)).await;
        bar.set_current(-1);
        tokio::time::advance(Duration::from_millis(100)).await;
        bar.set_current(i64::MAX);
        assert_eq!(bar.current(), i64::MAX);
        assert!(bar.snapshot().speed.is_finite());

        bar.add(1);
        assert_eq!(bar.current(), i64::MAX);
        bar.set_current(i64::MIN);
        bar.add(-1);
        assert_eq!(bar.current(), i64::MIN);
        assert_eq!(text_width(&bar.render(80)), 80);
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_estimate_tracks_rate() {
        let bar = Bar::new(1_000);
        for step in 1..=20 {
            tokio::time::advance(Duration::from_millis(100)).await;
            bar.set_current(step * 10);
        }
        // 10 units every 100ms.
        let speed = bar.snapshot().speed;
        assert!(speed > 50.0 && speed <= 100.0, "speed was {speed}");
    }
}
