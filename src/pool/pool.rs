//! Core pool implementation with the render loop.
//!
//! One lock (the frame lock) guards the display order, the terminal driver and
//! the output sink. [`Pool::add`] and [`Pool::remove`] take it briefly; the
//! render loop holds it for the whole of one frame, so bars can come and go
//! while the loop runs without ever tearing a frame.

use super::builder::PoolBuilder;
use super::config::PoolConfig;
use crate::error::{Error, Result};
use crate::progress::Bar;
use crate::terminal::{TerminalDriver, TerminalSize};

use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Everything one frame reads or writes.
struct Frame {
    bars: Vec<Bar>,
    driver: Box<dyn TerminalDriver>,
    output: Box<dyn Write + Send>,
    /// Lines written by the previous frame.
    last_lines: usize,
    /// Whether any bar was tracked since the loop started.
    tracked_any: bool,
}

impl Frame {
    /// Compose one frame and write it to the output sink.
    ///
    /// Driver failures are logged and the frame is still written; only a
    /// failing sink is returned.
    fn draw(&mut self, default_width: usize) -> io::Result<()> {
        let size = self.driver.size().unwrap_or_else(|e| {
            debug!(error = %e, "terminal size unavailable, using default width");
            TerminalSize {
                rows: 0,
                cols: default_width,
            }
        });
        let cols = if size.cols == 0 { default_width } else { size.cols };

        // Bars overflowing the terminal height are left out, oldest first.
        let hidden = match size.rows {
            0 => 0,
            rows => self.bars.len().saturating_sub(rows),
        };
        let visible = &self.bars[hidden..];

        let mut out = Vec::new();
        if let Err(e) = self.driver.reposition(&mut out, self.last_lines, visible.len()) {
            warn!(error = %e, "cursor reposition failed");
        }
        for bar in visible {
            out.push(b'\r');
            out.extend_from_slice(bar.render(cols).as_bytes());
            out.push(b'\n');
        }
        if let Err(e) = self.driver.clear_below(&mut out) {
            warn!(error = %e, "clearing below frame failed");
        }

        self.last_lines = visible.len();
        self.output.write_all(&out)?;
        self.output.flush()
    }

    /// Whether every tracked bar is finished, once at least one bar was tracked.
    fn all_finished(&mut self) -> bool {
        if !self.bars.is_empty() {
            self.tracked_any = true;
        }
        self.tracked_any && self.bars.iter().all(Bar::is_finished)
    }
}

/// The one render loop of a pool. It stays in place until the next start so
/// that every caller observes the same loop.
struct RenderTask {
    stop: CancellationToken,
    /// Cancelled once the loop has drawn its final frame and exited.
    done: CancellationToken,
}

impl RenderTask {
    fn is_alive(&self) -> bool {
        !self.done.is_cancelled()
    }
}

struct Shared {
    config: PoolConfig,
    frame: Mutex<Frame>,
    task: Mutex<Option<RenderTask>>,
}

impl Shared {
    /// Draw one frame, logging a failing sink. Returns `true` when every
    /// tracked bar is finished.
    fn draw(&self) -> bool {
        let mut frame = self.frame.lock();
        if let Err(e) = frame.draw(self.config.default_width) {
            warn!(error = %e, "pool print error");
        }
        frame.all_finished()
    }

    fn try_draw(&self) -> Result<bool> {
        let mut frame = self.frame.lock();
        let written = frame.draw(self.config.default_width);
        let finished = frame.all_finished();
        written?;
        Ok(finished)
    }

    async fn render_loop(self: Arc<Self>, stop: CancellationToken, done: CancellationToken) {
        let _done = done.drop_guard();
        let period = self.config.refresh_rate;
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                _ = stop.cancelled() => {
                    debug!("render loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if self.draw() {
                        debug!("all bars finished");
                        break;
                    }
                }
            }
        }
        // Leave the last state of every bar on screen.
        self.draw();
    }
}

/// Owns the terminal display and the order of the bars shown on it.
///
/// Cloning is cheap; clones share the same display.
///
/// ```rust
/// use barpool::{Pool, progress::Bar};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), barpool::Error> {
/// let pool = Pool::builder().output(Vec::new()).build();
/// let bar = Bar::new(10);
/// pool.add(&bar);
/// pool.start()?;
/// bar.set_current(10);
/// bar.finish();
/// pool.wait().await;
/// assert!(!pool.is_running());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Pool {
    shared: Arc<Shared>,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("config", &self.shared.config)
            .field("bars", &self.len())
            .field("running", &self.is_running())
            .finish()
    }
}

impl Pool {
    /// Create a pool writing to standard error with the platform's default
    /// terminal driver.
    pub fn new() -> Self {
        PoolBuilder::new().build()
    }

    /// Start building a pool with custom options.
    pub fn builder() -> PoolBuilder {
        PoolBuilder::new()
    }

    pub(crate) fn new_with(
        config: PoolConfig,
        output: Box<dyn Write + Send>,
        driver: Box<dyn TerminalDriver>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                frame: Mutex::new(Frame {
                    bars: Vec::new(),
                    driver,
                    output,
                    last_lines: 0,
                    tracked_any: false,
                }),
                task: Mutex::new(None),
            }),
        }
    }

    /// The pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.shared.config
    }

    /// Append `bar` to the display. A bar already tracked is not added twice.
    ///
    /// The pool decides when the bar is drawn; callers should not draw it
    /// themselves.
    pub fn add(&self, bar: &Bar) {
        let mut frame = self.shared.frame.lock();
        if frame.bars.iter().any(|b| b.ptr_eq(bar)) {
            debug!("bar already tracked");
            return;
        }
        frame.bars.push(bar.clone());
    }

    /// Stop tracking `bar`. Does nothing if it is not tracked.
    pub fn remove(&self, bar: &Bar) {
        self.shared.frame.lock().bars.retain(|b| !b.ptr_eq(bar));
    }

    /// The tracked bars, in display order.
    pub fn bars(&self) -> Vec<Bar> {
        self.shared.frame.lock().bars.clone()
    }

    /// Number of tracked bars.
    pub fn len(&self) -> usize {
        self.shared.frame.lock().bars.len()
    }

    /// Whether no bar is tracked.
    pub fn is_empty(&self) -> bool {
        self.shared.frame.lock().bars.is_empty()
    }

    /// Draw one frame right away, outside the render loop's cadence.
    ///
    /// Returns `true` if every tracked bar is finished, or
    /// [`Error::IOError`] if the output sink rejected the frame.
    pub fn refresh(&self) -> Result<bool> {
        self.shared.try_draw()
    }

    /// Start the render loop on the current tokio runtime.
    ///
    /// The loop draws a frame every refresh period until every tracked bar is
    /// finished or [`stop`](Self::stop) is called, then draws one final frame.
    pub fn start(&self) -> Result<()> {
        let mut task = self.shared.task.lock();
        if task.as_ref().is_some_and(RenderTask::is_alive) {
            return Err(Error::AlreadyStarted);
        }
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;

        {
            let mut frame = self.shared.frame.lock();
            frame.last_lines = 0;
            frame.tracked_any = !frame.bars.is_empty();
        }

        let stop = CancellationToken::new();
        let done = CancellationToken::new();
        runtime.spawn(self.shared.clone().render_loop(stop.clone(), done.clone()));
        *task = Some(RenderTask { stop, done });
        debug!(refresh_rate = ?self.shared.config.refresh_rate, "render loop started");
        Ok(())
    }

    /// Whether the render loop is running.
    pub fn is_running(&self) -> bool {
        self.shared
            .task
            .lock()
            .as_ref()
            .is_some_and(RenderTask::is_alive)
    }

    /// Stop the render loop and wait for its final frame.
    ///
    /// Any number of callers may stop or [`wait`](Self::wait) concurrently.
    pub async fn stop(&self) {
        let Some(done) = self.signal_stop() else {
            return;
        };
        done.cancelled().await;
    }

    /// Wait for the render loop to end, either on its own or through
    /// [`stop`](Self::stop).
    pub async fn wait(&self) {
        let Some(done) = self.done_token() else {
            return;
        };
        done.cancelled().await;
    }

    fn signal_stop(&self) -> Option<CancellationToken> {
        let task = self.shared.task.lock();
        let task = task.as_ref()?;
        task.stop.cancel();
        Some(task.done.clone())
    }

    fn done_token(&self) -> Option<CancellationToken> {
        self.shared.task.lock().as_ref().map(|t| t.done.clone())
    }
}
