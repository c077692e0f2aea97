#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use barpool::bridge::RemoveCallback;
use barpool::progress::Bar;
use barpool::source::{Completion, Progressable};
use barpool::terminal::{RelativeDriver, TerminalDriver, TerminalSize};
use barpool::{Pool, PoolBuilder};

// Common test constants
pub const TEST_COLS: usize = 60;
pub const TEST_ROWS: usize = 24;
pub const TEST_REFRESH: Duration = Duration::from_millis(50);

/// Installs a tracing subscriber honouring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// === Progress Source Helpers ===

/// A progress source driven by the test.
#[derive(Debug, Default)]
pub struct MockSource {
    total: AtomicI64,
    value: AtomicI64,
    completion: Completion,
    title: Option<String>,
    title_probes: AtomicUsize,
}

impl MockSource {
    /// Sets the current progress value
    pub fn set_value(&self, value: i64) {
        self.value.store(value, Ordering::SeqCst);
    }

    /// Revises the total
    pub fn set_total(&self, total: i64) {
        self.total.store(total, Ordering::SeqCst);
    }

    /// Fires the completion signal, returning whether this call fired it
    pub fn finish(&self) -> bool {
        self.completion.fire()
    }

    /// How many times the title was asked for
    pub fn title_probes(&self) -> usize {
        self.title_probes.load(Ordering::SeqCst)
    }
}

impl Progressable for MockSource {
    fn total(&self) -> i64 {
        self.total.load(Ordering::SeqCst)
    }

    fn value(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    fn completion(&self) -> Completion {
        self.completion.clone()
    }

    fn title(&self) -> Option<String> {
        self.title_probes.fetch_add(1, Ordering::SeqCst);
        self.title.clone()
    }
}

/// Creates a source without a title
pub fn create_mock_source(total: i64) -> Arc<MockSource> {
    let source = MockSource::default();
    source.set_total(total);
    Arc::new(source)
}

/// Creates a source exposing a title
pub fn create_titled_source(total: i64, title: &str) -> Arc<MockSource> {
    let source = MockSource {
        title: Some(title.to_string()),
        ..MockSource::default()
    };
    source.set_total(total);
    Arc::new(source)
}

/// Creates a removal callback and the counter it bumps
pub fn create_counting_callback() -> (Arc<AtomicUsize>, RemoveCallback) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let callback: RemoveCallback = Box::new(move |_: &Bar| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (calls, callback)
}

// === Terminal Helpers ===

/// A terminal driver with a fixed (or failing) size.
pub struct FakeDriver {
    size: Option<TerminalSize>,
    inner: RelativeDriver,
}

impl TerminalDriver for FakeDriver {
    fn size(&self) -> io::Result<TerminalSize> {
        self.size
            .ok_or_else(|| io::Error::other("not a terminal"))
    }

    fn reposition(&mut self, out: &mut Vec<u8>, previous: usize, next: usize) -> io::Result<()> {
        self.inner.reposition(out, previous, next)
    }
}

/// Creates a driver reporting `rows` x `cols`
pub fn create_fake_driver(rows: usize, cols: usize) -> FakeDriver {
    FakeDriver {
        size: Some(TerminalSize { rows, cols }),
        inner: RelativeDriver::new(),
    }
}

/// Creates a driver whose size query always fails
pub fn create_failing_driver() -> FakeDriver {
    FakeDriver {
        size: None,
        inner: RelativeDriver::new(),
    }
}

/// An output sink the test can read back.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Drops everything written so far
    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An output sink that rejects every write.
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}

// === Pool Helpers ===

/// Creates a pool builder with a fake terminal and a short refresh rate
pub fn create_test_pool_builder(output: SharedBuffer) -> PoolBuilder {
    Pool::builder()
        .output(output)
        .driver(create_fake_driver(TEST_ROWS, TEST_COLS))
        .refresh_rate(TEST_REFRESH)
}

/// Creates a pool writing into a buffer the test can inspect
pub fn create_test_pool() -> (Pool, SharedBuffer) {
    let output = SharedBuffer::default();
    (create_test_pool_builder(output.clone()).build(), output)
}

/// Splits one written frame into its visible lines
pub fn frame_lines(frame: &str) -> Vec<String> {
    frame
        .split('\n')
        .filter(|line| !line.is_empty() && *line != "\x1b[J")
        .map(|line| {
            let line = line.rsplit('\r').next().unwrap_or(line);
            line.to_string()
        })
        .collect()
}

// === Assertion Helpers ===

/// Asserts that a bar reached the end of a successful run
pub fn assert_bar_completed(bar: &Bar, expected_current: i64) {
    assert!(bar.is_finished(), "bar should be finished");
    assert!(bar.error().is_none(), "bar should have no error");
    assert_eq!(bar.current(), expected_current);
}

/// Asserts that a bar was cancelled
pub fn assert_bar_cancelled(bar: &Bar) {
    let err = bar.error().expect("bar should record the cancellation");
    assert!(matches!(*err, barpool::Error::Cancelled), "unexpected error: {err}");
}
