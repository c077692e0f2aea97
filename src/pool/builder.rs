//! Builder pattern implementation for creating [`Pool`] instances.
//!
//! # Examples
//!
//! ```rust
//! use barpool::pool::PoolBuilder;
//! use barpool::progress::Bar;
//! use std::time::Duration;
//!
//! let pool = PoolBuilder::new()
//!     .output(Vec::new())
//!     .refresh_rate(Duration::from_millis(100))
//!     .default_width(80)
//!     .bars([Bar::new(10), Bar::new(20)])
//!     .build();
//! assert_eq!(pool.len(), 2);
//! ```

use super::config::PoolConfig;
use super::pool::Pool;
use crate::progress::Bar;
use crate::terminal::{default_driver, TerminalDriver};

use std::io::{self, Write};
use std::time::Duration;

/// A builder used to create a [`Pool`].
#[derive(Default)]
pub struct PoolBuilder {
    config: PoolConfig,
    output: Option<Box<dyn Write + Send>>,
    driver: Option<Box<dyn TerminalDriver>>,
    bars: Vec<Bar>,
}

impl PoolBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        PoolBuilder::default()
    }

    /// Write frames to `output` instead of standard error.
    pub fn output<W>(mut self, output: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.output = Some(Box::new(output));
        self
    }

    /// Use `driver` for geometry and cursor control instead of
    /// [`default_driver`].
    pub fn driver<D>(mut self, driver: D) -> Self
    where
        D: TerminalDriver + 'static,
    {
        self.driver = Some(Box::new(driver));
        self
    }

    /// Set the time between two frames.
    pub fn refresh_rate(mut self, refresh_rate: Duration) -> Self {
        self.config.refresh_rate = refresh_rate;
        self
    }

    /// Set the line width used when the terminal size is unknown.
    pub fn default_width(mut self, width: usize) -> Self {
        self.config.default_width = width;
        self
    }

    /// Start the pool with these bars already tracked, in display order.
    pub fn bars(mut self, bars: impl IntoIterator<Item = Bar>) -> Self {
        self.bars.extend(bars);
        self
    }

    /// Create the [`Pool`] with the specified options.
    pub fn build(self) -> Pool {
        let output = self.output.unwrap_or_else(|| Box::new(io::stderr()));
        let driver = self.driver.unwrap_or_else(default_driver);
        let pool = Pool::new_with(self.config, output, driver);
        for bar in self.bars {
            pool.add(&bar);
        }
        pool
    }
}
