//! Configuration structures and defaults for the pool.

use std::time::Duration;

/// Configuration structure for a [`Pool`](super::Pool).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Time between two frames of the render loop.
    pub refresh_rate: Duration,
    /// Line width used when the terminal size cannot be queried.
    pub default_width: usize,
}

impl PoolConfig {
    /// Default time between two frames.
    pub const DEFAULT_REFRESH_RATE: Duration = Duration::from_millis(200);
    /// Default fallback line width.
    pub const DEFAULT_WIDTH: usize = 100;
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            refresh_rate: Self::DEFAULT_REFRESH_RATE,
            default_width: Self::DEFAULT_WIDTH,
        }
    }
}
