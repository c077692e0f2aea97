//! Pool module containing the render scheduler that owns the terminal.
//!
//! # Overview
//!
//! The pool module is organized into three main components:
//!
//! - `pool` - The [`Pool`] with its display order and render loop
//! - `builder` - [`PoolBuilder`] for configuring output sink, driver and cadence
//! - `config` - [`PoolConfig`] defaults
//!
//! Each frame the render loop:
//!
//! 1. asks the terminal driver for the terminal size, falling back to
//!    [`PoolConfig::default_width`] when that fails;
//! 2. keeps only the most recently added bars if there are more bars than rows;
//! 3. renders every shown bar at exactly the terminal width;
//! 4. moves the cursor back over the previous frame and writes the new one,
//!    erasing anything the previous frame left below it;
//! 5. writes the frame to the output sink, logging write failures.
//!
//! # Examples
//!
//! ## Default Pool
//!
//! ```rust,no_run
//! use barpool::Pool;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), barpool::Error> {
//! let pool = Pool::new();
//! pool.start()?;
//! // register bars...
//! pool.wait().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Output Sink
//!
//! ```rust
//! use barpool::pool::PoolBuilder;
//! use std::time::Duration;
//!
//! let pool = PoolBuilder::new()
//!     .output(std::io::stdout())
//!     .refresh_rate(Duration::from_millis(50))
//!     .build();
//! assert!(pool.is_empty());
//! ```

pub mod builder;
pub mod config;
pub mod pool;

pub use builder::PoolBuilder;
pub use config::PoolConfig;
pub use pool::Pool;
