//! Barpool keeps many independently progressing operations on one live
//! terminal display without interleaving their output.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use barpool::source::{Completion, Progressable};
//! use barpool::{Error, Pool, ProgressFactory};
//! use std::sync::atomic::{AtomicI64, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! struct Transfer {
//!     done: AtomicI64,
//!     finished: Completion,
//! }
//!
//! impl Progressable for Transfer {
//!     fn total(&self) -> i64 { 100 }
//!     fn value(&self) -> i64 { self.done.load(Ordering::Relaxed) }
//!     fn completion(&self) -> Completion { self.finished.clone() }
//!     fn title(&self) -> Option<String> { Some("Copying:".into()) }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let pool = Pool::new();
//! pool.start()?;
//! let factory = ProgressFactory::new(pool.clone());
//!
//! let copy = Arc::new(Transfer { done: AtomicI64::new(0), finished: Completion::new() });
//! factory.register(Some(copy.clone()))?;
//!
//! for _ in 0..10 {
//!     tokio::time::sleep(Duration::from_millis(100)).await;
//!     copy.done.fetch_add(10, Ordering::Relaxed);
//! }
//! copy.finished.fire();
//!
//! factory.wait().await;
//! pool.stop().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`source`] - The [`Progressable`](source::Progressable) capability and its single-fire [`Completion`](source::Completion)
//! - [`progress`] - The lock-guarded [`Bar`](progress::Bar) state and its line templates
//! - [`bridge`] - Background workers mirroring a source into a bar
//! - [`pool`] - The render loop owning the terminal
//! - [`terminal`] - Terminal drivers for geometry and cursor control
//! - [`factory`] - Registration bookkeeping on top of a pool
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`utils`] - Shared utility functions

pub mod bridge;
pub mod error;
pub mod factory;
pub mod pool;
pub mod progress;
pub mod source;
pub mod terminal;
pub mod utils;

pub use bridge::{register_progressable, register_progressable_with_cancel, BridgeBuilder};
pub use error::{Error, Result};
pub use factory::ProgressFactory;
pub use pool::{Pool, PoolBuilder, PoolConfig};
pub use progress::{Bar, BarSnapshot, DefaultTemplate, ProgressChars, Template};
pub use source::{Completion, Progressable, SharedSource};
pub use terminal::{default_driver, TerminalDriver, TerminalSize};
