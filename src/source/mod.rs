//! Progress sources: the capability a long-running operation exposes so a
//! bridge can mirror it into a [`Bar`](crate::progress::Bar).
//!
//! # Overview
//!
//! The source module is organized into two components:
//!
//! - `progressable` - The [`Progressable`] trait and the [`SharedSource`] alias
//! - `completion` - The single-fire [`Completion`] signal a source hands out
//!
//! # Examples
//!
//! ```rust
//! use std::sync::atomic::{AtomicI64, Ordering};
//! use barpool::source::{Completion, Progressable};
//!
//! struct Upload {
//!     sent: AtomicI64,
//!     done: Completion,
//! }
//!
//! impl Progressable for Upload {
//!     fn total(&self) -> i64 {
//!         4096
//!     }
//!
//!     fn value(&self) -> i64 {
//!         self.sent.load(Ordering::Relaxed)
//!     }
//!
//!     fn completion(&self) -> Completion {
//!         self.done.clone()
//!     }
//!
//!     fn title(&self) -> Option<String> {
//!         Some("Upload:".into())
//!     }
//! }
//! ```

pub(crate) mod completion;
pub(crate) mod progressable;

pub use completion::Completion;
pub use progressable::{Progressable, SharedSource};
