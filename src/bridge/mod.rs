//! Bridges mirror a [`Progressable`](crate::source::Progressable) source into a
//! [`Bar`](crate::progress::Bar) from a background task.
//!
//! # Overview
//!
//! The bridge module is organized into three components:
//!
//! - `worker` - The [`Bridge`] and the loop its task runs
//! - `builder` - [`BridgeBuilder`] for validating and configuring a bridge
//! - `config` - [`BridgeConfig`] defaults and the [`RemoveCallback`] type
//!
//! Every tick of the sync period the worker copies `total()` and `value()` into
//! the bar. The worker ends in exactly one of two ways:
//!
//! - the source's completion fires: one last sync, the bar is finished, the
//!   removal callback runs;
//! - the cancel token fires: the bar records [`Error::Cancelled`] and is frozen
//!   without another sync, the removal callback runs.
//!
//! A source whose completion never fires keeps its worker alive until the
//! token is cancelled.
//!
//! # Examples
//!
//! ```rust
//! use barpool::bridge::register_progressable;
//! use barpool::progress::Bar;
//! use barpool::source::{Completion, Progressable};
//! use std::sync::Arc;
//!
//! struct Job(Completion);
//!
//! impl Progressable for Job {
//!     fn total(&self) -> i64 { 3 }
//!     fn value(&self) -> i64 { 3 }
//!     fn completion(&self) -> Completion { self.0.clone() }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), barpool::Error> {
//! let (tx, rx) = tokio::sync::oneshot::channel();
//! let job = Arc::new(Job(Completion::new()));
//! let bar = register_progressable(Some(job.clone()), Some(Box::new(move |_: &Bar| {
//!     let _ = tx.send(());
//! })))?;
//! job.0.fire();
//! rx.await.unwrap();
//! assert_eq!(bar.current(), 3);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod worker;

pub use builder::BridgeBuilder;
pub use config::{BridgeConfig, RemoveCallback};
pub use worker::Bridge;

use crate::error::Result;
use crate::progress::Bar;
use crate::source::SharedSource;
use tokio_util::sync::CancellationToken;

/// Start mirroring `source` into a new bar.
///
/// Thin wrapper over [`register_progressable_with_cancel`] with a token that is
/// never cancelled.
pub fn register_progressable(
    source: Option<SharedSource>,
    on_remove: Option<RemoveCallback>,
) -> Result<Bar> {
    register_progressable_with_cancel(source, on_remove, CancellationToken::new())
}

/// Start mirroring `source` into a new bar, stopping early if `token` is
/// cancelled.
///
/// Fails without spawning anything if `source` or `on_remove` is missing, or
/// if there is no tokio runtime to spawn on.
pub fn register_progressable_with_cancel(
    source: Option<SharedSource>,
    on_remove: Option<RemoveCallback>,
    token: CancellationToken,
) -> Result<Bar> {
    let mut builder = BridgeBuilder::new()
        .remove_callback(on_remove)
        .cancel_token(token);
    if let Some(source) = source {
        builder = builder.source(source);
    }
    let bridge = builder.build()?;
    let bar = bridge.bar().clone();
    bridge.start();
    Ok(bar)
}
