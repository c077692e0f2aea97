//! Registration factory: bridges sources into a [`Pool`] and tracks how many
//! registrations are still outstanding.
//!
//! Every registration moves through `active -> finished | cancelled -> removed`.
//! Removal from the pool and the outstanding-count decrement both happen exactly
//! once, from the bridge's removal callback, whichever way the worker ended.
//!
//! # Examples
//!
//! ```rust
//! use barpool::{Pool, ProgressFactory};
//! use barpool::source::{Completion, Progressable};
//! use std::sync::Arc;
//!
//! struct Job(Completion);
//!
//! impl Progressable for Job {
//!     fn total(&self) -> i64 { 100 }
//!     fn value(&self) -> i64 { 100 }
//!     fn completion(&self) -> Completion { self.0.clone() }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), barpool::Error> {
//! let pool = Pool::builder().output(Vec::new()).build();
//! pool.start()?;
//! let factory = ProgressFactory::new(pool.clone());
//!
//! let job = Arc::new(Job(Completion::new()));
//! factory.register(Some(job.clone()))?;
//! assert_eq!(factory.outstanding(), 1);
//!
//! job.0.fire();
//! factory.wait().await;
//! assert!(pool.is_empty());
//! pool.stop().await;
//! # Ok(())
//! # }
//! ```

use crate::bridge::{BridgeBuilder, BridgeConfig};
use crate::error::{Error, Result};
use crate::pool::Pool;
use crate::progress::{Bar, Template};
use crate::source::SharedSource;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Registers progress sources with a pool and counts the ones still running.
#[derive(Clone)]
pub struct ProgressFactory {
    pool: Pool,
    outstanding: Arc<watch::Sender<usize>>,
    sync_period: Duration,
    template: Option<Arc<dyn Template>>,
}

impl fmt::Debug for ProgressFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressFactory")
            .field("pool", &self.pool)
            .field("outstanding", &self.outstanding())
            .field("sync_period", &self.sync_period)
            .finish()
    }
}

impl ProgressFactory {
    /// Create a factory adding its bars to `pool`.
    pub fn new(pool: Pool) -> Self {
        let (outstanding, _) = watch::channel(0);
        Self {
            pool,
            outstanding: Arc::new(outstanding),
            sync_period: BridgeConfig::DEFAULT_SYNC_PERIOD,
            template: None,
        }
    }

    /// Render the bars of future registrations with `template`.
    pub fn with_template(mut self, template: Arc<dyn Template>) -> Self {
        self.template = Some(template);
        self
    }

    /// Synchronize future registrations every `period`.
    pub fn with_sync_period(mut self, period: Duration) -> Self {
        self.sync_period = period;
        self
    }

    /// The pool bars are added to.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Number of registrations whose worker has not ended yet.
    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }

    /// Register `source` with the pool.
    ///
    /// Thin wrapper over [`register_with_cancel`](Self::register_with_cancel)
    /// with a token that is never cancelled.
    pub fn register(&self, source: Option<SharedSource>) -> Result<Bar> {
        self.register_with_cancel(source, CancellationToken::new())
    }

    /// Register `source` with the pool; cancelling `token` stops its worker.
    ///
    /// A missing source is rejected before anything changes. If the bridge
    /// cannot be built the outstanding count is restored and no bar is added.
    pub fn register_with_cancel(
        &self,
        source: Option<SharedSource>,
        token: CancellationToken,
    ) -> Result<Bar> {
        let source = source.ok_or(Error::MissingSource)?;
        self.outstanding.send_modify(|n| *n += 1);

        let pool = self.pool.clone();
        let outstanding = self.outstanding.clone();
        let mut builder = BridgeBuilder::new()
            .source(source)
            .cancel_token(token)
            .sync_period(self.sync_period)
            .on_remove(move |bar| {
                pool.remove(bar);
                outstanding.send_modify(|n| *n = n.saturating_sub(1));
            });
        if let Some(template) = &self.template {
            builder = builder.template(template.clone());
        }

        let bridge = match builder.build() {
            Ok(bridge) => bridge,
            Err(e) => {
                self.outstanding.send_modify(|n| *n = n.saturating_sub(1));
                return Err(e);
            }
        };

        // Track the bar before the worker runs so a source that is already
        // complete cannot remove it ahead of the add.
        let bar = bridge.bar().clone();
        self.pool.add(&bar);
        bridge.start();
        debug!(outstanding = self.outstanding(), "source registered");
        Ok(bar)
    }

    /// Wait until every registration has ended.
    pub async fn wait(&self) {
        let mut outstanding = self.outstanding.subscribe();
        // The sender lives in `self`, so this only returns once the count is zero.
        let _ = outstanding.wait_for(|n| *n == 0).await;
    }
}
