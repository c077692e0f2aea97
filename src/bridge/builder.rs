//! Builder pattern implementation for creating [`Bridge`] instances.
//!
//! # Examples
//!
//! ```rust
//! use barpool::bridge::BridgeBuilder;
//! use barpool::source::{Completion, Progressable};
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! struct Job(Completion);
//!
//! impl Progressable for Job {
//!     fn total(&self) -> i64 { 10 }
//!     fn value(&self) -> i64 { 10 }
//!     fn completion(&self) -> Completion { self.0.clone() }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), barpool::Error> {
//! let job = Arc::new(Job(Completion::new()));
//! let token = CancellationToken::new();
//! let bridge = BridgeBuilder::new()
//!     .source(job.clone())
//!     .on_remove(|bar| println!("done at {}", bar.current()))
//!     .cancel_token(token.child_token())
//!     .sync_period(Duration::from_millis(50))
//!     .build()?;
//!
//! let bar = bridge.bar().clone();
//! let worker = bridge.start();
//! job.0.fire();
//! worker.await.unwrap();
//! assert!(bar.is_finished());
//! # Ok(())
//! # }
//! ```

use super::config::{BridgeConfig, RemoveCallback};
use super::worker::Bridge;
use crate::error::{Error, Result};
use crate::progress::{Bar, Template};
use crate::source::SharedSource;

use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A builder used to create a [`Bridge`].
///
/// A source and a removal callback are required; everything else has a default.
#[derive(Default)]
pub struct BridgeBuilder {
    source: Option<SharedSource>,
    on_remove: Option<RemoveCallback>,
    config: BridgeConfig,
}

impl BridgeBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        BridgeBuilder::default()
    }

    /// Sets the progress source to mirror.
    pub fn source(mut self, source: SharedSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the callback run once the worker ends.
    pub fn on_remove<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&Bar) + Send + 'static,
    {
        self.on_remove = Some(Box::new(callback));
        self
    }

    /// Sets a boxed removal callback, or clears it with `None`.
    pub fn remove_callback(mut self, callback: Option<RemoveCallback>) -> Self {
        self.on_remove = callback;
        self
    }

    /// Sets the token that cancels the worker.
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.config.cancel_token = token;
        self
    }

    /// Sets how often the source is copied into the bar.
    pub fn sync_period(mut self, period: Duration) -> Self {
        self.config.sync_period = period;
        self
    }

    /// Sets the template the bar renders with.
    pub fn template(mut self, template: Arc<dyn Template>) -> Self {
        self.config.template = template;
        self
    }

    /// Validate the options and create the [`Bridge`] and its bar.
    ///
    /// Nothing is spawned yet; call [`Bridge::start`] for that. The optional
    /// title of the source is probed here, once.
    pub fn build(self) -> Result<Bridge> {
        let source = self.source.ok_or(Error::MissingSource)?;
        let on_remove = self.on_remove.ok_or(Error::MissingRemoveCallback)?;
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;

        let bar = Bar::new(source.total());
        bar.set_template(self.config.template.clone());
        let title = source.title().filter(|title| !title.is_empty());
        if let Some(title) = &title {
            bar.set_title(title.clone());
        }
        debug!(total = bar.total(), title = ?title, "bridge created");

        Ok(Bridge::new(source, bar, on_remove, title, self.config, runtime))
    }
}
