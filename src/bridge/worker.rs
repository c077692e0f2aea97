//! The bridge worker: mirrors one source into one bar until the source
//! completes or the worker is cancelled.

use super::config::{BridgeConfig, RemoveCallback};
use crate::error::Error;
use crate::progress::Bar;
use crate::source::{Progressable, SharedSource};

use std::fmt;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

/// How a worker ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Completed,
    Cancelled,
}

/// A validated source/bar pair, ready to be started.
///
/// Created by [`BridgeBuilder`](super::BridgeBuilder).
pub struct Bridge {
    source: SharedSource,
    bar: Bar,
    on_remove: RemoveCallback,
    title: Option<String>,
    config: BridgeConfig,
    runtime: Handle,
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("bar", &self.bar)
            .field("title", &self.title)
            .field("config", &self.config)
            .finish()
    }
}

impl Bridge {
    pub(crate) fn new(
        source: SharedSource,
        bar: Bar,
        on_remove: RemoveCallback,
        title: Option<String>,
        config: BridgeConfig,
        runtime: Handle,
    ) -> Self {
        Self {
            source,
            bar,
            on_remove,
            title,
            config,
            runtime,
        }
    }

    /// The bar this bridge writes to.
    pub fn bar(&self) -> &Bar {
        &self.bar
    }

    /// The title probed from the source when the bridge was built.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Spawn the worker on the runtime the bridge was built in.
    pub fn start(self) -> JoinHandle<()> {
        let runtime = self.runtime.clone();
        runtime.spawn(self.run())
    }

    async fn run(self) {
        let Bridge {
            source,
            bar,
            on_remove,
            config,
            ..
        } = self;
        let completion = source.completion();
        let mut ticker = time::interval(config.sync_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let outcome = loop {
            tokio::select! {
                biased;
                _ = config.cancel_token.cancelled() => break Outcome::Cancelled,
                _ = completion.fired() => break Outcome::Completed,
                _ = ticker.tick() => sync(source.as_ref(), &bar),
            }
        };

        match outcome {
            Outcome::Completed => sync(source.as_ref(), &bar),
            Outcome::Cancelled => bar.set_err(Error::Cancelled),
        }
        bar.finish();
        debug!(?outcome, current = bar.current(), total = bar.total(), "bridge worker done");
        on_remove(&bar);
    }
}

/// Copy the source's counters into the bar.
fn sync(source: &dyn Progressable, bar: &Bar) {
    let (total, value) = (source.total(), source.value());
    trace!(total, value, "sync");
    bar.set_total(total);
    bar.set_current(value);
}
