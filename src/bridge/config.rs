//! Configuration structures and defaults for bridges.

use crate::progress::{Bar, DefaultTemplate, Template};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Callback run once when a bridge's worker ends, whichever way it ended.
pub type RemoveCallback = Box<dyn FnOnce(&Bar) + Send + 'static>;

/// Configuration structure for a bridge worker.
#[derive(Clone)]
pub struct BridgeConfig {
    /// How often the source is copied into the bar.
    pub sync_period: Duration,
    /// Cancelling this token stops the worker and marks the bar as cancelled.
    pub cancel_token: CancellationToken,
    /// Template the bar renders with.
    pub template: Arc<dyn Template>,
}

impl BridgeConfig {
    /// Default synchronization period.
    pub const DEFAULT_SYNC_PERIOD: Duration = Duration::from_millis(100);
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("sync_period", &self.sync_period)
            .field("cancelled", &self.cancel_token.is_cancelled())
            .finish()
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            sync_period: Self::DEFAULT_SYNC_PERIOD,
            cancel_token: CancellationToken::new(),
            template: Arc::new(DefaultTemplate::default()),
        }
    }
}
