//! Single-fire completion signal.
//!
//! A [`Completion`] starts unfired and can be fired exactly once; further calls
//! to [`Completion::fire`] report `false` and change nothing. Waiters observe
//! the transition through [`Completion::fired`], which also resolves
//! immediately when the signal has already fired.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Default)]
struct Inner {
    fired: AtomicBool,
    notify: Notify,
}

/// A one-shot "operation finished" event.
///
/// Cloning is cheap and every clone observes the same event.
///
/// # Example
///
/// ```rust
/// use barpool::source::Completion;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let done = Completion::new();
/// let waiter = done.clone();
/// assert!(done.fire());
/// assert!(!done.fire());
/// waiter.fired().await;
/// assert!(waiter.is_fired());
/// # }
/// ```
#[derive(Clone, Default)]
pub struct Completion {
    inner: Arc<Inner>,
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("fired", &self.is_fired())
            .finish()
    }
}

impl Completion {
    /// Create an unfired signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal.
    ///
    /// Returns `true` for the call that fired it and `false` for every later
    /// call. Safe to call from any thread, inside or outside a runtime.
    pub fn fire(&self) -> bool {
        if self.inner.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.inner.notify.notify_waiters();
        true
    }

    /// Whether the signal has fired.
    pub fn is_fired(&self) -> bool {
        self.inner.fired.load(Ordering::Acquire)
    }

    /// Wait until the signal fires.
    pub async fn fired(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Register interest before checking the flag so a concurrent
            // `fire` cannot slip in between.
            notified.as_mut().enable();
            if self.is_fired() {
                return;
            }
            notified.await;
        }
    }
}
