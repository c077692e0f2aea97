//! The progress-source capability.

use super::Completion;
use std::sync::Arc;

/// A shared, type-erased progress source.
pub type SharedSource = Arc<dyn Progressable>;

/// An operation that can report its progress.
///
/// Implementations should return consistent values for [`total`](Self::total)
/// and update [`value`](Self::value) as work is done. The [`Completion`] handed
/// out by [`completion`](Self::completion) must be fired exactly once, when the
/// operation ends. A source whose completion never fires keeps its worker and
/// bar alive until the worker is cancelled.
pub trait Progressable: Send + Sync {
    /// Total amount of work. May be revised while the operation runs.
    fn total(&self) -> i64;

    /// Current progress. Not checked against [`total`](Self::total).
    fn value(&self) -> i64;

    /// Signal fired once when the operation is complete.
    fn completion(&self) -> Completion;

    /// Optional title shown in front of the bar.
    ///
    /// Probed once at registration. `None` or an empty string means no title.
    fn title(&self) -> Option<String> {
        None
    }
}
