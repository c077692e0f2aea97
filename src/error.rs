//! Error handling for the barpool library.
//!
//! Only registration and pool start-up report errors to the caller. Everything
//! that goes wrong after a worker is running is recorded on the bar itself
//! (see [`Bar::error`](crate::progress::Bar::error)) or logged.

use std::io;
use thiserror::Error;

/// Errors that can happen when using barpool.
#[derive(Error, Debug)]
pub enum Error {
    /// A registration was attempted without a progress source.
    #[error("progress source is missing")]
    MissingSource,

    /// A bridge was built without a removal callback.
    #[error("removal callback is missing")]
    MissingRemoveCallback,

    /// No tokio runtime is available to run background tasks on.
    ///
    /// Workers and the render loop are spawned on the runtime of the caller, so
    /// registrations and [`Pool::start`](crate::pool::Pool::start) must happen
    /// from within one.
    #[error("no tokio runtime available to spawn on")]
    NoRuntime,

    /// The pool render loop is already running.
    #[error("pool render loop already started")]
    AlreadyStarted,

    /// The worker of a bar was cancelled before its source completed.
    #[error("operation cancelled")]
    Cancelled,

    /// I/O Error.
    ///
    /// Returned by [`Pool::refresh`](crate::Pool::refresh) when the output
    /// sink rejects a frame. The render loop logs these instead.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for operations that can fail with a barpool error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let err: Error = io::Error::other("boom").into();
        assert!(matches!(err, Error::IOError { .. }));
        assert_eq!(err.to_string(), "I/O error");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::MissingSource.to_string(), "progress source is missing");
        assert_eq!(Error::Cancelled.to_string(), "operation cancelled");
    }
}
