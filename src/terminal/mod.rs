//! Terminal drivers: geometry queries and cursor control for the pool.
//!
//! The pool composes every frame into a byte buffer and asks its
//! [`TerminalDriver`] for the control sequences that put the cursor back on the
//! first line of the previous frame. Two interchangeable strategies exist:
//!
//! - [`RelativeDriver`] moves the cursor up by the previous frame's height.
//! - [`AbsoluteDriver`] saves the cursor where the frame starts and restores it.
//!
//! [`default_driver`] picks one for the current platform. Tests substitute
//! their own implementation to fake the terminal size.
//!
//! # Examples
//!
//! ```rust
//! use barpool::terminal::{RelativeDriver, TerminalDriver};
//!
//! let mut driver = RelativeDriver::new();
//! let mut out = Vec::new();
//! driver.reposition(&mut out, 3, 3).unwrap();
//! assert_eq!(out, b"\x1b[3A\r");
//! ```

pub(crate) mod absolute;
pub(crate) mod relative;

pub use absolute::AbsoluteDriver;
pub use relative::RelativeDriver;

use console::Term;
use std::io;

/// Erase from the cursor to the end of the screen.
pub(crate) const ERASE_DOWN: &[u8] = b"\x1b[J";

/// Terminal geometry in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub rows: usize,
    pub cols: usize,
}

/// Geometry and cursor control used by the pool's render loop.
///
/// Drivers never write to the terminal themselves: they append control
/// sequences to the frame buffer the pool is composing, and the pool writes
/// that buffer to its output sink in one go.
pub trait TerminalDriver: Send {
    /// Query the terminal size.
    fn size(&self) -> io::Result<TerminalSize>;

    /// Append the sequences that place the cursor at column 0 of the line the
    /// next frame starts on.
    ///
    /// `previous` is the number of lines the last frame wrote (0 before the
    /// first frame) and `next` the number of lines about to be written.
    fn reposition(&mut self, out: &mut Vec<u8>, previous: usize, next: usize) -> io::Result<()>;

    /// Append the sequences that erase everything below a freshly written frame.
    fn clear_below(&mut self, out: &mut Vec<u8>) -> io::Result<()> {
        out.extend_from_slice(ERASE_DOWN);
        Ok(())
    }
}

/// Pick the redraw strategy for the current platform.
///
/// Windows consoles get [`AbsoluteDriver`]; everything else uses
/// [`RelativeDriver`].
pub fn default_driver() -> Box<dyn TerminalDriver> {
    if cfg!(windows) {
        Box::new(AbsoluteDriver::new())
    } else {
        Box::new(RelativeDriver::new())
    }
}

/// Query the size of the terminal behind `term`.
pub(crate) fn term_size(term: &Term) -> io::Result<TerminalSize> {
    term.size_checked()
        .map(|(rows, cols)| TerminalSize {
            rows: rows as usize,
            cols: cols as usize,
        })
        .ok_or_else(|| io::Error::other("terminal size unavailable"))
}
