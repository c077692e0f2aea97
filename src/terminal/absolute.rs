//! Redraw by saving the cursor position where the frame starts and restoring it.
//!
//! Before the first frame the driver writes enough newlines to make room for
//! it, so the terminal scrolls before the position is saved and the saved
//! position stays valid. When a frame needs more rows than were reserved, the
//! reservation is repeated from the saved position.

use super::{term_size, TerminalDriver, TerminalSize};
use console::Term;
use std::io;
use std::io::Write;

const SAVE_CURSOR: &[u8] = b"\x1b7";
const RESTORE_CURSOR: &[u8] = b"\x1b8";

/// Restores an absolute cursor position saved at the top of the frame.
#[derive(Debug, Clone)]
pub struct AbsoluteDriver {
    term: Term,
    reserved: usize,
    saved: bool,
}

impl Default for AbsoluteDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AbsoluteDriver {
    /// Create a driver reading its geometry from standard error.
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            reserved: 0,
            saved: false,
        }
    }

    fn reserve(&mut self, out: &mut Vec<u8>, lines: usize) -> io::Result<()> {
        if lines > 0 {
            out.extend(std::iter::repeat_n(b'\n', lines));
            write!(out, "\x1b[{lines}A")?;
        }
        out.extend_from_slice(SAVE_CURSOR);
        self.reserved = lines;
        self.saved = true;
        Ok(())
    }
}

impl TerminalDriver for AbsoluteDriver {
    fn size(&self) -> io::Result<TerminalSize> {
        term_size(&self.term)
    }

    fn reposition(&mut self, out: &mut Vec<u8>, _previous: usize, next: usize) -> io::Result<()> {
        if self.saved {
            out.extend_from_slice(RESTORE_CURSOR);
        }
        if next > self.reserved || !self.saved {
            out.push(b'\r');
            self.reserve(out, next)?;
        }
        out.push(b'\r');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_reserves_and_saves() {
        let mut driver = AbsoluteDriver::new();
        let mut out = Vec::new();
        driver.reposition(&mut out, 0, 2).unwrap();
        assert_eq!(out, b"\r\n\n\x1b[2A\x1b7\r");
    }

    #[test]
    fn test_later_frames_restore() {
        let mut driver = AbsoluteDriver::new();
        let mut out = Vec::new();
        driver.reposition(&mut out, 0, 2).unwrap();
        out.clear();
        driver.reposition(&mut out, 2, 2).unwrap();
        assert_eq!(out, b"\x1b8\r");
        out.clear();
        driver.reposition(&mut out, 2, 1).unwrap();
        assert_eq!(out, b"\x1b8\r");
    }

    #[test]
    fn test_growing_frame_reserves_again() {
        let mut driver = AbsoluteDriver::new();
        let mut out = Vec::new();
        driver.reposition(&mut out, 0, 1).unwrap();
        out.clear();
        driver.reposition(&mut out, 1, 3).unwrap();
        assert_eq!(out, b"\x1b8\r\n\n\n\x1b[3A\x1b7\r");
    }
}
