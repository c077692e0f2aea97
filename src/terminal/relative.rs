//! Redraw by moving the cursor up relative to where the last frame ended.

use super::{term_size, TerminalDriver, TerminalSize};
use console::Term;
use std::io;
use std::io::Write;

/// Moves the cursor up by the height of the previous frame.
#[derive(Debug, Clone)]
pub struct RelativeDriver {
    term: Term,
}

impl Default for RelativeDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RelativeDriver {
    /// Create a driver reading its geometry from standard error.
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl TerminalDriver for RelativeDriver {
    fn size(&self) -> io::Result<TerminalSize> {
        term_size(&self.term)
    }

    fn reposition(&mut self, out: &mut Vec<u8>, previous: usize, _next: usize) -> io::Result<()> {
        if previous > 0 {
            write!(out, "\x1b[{previous}A")?;
        }
        out.push(b'\r');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_only_returns_carriage() {
        let mut driver = RelativeDriver::new();
        let mut out = Vec::new();
        driver.reposition(&mut out, 0, 4).unwrap();
        assert_eq!(out, b"\r");
    }

    #[test]
    fn test_moves_up_by_previous_height() {
        let mut driver = RelativeDriver::new();
        let mut out = Vec::new();
        driver.reposition(&mut out, 2, 5).unwrap();
        assert_eq!(out, b"\x1b[2A\r");
    }

    #[test]
    fn test_clear_below() {
        let mut driver = RelativeDriver::new();
        let mut out = Vec::new();
        driver.clear_below(&mut out).unwrap();
        assert_eq!(out, b"\x1b[J");
    }
}
