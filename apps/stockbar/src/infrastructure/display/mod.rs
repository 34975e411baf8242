//! Terminal status-line display.

use std::io::Write;

use crate::application::ports::DisplayPort;

/// Writes the status line to stdout, redrawing in place.
///
/// The line is the process's single display surface; only the display
/// consumer task calls [`DisplayPort::show`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusLineDisplay;

impl StatusLineDisplay {
    /// Create a new display.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DisplayPort for StatusLineDisplay {
    fn show(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        // Erase the previous line so a shorter update leaves no residue.
        let _ = write!(stdout, "\r\x1b[2K{line}");
        let _ = stdout.flush();
    }
}
