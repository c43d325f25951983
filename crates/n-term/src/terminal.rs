// SPDX-License-Identifier: MIT
//
// Terminal control — tty detection and the screen-clear capability.
//
// Safety: `isatty` is a POSIX call with no safe std equivalent on our MSRV
// for arbitrary fds. The unsafe block is a single FFI call on a constant fd.
#![allow(unsafe_code)]
//
// Clearing is done with escape sequences, not by shelling out to `clear`
// or `cls`. ED 2 wipes the visible screen, ED 3 purges scrollback so the
// previous frame cannot be scrolled back into view, and CUP homes the
// cursor so the next frame starts at the top-left corner.

use std::io::{self, Write};

use crate::ansi;

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Check whether stdout is connected to a terminal (TTY).
///
/// When output is piped to a file, clearing the screen only pollutes the
/// file with escape codes.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

/// Write the full clear sequence (clear, purge scrollback, home) to `w`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_clear(w: &mut impl Write) -> io::Result<()> {
    ansi::clear_screen(w)?;
    ansi::clear_scrollback(w)?;
    ansi::cursor_home(w)
}

// ─── TerminalClear ──────────────────────────────────────────────────────────

/// The screen-clear capability for a real terminal.
///
/// Each call to [`clear`](Self::clear) writes and flushes the clear
/// sequence, so it takes effect before any buffered frame output that
/// follows.
///
/// # Example
///
/// ```no_run
/// use n_term::terminal::TerminalClear;
///
/// let mut clear = TerminalClear::stdout();
/// clear.clear()?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct TerminalClear<W: Write = io::Stdout> {
    out: W,
}

impl TerminalClear<io::Stdout> {
    /// Clear through the process's stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalClear<W> {
    /// Clear through an arbitrary writer (a pty, a log, a test buffer).
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Clear the screen and flush.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing fails.
    pub fn clear(&mut self) -> io::Result<()> {
        write_clear(&mut self.out)?;
        self.out.flush()
    }

    /// Consume the capability and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_sequence_order() {
        let mut buf = Vec::new();
        write_clear(&mut buf).unwrap();
        assert_eq!(buf, b"\x1b[2J\x1b[3J\x1b[H");
    }

    #[test]
    fn terminal_clear_writes_each_call() {
        let mut clear = TerminalClear::new(Vec::new());
        clear.clear().unwrap();
        clear.clear().unwrap();
        let out = clear.into_inner();
        assert_eq!(out, b"\x1b[2J\x1b[3J\x1b[H\x1b[2J\x1b[3J\x1b[H");
    }

    #[test]
    fn is_tty_does_not_panic() {
        let _ = is_tty();
    }
}
