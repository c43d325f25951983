// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit. Style tokens are built by concatenating
// these sequences; a token stays in effect until a later one overrides it.
//
// All functions return `io::Result` propagated from the underlying writer.
// In practice they never fail when writing to a `Vec<u8>` or `OutputBuffer`.
use std::io::{self, Write};

use crate::attr::Attr;
use crate::color::CellColor;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to the top-left corner (CUP with no parameters).
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Purge the scrollback buffer (ED 3, an xterm extension).
///
/// Without this, the previous frame stays reachable by scrolling up after
/// a full-screen redraw.
#[inline]
pub fn clear_scrollback(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[3J")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Return to normal intensity (SGR 22), cancelling bold and dim.
#[inline]
pub fn normal_intensity(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[22m")
}

// ─── Foreground Color ────────────────────────────────────────────────────────

/// Set the foreground (text) color.
///
/// Uses compact SGR codes for standard colors (30-37, 90-97), the 256-color
/// extended format for palette indices 16-255, and 24-bit `TrueColor` for RGB.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 82 + u16::from(idx))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

// ─── Background Color ────────────────────────────────────────────────────────

/// Set the background color.
///
/// Same encoding strategy as [`fg`] but with BG-specific SGR codes
/// (40–47, 100–107, 48;5;N, 48;2;R;G;B).
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 40 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 92 + u16::from(idx))
            } else {
                write!(w, "\x1b[48;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

/// Emit SGR codes for text attributes as a single CSI sequence.
///
/// Multiple attributes are semicolon-separated: `\x1b[1;3;9m` for
/// bold + italic + strikethrough. Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    w.write_all(b"\x1b[")?;
    let mut first = true;

    macro_rules! emit {
        ($flag:expr, $code:expr) => {
            if attr.contains($flag) {
                if !first {
                    w.write_all(b";")?;
                }
                w.write_all($code)?;
                first = false;
            }
        };
    }

    emit!(Attr::BOLD, b"1");
    emit!(Attr::DIM, b"2");
    emit!(Attr::ITALIC, b"3");
    emit!(Attr::UNDERLINE, b"4");
    emit!(Attr::BLINK, b"5");
    emit!(Attr::INVERSE, b"7");
    emit!(Attr::HIDDEN, b"8");
    emit!(Attr::STRIKETHROUGH, b"9");
    let _ = first; // Last expansion sets first; suppress dead-write warning.

    w.write_all(b"m")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
