// SPDX-License-Identifier: MIT
//
// n-term color system — terminal-ready colors and name lookup.
//
// A `CellColor` is exactly what the terminal understands: the default
// color, a palette index, or 24-bit RGB. Screen definitions name colors
// with words ("red", "light-blue") or hex ("#ff8800"); `CellColor::parse`
// turns those into values that `ansi::fg` / `ansi::bg` can encode.
//
// Palette layout (ANSI-256):
//
//   0–7     standard colors (black, red, green, yellow, blue, magenta, cyan, white)
//   8–15    bright variants of the standard colors
//   16–255  color cube + grayscale ramp (reachable via `Ansi256` directly)

use std::fmt;

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Compact terminal color.
///
/// Small and `Copy`; converted to ANSI escape sequences by [`crate::ansi`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor` (the standard for modern terminals).
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index.
    Ansi256(u8),

    /// Terminal default color (inherits from terminal settings).
    #[default]
    Default,
}

/// Names of the eight standard ANSI colors, in palette order.
pub const STANDARD_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// Prefix selecting the bright variant (palette 8–15) of a standard color.
const LIGHT_PREFIX: &str = "light-";

impl CellColor {
    /// Look up a color by name.
    ///
    /// Accepts, case-insensitively:
    /// - the eight standard names (`"red"` → palette 1),
    /// - `"light-"` + a standard name for the bright variant (`"light-red"` → 9),
    /// - `"default"` for the terminal's own color.
    ///
    /// Returns `None` for anything else.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower == "default" {
            return Some(Self::Default);
        }
        let (base, offset) = match lower.strip_prefix(LIGHT_PREFIX) {
            Some(rest) => (rest, 8),
            None => (lower.as_str(), 0),
        };
        STANDARD_NAMES
            .iter()
            .position(|&n| n == base)
            .and_then(|idx| u8::try_from(idx).ok())
            .map(|idx| Self::Ansi256(idx + offset))
    }

    /// Parse a color from a hex string.
    ///
    /// Supports `#RGB` and `#RRGGBB` (with or without `#`). Alpha forms are
    /// rejected: terminals have nothing to composite against.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Parse a color from either a name or a `#`-prefixed hex string.
    ///
    /// Bare hex without `#` is not accepted here, so that a typo like
    /// `"bad"` is reported as unknown instead of becoming `#bbaadd`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            Self::hex(s)
        } else {
            Self::named(s)
        }
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<CellColor> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(CellColor::Rgb(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(CellColor::Rgb(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
