//! Style name tables — the words a screen definition may use.
//!
//! Colors and emphasis are looked up case-insensitively. Colors come from
//! [`CellColor::parse`], so anything it accepts (standard names,
//! `light-` variants, `default`, `#rgb`, `#rrggbb`) works for both
//! foreground and background.

use n_term::attr::Attr;
use n_term::color::{CellColor, STANDARD_NAMES};

/// How intense or decorated text is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Normal intensity (cancels bold and dim).
    Normal,

    /// One or more SGR attributes.
    Attrs(Attr),
}

/// Emphasis names in the order they are documented. [`emphasis`] also
/// takes the aliases [`Attr::from_style_name`] knows (`faint`, `reverse`, ...).
pub const EMPHASIS_NAMES: [&str; 8] = [
    "bright",
    "bold",
    "normal",
    "dim",
    "italic",
    "underline",
    "inverse",
    "strikethrough",
];

/// Look up a foreground or background color.
#[must_use]
pub fn color(name: &str) -> Option<CellColor> {
    CellColor::parse(name)
}

/// Look up an emphasis.
#[must_use]
pub fn emphasis(name: &str) -> Option<Emphasis> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("normal") {
        return Some(Emphasis::Normal);
    }
    Attr::from_style_name(name).map(Emphasis::Attrs)
}

/// Every named color: the standard eight, their `light-` variants, and
/// `default`.
pub fn color_names() -> impl Iterator<Item = String> {
    STANDARD_NAMES
        .iter()
        .map(|n| (*n).to_owned())
        .chain(STANDARD_NAMES.iter().map(|n| format!("light-{n}")))
        .chain(std::iter::once("default".to_owned()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
