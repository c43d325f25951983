// SPDX-License-Identifier: MIT
//
// Text attributes — the emphasis half of a terminal style.
//
// Colors pick *what* hue a glyph is painted in; attributes pick *how* it
// is drawn (bold, dim, italic, ...). Each flag maps one-to-one onto an SGR
// parameter, and `ansi::attrs` packs any combination into a single CSI
// sequence.

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// These map directly to SGR (Select Graphic Rendition) parameters
    /// in the ANSI escape sequence standard. Combine with bitwise OR:
    ///
    /// ```
    /// use n_term::attr::Attr;
    ///
    /// let style = Attr::BOLD | Attr::ITALIC;
    /// assert!(style.contains(Attr::BOLD));
    /// assert!(style.contains(Attr::ITALIC));
    /// assert!(!style.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1 — increased intensity ("bright" in most terminals).
        const BOLD          = 1 << 0;
        /// SGR 2 — decreased intensity (faint).
        const DIM           = 1 << 1;
        /// SGR 3 — italic or oblique.
        const ITALIC        = 1 << 2;
        /// SGR 4 — single straight underline.
        const UNDERLINE     = 1 << 3;
        /// SGR 5 — slow blink.
        const BLINK         = 1 << 4;
        /// SGR 7 — swap foreground and background.
        const INVERSE       = 1 << 5;
        /// SGR 8 — invisible text (not widely supported).
        const HIDDEN        = 1 << 6;
        /// SGR 9 — crossed-out text.
        const STRIKETHROUGH = 1 << 7;
    }
}

impl Attr {
    /// Look up a single attribute by its conventional name.
    ///
    /// Case-insensitive. `"bright"` is an alias for [`Attr::BOLD`], which is
    /// how terminals without a separate bright palette render it. Returns
    /// `None` for unknown names.
    #[must_use]
    pub fn from_style_name(name: &str) -> Option<Self> {
        let attr = match name.to_ascii_lowercase().as_str() {
            "bold" | "bright" => Self::BOLD,
            "dim" | "faint" => Self::DIM,
            "italic" => Self::ITALIC,
            "underline" => Self::UNDERLINE,
            "blink" => Self::BLINK,
            "inverse" | "reverse" => Self::INVERSE,
            "hidden" => Self::HIDDEN,
            "strikethrough" => Self::STRIKETHROUGH,
            _ => return None,
        };
        Some(attr)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
