//! Whole-screen parsing: many markup lines into one [`Screen`].
//!
//! All lines share one [`SlotArena`], so a slot declared on line 3 can be
//! referenced on line 7. Lines are parsed strictly in order; a reference to
//! a slot declared further down is an unknown slot.

use crate::error::Diagnostic;
use crate::parser::MarkupParser;
use crate::screen::Screen;
use crate::slot::SlotArena;
use crate::style::{StyleResolver, StyleSpec, StyleToken};

/// What to do with the first diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Keep going; every diagnostic is collected and the screen is built
    /// from whatever resolved.
    #[default]
    BestEffort,

    /// Stop at the first diagnostic and return it.
    Strict,
}

/// Screen-parsing options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseConfig {
    pub mode: ParseMode,

    /// Style for lines without a `{!style}` directive. `None` leaves such
    /// lines unstyled.
    pub line_style: Option<StyleSpec>,

    /// Fallbacks for the parts an inline style leaves out.
    pub style_defaults: StyleSpec,
}

impl ParseConfig {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
            ..Self::default()
        }
    }
}

/// A parsed screen plus everything that went wrong on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedScreen {
    pub screen: Screen,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedScreen {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parses a sequence of markup lines into a [`Screen`].
pub struct ScreenParser<'a, R: ?Sized> {
    styles: &'a R,
    config: ParseConfig,
}

impl<'a, R: StyleResolver + ?Sized> ScreenParser<'a, R> {
    pub const fn new(styles: &'a R, config: ParseConfig) -> Self {
        Self { styles, config }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parse `lines` in order, declaring slots into `slots`.
    ///
    /// Diagnostics are numbered from line 1. Each item is one logical line;
    /// anything after an embedded `\n` is ignored.
    ///
    /// # Errors
    ///
    /// In [`ParseMode::Strict`], the first diagnostic. Slots declared before
    /// it stay in `slots`.
    pub fn parse_lines<I>(&self, slots: &mut SlotArena, lines: I) -> Result<ParsedScreen, Diagnostic>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let line_style = self.default_line_style();
        let mut parser = MarkupParser::new(slots, self.styles)
            .with_defaults(self.config.style_defaults.clone())
            .with_line_style(line_style);

        let mut parsed = Vec::new();
        let mut diagnostics = Vec::new();
        for (i, raw) in lines.into_iter().enumerate() {
            let line = parser.parse_line_at(raw.as_ref(), i + 1);
            if self.config.mode == ParseMode::Strict {
                if let Some(first) = line.diagnostics.into_iter().next() {
                    return Err(first);
                }
            } else {
                diagnostics.extend(line.diagnostics);
            }
            parsed.push(line.line);
        }

        tracing::debug!(
            lines = parsed.len(),
            diagnostics = diagnostics.len(),
            "screen parsed"
        );
        Ok(ParsedScreen {
            screen: Screen::new(parsed),
            diagnostics,
        })
    }

    /// Parse a whole markup text, one line per `\n`.
    ///
    /// A trailing newline does not add an empty last line; an empty text
    /// gives an empty screen.
    ///
    /// # Errors
    ///
    /// As [`parse_lines`](Self::parse_lines).
    pub fn parse_str(&self, slots: &mut SlotArena, text: &str) -> Result<ParsedScreen, Diagnostic> {
        self.parse_lines(slots, text.split_inclusive('\n'))
    }

    // Config-level style errors have no source position, so they are only
    // logged; the failing component is left empty as usual.
    fn default_line_style(&self) -> StyleToken {
        let Some(spec) = &self.config.line_style else {
            return StyleToken::none();
        };
        let resolution = self.styles.resolve_spec(spec);
        for e in &resolution.errors {
            tracing::warn!(error = %e, "default line style");
        }
        resolution.token
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
