//! ANSI style resolution.
//!
//! [`AnsiStyleResolver`] turns a `(foreground, background, emphasis)` name
//! triple into the SGR escape sequences that select it. The result is a
//! [`StyleToken`]: printed before text, it stays in effect until a later
//! token overrides it.
//!
//! Unknown names degrade instead of failing: the component is left out of
//! the token, an error is reported for it, and the other components still
//! apply.

use std::io::{self, Write};

use n_layout::error::{StyleComponent, StyleError};
use n_layout::style::{Resolution, StyleResolver, StyleToken};
use n_term::ansi;
use n_term::color::CellColor;

use crate::names::{self, Emphasis};

/// Resolves style names to ANSI SGR sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnsiStyleResolver {
    reset_first: bool,
}

impl AnsiStyleResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self { reset_first: false }
    }

    /// Start every token with SGR 0, so attributes such as italic from an
    /// earlier token do not carry over.
    #[must_use]
    pub const fn with_reset(mut self) -> Self {
        self.reset_first = true;
        self
    }

    fn write_token(
        &self,
        w: &mut impl Write,
        fg: Option<CellColor>,
        bg: Option<CellColor>,
        emphasis: Option<Emphasis>,
    ) -> io::Result<()> {
        if self.reset_first {
            ansi::reset(w)?;
        }
        if let Some(color) = fg {
            ansi::fg(w, color)?;
        }
        if let Some(color) = bg {
            ansi::bg(w, color)?;
        }
        match emphasis {
            Some(Emphasis::Normal) => ansi::normal_intensity(w)?,
            Some(Emphasis::Attrs(attr)) => ansi::attrs(w, attr)?,
            None => {}
        }
        Ok(())
    }
}

impl StyleResolver for AnsiStyleResolver {
    fn resolve(&self, fg: &str, bg: &str, emphasis: &str) -> Resolution {
        let mut errors = Vec::new();
        let mut unknown = |component, name: &str| {
            tracing::warn!(%component, name, "unknown style name");
            errors.push(StyleError::UnknownStyleComponent {
                component,
                name: name.to_owned(),
            });
        };

        let fg_color = names::color(fg);
        if fg_color.is_none() {
            unknown(StyleComponent::Foreground, fg);
        }
        let bg_color = names::color(bg);
        if bg_color.is_none() {
            unknown(StyleComponent::Background, bg);
        }
        let em = names::emphasis(emphasis);
        if em.is_none() {
            unknown(StyleComponent::Emphasis, emphasis);
        }

        let mut buf = Vec::with_capacity(24);
        if let Err(e) = self.write_token(&mut buf, fg_color, bg_color, em) {
            tracing::error!(error = %e, "encoding style token");
        }
        Resolution {
            token: StyleToken::new(String::from_utf8_lossy(&buf)),
            errors,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use n_layout::style::StyleSpec;
    use pretty_assertions::assert_eq;

    fn token(fg: &str, bg: &str, em: &str) -> String {
        let r = AnsiStyleResolver::new().resolve(fg, bg, em);
        assert!(r.is_clean(), "unexpected errors: {:?}", r.errors);
        r.token.as_str().to_owned()
    }

    #[test]
    fn default_triple() {
        let r = AnsiStyleResolver::new().resolve_spec(&StyleSpec::default());
        assert!(r.is_clean());
        assert_eq!(r.token.as_str(), "\x1b[37m\x1b[40m\x1b[1m");
    }

    #[test]
    fn light_colors_use_bright_codes() {
        assert_eq!(token("light-red", "light-blue", "dim"), "\x1b[91m\x1b[104m\x1b[2m");
    }

    #[test]
    fn hex_and_default() {
        assert_eq!(
            token("#ff8800", "default", "italic"),
            "\x1b[38;2;255;136;0m\x1b[49m\x1b[3m"
        );
    }

    #[test]
    fn normal_cancels_intensity() {
        assert_eq!(token("green", "black", "normal"), "\x1b[32m\x1b[40m\x1b[22m");
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(token("Yellow", "BLUE", "Bright"), token("yellow", "blue", "bright"));
    }

    #[test]
    fn unknown_component_degrades() {
        let r = AnsiStyleResolver::new().resolve("mauve", "blue", "bright");
        assert_eq!(r.token.as_str(), "\x1b[44m\x1b[1m");
        assert_eq!(
            r.errors,
            vec![StyleError::UnknownStyleComponent {
                component: StyleComponent::Foreground,
                name: "mauve".into(),
            }]
        );
    }

    #[test]
    fn every_component_unknown() {
        let r = AnsiStyleResolver::new().resolve("a", "b", "c");
        assert!(r.token.is_none());
        let components: Vec<_> = r
            .errors
            .iter()
            .map(|StyleError::UnknownStyleComponent { component, .. }| *component)
            .collect();
        assert_eq!(
            components,
            vec![
                StyleComponent::Foreground,
                StyleComponent::Background,
                StyleComponent::Emphasis,
            ]
        );
    }

    #[test]
    fn reset_prefix() {
        let r = AnsiStyleResolver::new().with_reset().resolve("red", "black", "bold");
        assert_eq!(r.token.as_str(), "\x1b[0m\x1b[31m\x1b[40m\x1b[1m");
    }
}
