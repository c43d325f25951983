//! Style tokens and the style-resolver seam.
//!
//! A [`StyleToken`] is opaque to everything in this crate: it is a string
//! that gets prepended to text, and it stays in effect until a later token
//! in the same render stream replaces it. What the string contains (ANSI
//! SGR codes, nothing at all, markers for a test) is the resolver's
//! business.
//!
//! Screens name styles as a triple of words (foreground, background,
//! emphasis), written `fg,bg,emphasis` in markup. A [`StyleResolver`] turns
//! the triple into a token.

use std::fmt;

use crate::error::StyleError;

// ---------------------------------------------------------------------------
// StyleToken
// ---------------------------------------------------------------------------

/// An opaque, already-resolved style prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StyleToken(String);

impl StyleToken {
    /// The empty token: applying it changes nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self(String::new())
    }

    /// Wrap a raw prefix string.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the empty token.
    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StyleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StyleToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for StyleToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StyleToken {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// StyleSpec
// ---------------------------------------------------------------------------

/// An unresolved (foreground, background, emphasis) name triple.
///
/// The default is white on black, bright.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleSpec {
    pub fg: String,
    pub bg: String,
    pub emphasis: String,
}

impl StyleSpec {
    #[must_use]
    pub fn new(fg: impl Into<String>, bg: impl Into<String>, emphasis: impl Into<String>) -> Self {
        Self {
            fg: fg.into(),
            bg: bg.into(),
            emphasis: emphasis.into(),
        }
    }

    /// Parse `fg[,bg[,emphasis]]`, filling missing or blank parts from
    /// `defaults`.
    ///
    /// At most three parts are split off; anything after the second comma
    /// is taken as the emphasis name verbatim (and will fail to resolve if
    /// it contains another comma).
    #[must_use]
    pub fn parse_with(text: &str, defaults: &Self) -> Self {
        let mut parts = text.splitn(3, ',').map(str::trim);
        let mut pick = |fallback: &str| match parts.next() {
            Some(p) if !p.is_empty() => p.to_owned(),
            _ => fallback.to_owned(),
        };
        let fg = pick(&defaults.fg);
        let bg = pick(&defaults.bg);
        let emphasis = pick(&defaults.emphasis);
        Self { fg, bg, emphasis }
    }

    /// Parse `fg[,bg[,emphasis]]` against [`StyleSpec::default`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, &Self::default())
    }
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self::new("white", "black", "bright")
    }
}

impl fmt::Display for StyleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.fg, self.bg, self.emphasis)
    }
}

// ---------------------------------------------------------------------------
// Resolution / StyleResolver
// ---------------------------------------------------------------------------

/// The outcome of resolving a style triple.
///
/// `token` is always usable. Each unrecognized component contributes one
/// entry to `errors` and nothing to `token`; the recognized components are
/// still applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    pub token: StyleToken,
    pub errors: Vec<StyleError>,
}

impl Resolution {
    /// A resolution with no errors.
    #[must_use]
    pub const fn clean(token: StyleToken) -> Self {
        Self {
            token,
            errors: Vec::new(),
        }
    }

    /// Whether every component was recognized.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Turns a (foreground, background, emphasis) name triple into a token.
///
/// Implementations must resolve each component independently: an unknown
/// foreground must not prevent the background and emphasis from applying.
pub trait StyleResolver {
    fn resolve(&self, fg: &str, bg: &str, emphasis: &str) -> Resolution;

    /// Resolve a parsed [`StyleSpec`].
    fn resolve_spec(&self, spec: &StyleSpec) -> Resolution {
        self.resolve(&spec.fg, &spec.bg, &spec.emphasis)
    }
}

impl<R: StyleResolver + ?Sized> StyleResolver for &R {
    fn resolve(&self, fg: &str, bg: &str, emphasis: &str) -> Resolution {
        (**self).resolve(fg, bg, emphasis)
    }
}

/// A resolver that styles nothing and accepts every name.
///
/// For plain-text output (logs, pipes, golden tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStyles;

impl StyleResolver for NoStyles {
    fn resolve(&self, _fg: &str, _bg: &str, _emphasis: &str) -> Resolution {
        Resolution::clean(StyleToken::none())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
