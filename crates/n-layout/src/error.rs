//! Error types and parse diagnostics.
//!
//! Errors are split by who has to deal with them:
//!
//! | Type            | Raised by                       | Policy                          |
//! |-----------------|---------------------------------|---------------------------------|
//! | [`SlotError`]   | slot arena, line/screen render  | returned to the immediate caller |
//! | [`StyleError`]  | style resolvers                 | degrades: component left empty  |
//! | [`ParseError`]  | markup parser                   | collected as [`Diagnostic`]s     |
//! | [`SourceError`] | screen definition loading       | aborts only the load             |
//! | [`DisplayError`]| `Screen::display`               | returned to the caller           |
//!
//! Parse errors never abort the rest of a line or screen on their own; the
//! screen parser decides (via [`ParseMode`](crate::screen_parser::ParseMode))
//! whether the first one is fatal.

use std::error::Error;
use std::fmt;
use std::io;

use crate::slot::{MAX_WIDTH, SlotId};

// ---------------------------------------------------------------------------
// SlotError
// ---------------------------------------------------------------------------

/// Failure of a slot-arena operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// A slot was requested with a width of zero or above [`MAX_WIDTH`].
    InvalidWidth(usize),

    /// No slot with this id exists in the arena.
    UnknownSlotId(SlotId),

    /// A named slot was declared twice in the same arena.
    DuplicateName(String),
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidth(w) => write!(f, "invalid slot width {w} (must be 1 to {MAX_WIDTH})"),
            Self::UnknownSlotId(id) => write!(f, "unknown slot id {id}"),
            Self::DuplicateName(name) => write!(f, "slot '{name}' is already declared"),
        }
    }
}

impl Error for SlotError {}

// ---------------------------------------------------------------------------
// StyleError
// ---------------------------------------------------------------------------

/// Which part of a (foreground, background, emphasis) triple is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleComponent {
    Foreground,
    Background,
    Emphasis,
}

impl fmt::Display for StyleComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Foreground => "foreground color",
            Self::Background => "background color",
            Self::Emphasis => "emphasis",
        })
    }
}

/// A style name the resolver did not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    UnknownStyleComponent {
        component: StyleComponent,
        name: String,
    },
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStyleComponent { component, name } => {
                write!(f, "could not find {component} '{name}'")
            }
        }
    }
}

impl Error for StyleError {}

// ---------------------------------------------------------------------------
// ParseError / Diagnostic
// ---------------------------------------------------------------------------

/// Why a `{...}` descriptor could not be turned into an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorIssue {
    /// `{}` — nothing between the braces.
    Empty,

    /// The slot name contains characters outside `[A-Za-z0-9_-]`.
    InvalidName(String),

    /// The width is not an integer from 1 to [`MAX_WIDTH`].
    InvalidWidth(String),

    /// A reference names a slot that has not been declared.
    UnknownSlot(String),

    /// A declaration reuses a name that is already taken.
    DuplicateName(String),
}

impl fmt::Display for DescriptorIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty descriptor"),
            Self::InvalidName(name) => write!(f, "invalid slot name '{name}'"),
            Self::InvalidWidth(width) => write!(f, "invalid slot width '{width}'"),
            Self::UnknownSlot(name) => write!(f, "no slot named '{name}'"),
            Self::DuplicateName(name) => write!(f, "slot '{name}' is already declared"),
        }
    }
}

/// A malformed construct found while parsing one line of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line ended while still inside `{...}`.
    UnterminatedSlot { descriptor: String },

    /// A complete `{...}` descriptor could not be resolved.
    UnresolvedContentDescriptor {
        descriptor: String,
        reason: DescriptorIssue,
    },

    /// An inline style named an unknown color or emphasis. The style was
    /// still applied, minus the failing component.
    UnknownStyleComponent(StyleError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedSlot { descriptor } => {
                write!(f, "unterminated slot '{{{descriptor}'")
            }
            Self::UnresolvedContentDescriptor { descriptor, reason } => {
                write!(f, "cannot resolve '{{{descriptor}}}': {reason}")
            }
            Self::UnknownStyleComponent(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownStyleComponent(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StyleError> for ParseError {
    fn from(e: StyleError) -> Self {
        Self::UnknownStyleComponent(e)
    }
}

/// A [`ParseError`] tagged with where it happened.
///
/// `line` and `column` are 1-based; `column` counts chars and points at the
/// `{` that opened the offending descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub error: ParseError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.error)
    }
}

impl Error for Diagnostic {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

// ---------------------------------------------------------------------------
// SourceError
// ---------------------------------------------------------------------------

/// The screen definition could not be read.
#[derive(Debug)]
pub enum SourceError {
    SourceLoadFailure {
        /// Path or other human-readable name of the source.
        origin: String,
        source: io::Error,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceLoadFailure { origin, source } => {
                write!(f, "could not open '{origin}': {source}")
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SourceLoadFailure { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// DisplayError
// ---------------------------------------------------------------------------

/// Failure while putting a screen on the terminal.
#[derive(Debug)]
pub enum DisplayError {
    /// A line referenced a slot missing from the arena.
    Slot(SlotError),

    /// Clearing or writing failed.
    Io(io::Error),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot(e) => fmt::Display::fmt(e, f),
            Self::Io(e) => write!(f, "terminal output failed: {e}"),
        }
    }
}

impl Error for DisplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Slot(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<SlotError> for DisplayError {
    fn from(e: SlotError) -> Self {
        Self::Slot(e)
    }
}

impl From<io::Error> for DisplayError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// DocumentError
// ---------------------------------------------------------------------------

/// Anything that can go wrong building or updating a [`Document`](crate::document::Document).
#[derive(Debug)]
pub enum DocumentError {
    Source(SourceError),
    Parse(Diagnostic),
    Slot(SlotError),
    /// `set` / `set_style` named a slot the document does not declare.
    UnknownSlotName(String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(e) => fmt::Display::fmt(e, f),
            Self::Parse(d) => fmt::Display::fmt(d, f),
            Self::Slot(e) => fmt::Display::fmt(e, f),
            Self::UnknownSlotName(name) => write!(f, "no slot named '{name}'"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            Self::Parse(d) => Some(d),
            Self::Slot(e) => Some(e),
            Self::UnknownSlotName(_) => None,
        }
    }
}

impl From<SourceError> for DocumentError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

impl From<Diagnostic> for DocumentError {
    fn from(d: Diagnostic) -> Self {
        Self::Parse(d)
    }
}

impl From<SlotError> for DocumentError {
    fn from(e: SlotError) -> Self {
        Self::Slot(e)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
