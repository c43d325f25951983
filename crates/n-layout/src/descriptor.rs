//! The `{...}` descriptor grammar.
//!
//! Everything between an opening `{` and the next `}` is a descriptor. It
//! either declares a slot, references one, or sets the line's style:
//!
//! ```text
//! descriptor  := line-style | slot
//! line-style  := '!' style
//! slot        := [name] [':' width] ['=' value] ['|' style]
//! style       := fg [',' bg [',' emphasis]]
//! name        := [A-Za-z0-9_-]+
//! ```
//!
//! | Markup                 | Meaning                                        |
//! |------------------------|------------------------------------------------|
//! | `{clock:8}`            | declare slot `clock`, 8 chars wide             |
//! | `{clock:8=--:--}`      | ... with initial value `--:--`                 |
//! | `{clock:8\|red}`        | ... styled red on the default bg/emphasis      |
//! | `{:4}`                 | declare an anonymous 4-char slot               |
//! | `{clock}`              | reference the already-declared `clock`         |
//! | `{clock=12:00}`        | reference `clock` and set its value            |
//! | `{clock\|green,,dim}`   | reference `clock` and restyle it               |
//! | `{!yellow,blue}`       | set the line's default style                   |
//!
//! The descriptor is cut at the first `|`, then the first `=`, then the
//! first `:`. So a value may contain `:` but not `|`, and a name may contain
//! neither. Name, width and style are trimmed; the value is kept verbatim.
//!
//! This module only parses. Resolving names against a slot arena and styles
//! against a resolver is the markup parser's job.

use crate::error::DescriptorIssue;
use crate::slot::MAX_WIDTH;
use crate::style::StyleSpec;

/// A parsed descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// `{!style}` — the line's default style.
    LineStyle(StyleSpec),

    /// `{name[=value][|style]}` — an existing slot, optionally updated.
    Reference {
        name: String,
        value: Option<String>,
        style: Option<StyleSpec>,
    },

    /// `{[name]:width[=value][|style]}` — a new slot.
    Declare {
        name: Option<String>,
        width: usize,
        value: String,
        style: Option<StyleSpec>,
    },
}

/// Parse the text between the braces.
///
/// Missing style parts are filled from `defaults`.
///
/// # Errors
///
/// Returns the reason the descriptor is malformed. Unknown slot names and
/// duplicate declarations are not detected here.
pub fn parse(text: &str, defaults: &StyleSpec) -> Result<Descriptor, DescriptorIssue> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DescriptorIssue::Empty);
    }

    if let Some(style) = trimmed.strip_prefix('!') {
        return Ok(Descriptor::LineStyle(StyleSpec::parse_with(style, defaults)));
    }

    let (head, style) = match text.split_once('|') {
        Some((head, style)) => (head, Some(StyleSpec::parse_with(style, defaults))),
        None => (text, None),
    };
    let (decl, value) = match head.split_once('=') {
        Some((decl, value)) => (decl, Some(value.to_owned())),
        None => (head, None),
    };
    let (name, width) = match decl.split_once(':') {
        Some((name, width)) => (name.trim(), Some(width.trim())),
        None => (decl.trim(), None),
    };

    if !name.is_empty() && !is_valid_name(name) {
        return Err(DescriptorIssue::InvalidName(name.to_owned()));
    }

    match width {
        Some(w) => {
            let width = parse_width(w)?;
            Ok(Descriptor::Declare {
                name: (!name.is_empty()).then(|| name.to_owned()),
                width,
                value: value.unwrap_or_default(),
                style,
            })
        }
        None if name.is_empty() => Err(DescriptorIssue::InvalidName(String::new())),
        None => Ok(Descriptor::Reference {
            name: name.to_owned(),
            value,
            style,
        }),
    }
}

/// Whether `name` is usable as a slot name.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn parse_width(text: &str) -> Result<usize, DescriptorIssue> {
    match text.parse::<usize>() {
        Ok(w) if (1..=MAX_WIDTH).contains(&w) => Ok(w),
        _ => Err(DescriptorIssue::InvalidWidth(text.to_owned())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
