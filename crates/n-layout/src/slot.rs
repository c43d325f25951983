//! Content slots — fixed-width, mutable placeholders inside lines.
//!
//! A slot owns a raw value and a style, and always renders to exactly
//! `width` chars: longer values are truncated, shorter ones are padded
//! with spaces. That keeps the screen's shape stable no matter what gets
//! written into it.
//!
//! Slots live in a [`SlotArena`]. Lines hold [`SlotId`]s, never the slots
//! themselves, so updating a slot through the arena changes every line
//! that references it on the next render, without re-parsing.
//!
//! Widths and truncation count `char`s, not display columns. A width must
//! be between 1 and [`MAX_WIDTH`].

use std::collections::HashMap;
use std::fmt;

use crate::error::SlotError;
use crate::style::StyleToken;

/// Widest slot an arena accepts, in chars.
pub const MAX_WIDTH: usize = 4096;

// ---------------------------------------------------------------------------
// SlotId
// ---------------------------------------------------------------------------

/// Handle to a slot in a [`SlotArena`].
///
/// Ids are assigned in creation order and never reused, so an id is unique
/// for the lifetime of its arena. An id from one arena means nothing in
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(usize);

impl SlotId {
    /// Position of the slot in its arena.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ContentSlot
// ---------------------------------------------------------------------------

/// A fixed-width placeholder with its own style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSlot {
    id: SlotId,
    name: Option<String>,
    width: usize,
    style: StyleToken,

    /// The value as last assigned, before truncation or padding.
    raw_value: String,

    /// `raw_value` fitted to exactly `width` chars.
    padded: String,
}

impl ContentSlot {
    fn new(id: SlotId, name: Option<String>, width: usize, value: &str, style: StyleToken) -> Self {
        Self {
            id,
            name,
            width,
            style,
            raw_value: value.to_owned(),
            padded: fit(value, width),
        }
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> SlotId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Width in chars. Fixed for the slot's lifetime.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn style(&self) -> &StyleToken {
        &self.style
    }

    /// The value as last assigned (may be longer than `width`).
    #[inline]
    #[must_use]
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    /// The value fitted to `width` chars, without the style prefix.
    #[inline]
    #[must_use]
    pub fn padded(&self) -> &str {
        &self.padded
    }

    /// Style prefix followed by the padded value.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.style.as_str().len() + self.padded.len());
        self.write_to(&mut out);
        out
    }

    /// Append [`render`](Self::render)'s output to `out`.
    pub fn write_to(&self, out: &mut String) {
        out.push_str(self.style.as_str());
        out.push_str(&self.padded);
    }

    /// Replace the value. The style is kept.
    ///
    /// Empty values render as all spaces; values longer than the slot are
    /// silently cut to `width` chars.
    pub fn set_value(&mut self, value: &str) {
        value.clone_into(&mut self.raw_value);
        self.padded = fit(value, self.width);
    }

    /// Replace the style. The padded value is kept as is.
    pub fn set_style(&mut self, style: StyleToken) {
        self.style = style;
    }
}

/// Fit `value` to exactly `width` chars: truncate or right-pad with spaces.
#[must_use]
pub fn fit(value: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut len = 0;
    for ch in value.chars().take(width) {
        out.push(ch);
        len += 1;
    }
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

// ---------------------------------------------------------------------------
// SlotArena
// ---------------------------------------------------------------------------

/// Owns every slot of a screen (or of several screens that share slots).
///
/// Slots are never removed; dropping a [`Screen`](crate::screen::Screen)
/// leaves its slots in the arena. Drop the arena to free them.
#[derive(Debug, Clone, Default)]
pub struct SlotArena {
    slots: Vec<ContentSlot>,
    names: HashMap<String, SlotId>,
}

impl SlotArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an anonymous slot.
    ///
    /// # Errors
    ///
    /// [`SlotError::InvalidWidth`] if `width` is zero or above [`MAX_WIDTH`].
    pub fn create(
        &mut self,
        width: usize,
        initial_value: &str,
        style: StyleToken,
    ) -> Result<SlotId, SlotError> {
        self.insert(None, width, initial_value, style)
    }

    /// Create a slot that markup can reference as `{name}`.
    ///
    /// # Errors
    ///
    /// [`SlotError::InvalidWidth`] if `width` is zero or above [`MAX_WIDTH`],
    /// [`SlotError::DuplicateName`] if `name` is already taken.
    pub fn create_named(
        &mut self,
        name: &str,
        width: usize,
        initial_value: &str,
        style: StyleToken,
    ) -> Result<SlotId, SlotError> {
        if self.names.contains_key(name) {
            return Err(SlotError::DuplicateName(name.to_owned()));
        }
        self.insert(Some(name.to_owned()), width, initial_value, style)
    }

    fn insert(
        &mut self,
        name: Option<String>,
        width: usize,
        initial_value: &str,
        style: StyleToken,
    ) -> Result<SlotId, SlotError> {
        if !(1..=MAX_WIDTH).contains(&width) {
            return Err(SlotError::InvalidWidth(width));
        }
        let id = SlotId(self.slots.len());
        if let Some(n) = &name {
            self.names.insert(n.clone(), id);
        }
        tracing::trace!(%id, name = name.as_deref().unwrap_or(""), width, "slot created");
        self.slots
            .push(ContentSlot::new(id, name, width, initial_value, style));
        Ok(id)
    }

    /// Look up a slot by id.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownSlotId`] if the id was not issued by this arena.
    pub fn lookup(&self, id: SlotId) -> Result<&ContentSlot, SlotError> {
        self.slots.get(id.0).ok_or(SlotError::UnknownSlotId(id))
    }

    /// Mutable access to a slot by id.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownSlotId`] if the id was not issued by this arena.
    pub fn lookup_mut(&mut self, id: SlotId) -> Result<&mut ContentSlot, SlotError> {
        self.slots.get_mut(id.0).ok_or(SlotError::UnknownSlotId(id))
    }

    /// Find a named slot.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<SlotId> {
        self.names.get(name).copied()
    }

    /// Replace a slot's value, keeping its style.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownSlotId`] if the id was not issued by this arena.
    pub fn set_value(&mut self, id: SlotId, value: &str) -> Result<(), SlotError> {
        self.lookup_mut(id)?.set_value(value);
        Ok(())
    }

    /// Replace a slot's style, keeping its padded value.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownSlotId`] if the id was not issued by this arena.
    pub fn set_style(&mut self, id: SlotId, style: StyleToken) -> Result<(), SlotError> {
        self.lookup_mut(id)?.set_style(style);
        Ok(())
    }

    /// Number of slots ever created in this arena.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentSlot> {
        self.slots.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
