//! Lines — literal text interleaved with slot references.
//!
//! A [`Line`] is fixed once built: its element sequence never changes. What
//! changes is the content of the slots it points at, which is looked up in
//! the [`SlotArena`] every time the line renders.

use crate::error::SlotError;
use crate::slot::{SlotArena, SlotId};
use crate::style::StyleToken;

/// One piece of a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    /// Literal text, rendered as is.
    Text(String),

    /// A slot, rendered as its current style + padded value.
    Slot(SlotId),
}

/// A single row of a screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    style: StyleToken,
    elements: Vec<Element>,
}

impl Line {
    /// Build a line from a default style and any element sequence
    /// (including an empty one).
    #[must_use]
    pub const fn new(style: StyleToken, elements: Vec<Element>) -> Self {
        Self { style, elements }
    }

    /// A line holding a single unstyled text fragment.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(StyleToken::none(), vec![Element::Text(text.into())])
    }

    /// The style emitted before the first element.
    #[inline]
    #[must_use]
    pub const fn style(&self) -> &StyleToken {
        &self.style
    }

    #[inline]
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Ids of the slots referenced by this line, in order of appearance.
    pub fn slot_ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.elements.iter().filter_map(|e| match e {
            Element::Slot(id) => Some(*id),
            Element::Text(_) => None,
        })
    }

    /// The literal fragments concatenated, slots left out.
    #[must_use]
    pub fn literal_text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text(t) => Some(t.as_str()),
                Element::Slot(_) => None,
            })
            .collect()
    }

    /// Visible width in chars: fragment lengths plus slot widths.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownSlotId`] if a referenced slot is not in `slots`.
    pub fn width(&self, slots: &SlotArena) -> Result<usize, SlotError> {
        self.elements.iter().try_fold(0, |acc, e| {
            Ok(acc
                + match e {
                    Element::Text(t) => t.chars().count(),
                    Element::Slot(id) => slots.lookup(*id)?.width(),
                })
        })
    }

    /// Render with the current slot states.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownSlotId`] if a referenced slot is not in `slots`.
    pub fn render(&self, slots: &SlotArena) -> Result<String, SlotError> {
        let mut out = String::new();
        self.write_to(slots, &mut out)?;
        Ok(out)
    }

    /// Append [`render`](Self::render)'s output to `out`.
    ///
    /// On error, `out` may hold a partial line.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownSlotId`] if a referenced slot is not in `slots`.
    pub fn write_to(&self, slots: &SlotArena, out: &mut String) -> Result<(), SlotError> {
        out.push_str(self.style.as_str());
        for element in &self.elements {
            match element {
                Element::Text(t) => out.push_str(t),
                Element::Slot(id) => slots.lookup(*id)?.write_to(out),
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
