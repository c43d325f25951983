//! A parsed screen together with the slots it owns.
//!
//! [`Document`] is the usual entry point: parse markup once, then update
//! slots by name and redisplay as often as needed.
//!
//! ```
//! use n_layout::{Document, NoStyles, ParseConfig};
//!
//! let mut doc = Document::from_markup("Status: {status:6=idle}", &NoStyles, &ParseConfig::default())?;
//! assert_eq!(doc.render()?, "Status: idle  ");
//!
//! doc.set("status", "running")?;
//! assert_eq!(doc.render()?, "Status: runnin");
//! # Ok::<(), n_layout::DocumentError>(())
//! ```

use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Diagnostic, DisplayError, DocumentError, SlotError};
use crate::screen::{ClearScreen, Screen};
use crate::screen_parser::{ParseConfig, ScreenParser};
use crate::slot::{ContentSlot, SlotArena, SlotId};
use crate::source;
use crate::style::{StyleResolver, StyleToken};

/// A screen and its slot arena.
#[derive(Debug, Clone, Default)]
pub struct Document {
    slots: SlotArena,
    screen: Screen,
    diagnostics: Vec<Diagnostic>,
}

impl Document {
    /// Parse markup text.
    ///
    /// # Errors
    ///
    /// [`DocumentError::Parse`] in strict mode.
    pub fn from_markup<R: StyleResolver + ?Sized>(
        text: &str,
        styles: &R,
        config: &ParseConfig,
    ) -> Result<Self, DocumentError> {
        let mut slots = SlotArena::new();
        let parsed = ScreenParser::new(styles, config.clone()).parse_str(&mut slots, text)?;
        Ok(Self {
            slots,
            screen: parsed.screen,
            diagnostics: parsed.diagnostics,
        })
    }

    /// Parse markup lines.
    ///
    /// # Errors
    ///
    /// [`DocumentError::Parse`] in strict mode.
    pub fn from_lines<R, I>(lines: I, styles: &R, config: &ParseConfig) -> Result<Self, DocumentError>
    where
        R: StyleResolver + ?Sized,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut slots = SlotArena::new();
        let parsed = ScreenParser::new(styles, config.clone()).parse_lines(&mut slots, lines)?;
        Ok(Self {
            slots,
            screen: parsed.screen,
            diagnostics: parsed.diagnostics,
        })
    }

    /// Read and parse markup from `reader`; `origin` names it in errors.
    ///
    /// # Errors
    ///
    /// [`DocumentError::Source`] if reading fails, [`DocumentError::Parse`]
    /// in strict mode.
    pub fn from_reader<R: StyleResolver + ?Sized>(
        reader: impl Read,
        origin: &str,
        styles: &R,
        config: &ParseConfig,
    ) -> Result<Self, DocumentError> {
        let lines = source::read_lines(reader, origin)?;
        Self::from_lines(&lines, styles, config)
    }

    /// Load and parse a screen definition file.
    ///
    /// # Errors
    ///
    /// [`DocumentError::Source`] if the file cannot be read,
    /// [`DocumentError::Parse`] in strict mode.
    pub fn load<R: StyleResolver + ?Sized>(
        path: &Path,
        styles: &R,
        config: &ParseConfig,
    ) -> Result<Self, DocumentError> {
        let lines = source::load_file(path)?;
        Self::from_lines(&lines, styles, config)
    }

    #[inline]
    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    #[inline]
    #[must_use]
    pub const fn slots(&self) -> &SlotArena {
        &self.slots
    }

    /// Direct access to the arena, for updates by [`SlotId`].
    #[inline]
    pub const fn slots_mut(&mut self) -> &mut SlotArena {
        &mut self.slots
    }

    /// Diagnostics collected while parsing (always empty in strict mode).
    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn slot_id(&self, name: &str) -> Option<SlotId> {
        self.slots.find(name)
    }

    /// The slot declared as `name`.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&ContentSlot> {
        self.slot_id(name).and_then(|id| self.slots.lookup(id).ok())
    }

    /// Set a named slot's value (truncated or padded to its width).
    ///
    /// # Errors
    ///
    /// [`DocumentError::UnknownSlotName`] if no slot has that name.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), DocumentError> {
        let id = self.require(name)?;
        self.slots.set_value(id, value)?;
        Ok(())
    }

    /// Restyle a named slot; its value is unchanged.
    ///
    /// # Errors
    ///
    /// [`DocumentError::UnknownSlotName`] if no slot has that name.
    pub fn set_style(&mut self, name: &str, style: StyleToken) -> Result<(), DocumentError> {
        let id = self.require(name)?;
        self.slots.set_style(id, style)?;
        Ok(())
    }

    /// The current frame.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownSlotId`] if the screen references a slot the
    /// arena does not hold.
    pub fn render(&self) -> Result<String, SlotError> {
        self.screen.render(&self.slots)
    }

    /// Clear the terminal and write the current frame to `sink`.
    ///
    /// # Errors
    ///
    /// See [`Screen::display`].
    pub fn display(
        &self,
        clear: &mut impl ClearScreen,
        sink: &mut impl Write,
    ) -> Result<(), DisplayError> {
        self.screen.display(&self.slots, clear, sink)
    }

    fn require(&self, name: &str) -> Result<SlotId, DocumentError> {
        self.slots
            .find(name)
            .ok_or_else(|| DocumentError::UnknownSlotName(name.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
