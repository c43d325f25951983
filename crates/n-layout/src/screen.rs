//! Screens — a fixed stack of lines rendered as one terminal frame.

use std::io::{self, Write};

use crate::error::{DisplayError, SlotError};
use crate::line::Line;
use crate::slot::SlotArena;

// ---------------------------------------------------------------------------
// ClearScreen
// ---------------------------------------------------------------------------

/// The host's "wipe the terminal" operation.
///
/// Supplied by the caller so the core never hard-codes a platform's way of
/// clearing. Any `FnMut() -> io::Result<()>` works:
///
/// ```
/// use n_layout::screen::ClearScreen;
///
/// let mut clears = 0;
/// let mut clear = || -> std::io::Result<()> {
///     clears += 1;
///     Ok(())
/// };
/// clear.clear().unwrap();
/// assert_eq!(clears, 1);
/// ```
pub trait ClearScreen {
    /// Clear the screen.
    ///
    /// # Errors
    ///
    /// Any I/O error from the underlying terminal.
    fn clear(&mut self) -> io::Result<()>;
}

impl<F: FnMut() -> io::Result<()>> ClearScreen for F {
    fn clear(&mut self) -> io::Result<()> {
        self()
    }
}

/// A clear capability that does nothing (piped output, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClear;

impl ClearScreen for NoClear {
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// An ordered, fixed-length sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    lines: Vec<Line>,
}

impl Screen {
    #[must_use]
    pub const fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines rendered and joined by `\n`, no trailing newline. A screen
    /// with no lines renders to `""`.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownSlotId`] if a line references a slot not in
    /// `slots`.
    pub fn render(&self, slots: &SlotArena) -> Result<String, SlotError> {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            line.write_to(slots, &mut out)?;
        }
        Ok(out)
    }

    /// Clear the terminal once, then write the rendered frame to `sink`
    /// (no trailing newline) and flush it.
    ///
    /// The frame is rendered before clearing, so a slot error leaves the
    /// terminal untouched.
    ///
    /// # Errors
    ///
    /// [`DisplayError::Slot`] on a dangling slot reference,
    /// [`DisplayError::Io`] if clearing or writing fails.
    pub fn display(
        &self,
        slots: &SlotArena,
        clear: &mut impl ClearScreen,
        sink: &mut impl Write,
    ) -> Result<(), DisplayError> {
        let frame = self.render(slots)?;
        clear.clear()?;
        sink.write_all(frame.as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Element;
    use crate::slot::SlotId;
    use crate::style::StyleToken;
    use pretty_assertions::assert_eq;

    fn two_line_screen() -> (SlotArena, SlotId, Screen) {
        let mut slots = SlotArena::new();
        let id = slots.create_named("slot1", 3, "x", StyleToken::none()).unwrap();
        let screen = Screen::new(vec![
            Line::new(
                StyleToken::none(),
                vec![Element::Text("A".into()), Element::Slot(id)],
            ),
            Line::plain("B"),
        ]);
        (slots, id, screen)
    }

    #[test]
    fn empty_screen_renders_empty() {
        assert_eq!(Screen::default().render(&SlotArena::new()).unwrap(), "");
    }

    #[test]
    fn lines_joined_without_trailing_newline() {
        let (slots, _, screen) = two_line_screen();
        assert_eq!(screen.render(&slots).unwrap(), "Ax  \nB");
        assert_eq!(screen.len(), 2);
    }

    #[test]
    fn render_reflects_mutation() {
        let (mut slots, id, screen) = two_line_screen();
        let before = screen.render(&slots).unwrap();
        slots.set_value(id, "yes").unwrap();
        let after = screen.render(&slots).unwrap();
        assert_ne!(before, after);
        assert_eq!(after, "Ayes\nB");
    }

    #[test]
    fn display_clears_once_then_writes() {
        let (slots, _, screen) = two_line_screen();
        let mut clears = 0;
        let mut sink = Vec::new();
        screen
            .display(
                &slots,
                &mut || -> io::Result<()> {
                    clears += 1;
                    Ok(())
                },
                &mut sink,
            )
            .unwrap();
        assert_eq!(clears, 1);
        assert_eq!(String::from_utf8(sink).unwrap(), "Ax  \nB");
    }

    #[test]
    fn display_slot_error_skips_clear() {
        let mut foreign = SlotArena::new();
        let id = foreign.create(1, "", StyleToken::none()).unwrap();
        let screen = Screen::new(vec![Line::new(StyleToken::none(), vec![Element::Slot(id)])]);
        let mut cleared = false;
        let mut sink = Vec::new();
        let err = screen
            .display(
                &SlotArena::new(),
                &mut || -> io::Result<()> {
                    cleared = true;
                    Ok(())
                },
                &mut sink,
            )
            .unwrap_err();
        assert!(matches!(err, DisplayError::Slot(SlotError::UnknownSlotId(_))));
        assert!(!cleared);
        assert!(sink.is_empty());
    }

    #[test]
    fn display_clear_failure_is_io_error() {
        let (slots, _, screen) = two_line_screen();
        let mut sink = Vec::new();
        let err = screen
            .display(
                &slots,
                &mut || -> io::Result<()> { Err(io::Error::other("no tty")) },
                &mut sink,
            )
            .unwrap_err();
        assert!(matches!(err, DisplayError::Io(_)));
        assert!(sink.is_empty());
    }

    #[test]
    fn no_clear_is_a_noop() {
        let (slots, _, screen) = two_line_screen();
        let mut sink = Vec::new();
        screen.display(&slots, &mut NoClear, &mut sink).unwrap();
        assert_eq!(sink, b"Ax  \nB");
    }
}
