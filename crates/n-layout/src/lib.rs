//! # n-layout — screens of fixed-width styled text
//!
//! A screen is described in a small line-oriented markup. Each line is plain
//! text with `{...}` descriptors that declare *content slots*: fixed-width
//! fields whose value and style can be changed after parsing without
//! touching the rest of the screen.
//!
//! ```text
//! {!white,blue}  Build status
//! Target: {target:12=?}  Result: {result:8=pending|yellow}
//! Again:  {target}
//! ```
//!
//! # Architecture
//!
//! ```text
//! source text
//!     │
//!     ▼
//! source.rs:        lines from a file or reader
//!     │
//!     ▼
//! screen_parser.rs: one MarkupParser pass per line, shared SlotArena
//!     │
//!     ▼
//! parser.rs:        scan → descriptor.rs → slots declared / referenced
//!     │
//!     ▼
//! line.rs, screen.rs: immutable element sequences pointing into the arena
//!     │
//!     ▼
//! render / display: current slot values, padded to width
//! ```
//!
//! Styles are opaque [`StyleToken`]s produced by a [`StyleResolver`]; this
//! crate never emits terminal codes itself. Clearing the terminal is a
//! [`ClearScreen`] capability supplied by the caller.
//!
//! Widths count `char`s, not terminal columns.

pub mod descriptor;
pub mod document;
pub mod error;
pub mod line;
pub mod parser;
pub mod screen;
pub mod screen_parser;
pub mod slot;
pub mod source;
pub mod style;

pub use document::Document;
pub use error::{
    DescriptorIssue, Diagnostic, DisplayError, DocumentError, ParseError, SlotError,
    SourceError, StyleComponent, StyleError,
};
pub use line::{Element, Line};
pub use parser::MarkupParser;
pub use screen::{ClearScreen, NoClear, Screen};
pub use screen_parser::{ParseConfig, ParseMode, ParsedScreen, ScreenParser};
pub use slot::{ContentSlot, MAX_WIDTH, SlotArena, SlotId};
pub use style::{NoStyles, Resolution, StyleResolver, StyleSpec, StyleToken};
