// SPDX-License-Identifier: MIT
//
// n-term — Terminal primitives for n-cui.
//
// The byte-level layer underneath screen rendering: SGR encoding for
// colors and text attributes, color name lookup, a single-write output
// buffer, and the escape-sequence screen clear. Layout and markup live in
// n-layout. Styles produced here are plain strings of
// escape codes; everything above this crate treats them as opaque.
//
// Like the rest of the workspace, this crate talks to the terminal with
// raw ANSI sequences rather than a TUI framework. A frame is a string;
// the only terminal state we rely on is "the last SGR sequence wins".

pub mod ansi;
pub mod attr;
pub mod color;
pub mod output;
pub mod terminal;
