//! # n-theme — style names to terminal styles
//!
//! Screen definitions style text with name triples such as
//! `yellow,blue,bright`. This crate owns the vocabulary ([`names`]) and the
//! resolver that turns a triple into ANSI escape sequences ([`resolver`]).
//!
//! ```
//! use n_layout::StyleResolver;
//! use n_theme::AnsiStyleResolver;
//!
//! let r = AnsiStyleResolver::new().resolve("red", "default", "bold");
//! assert_eq!(r.token.as_str(), "\x1b[31m\x1b[49m\x1b[1m");
//! ```

pub mod names;
pub mod resolver;

pub use names::Emphasis;
pub use resolver::AnsiStyleResolver;
