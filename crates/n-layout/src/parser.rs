//! Markup parsing — one line of raw text into a [`Line`].
//!
//! Parsing happens in two passes:
//!
//! 1. [`scan_line`] is a pure, single left-to-right scan that splits the raw
//!    text into literal fragments and raw descriptor payloads. It knows
//!    nothing about slots or styles.
//! 2. [`MarkupParser`] resolves each payload against a [`SlotArena`] and a
//!    [`StyleResolver`], producing the final [`Line`] plus diagnostics.
//!
//! # Scanner rules
//!
//! | Input       | Literal mode                                  | Slot mode            |
//! |-------------|-----------------------------------------------|----------------------|
//! | `{`         | push fragment (even empty), enter slot mode   | part of descriptor   |
//! | `}`         | literal                                       | end descriptor       |
//! | `\X`        | literal `X` (one char, never chains)          | `\` and `X` verbatim |
//! | `\n`        | end of line, rest discarded                   | end of line          |
//! | end of text | flush non-empty fragment                      | `UnterminatedSlot`   |
//!
//! A `\` right before the end of the line is dropped. `\r\n` and a trailing
//! `\r` count as a line end.

use crate::descriptor::{self, Descriptor};
use crate::error::{DescriptorIssue, Diagnostic, ParseError, SlotError};
use crate::line::{Element, Line};
use crate::slot::SlotArena;
use crate::style::{StyleResolver, StyleSpec, StyleToken};

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// A piece of a scanned line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text with escapes already applied.
    Text(String),

    /// The raw text between `{` and `}`. `column` is the 1-based char
    /// position of the `{`.
    Descriptor { text: String, column: usize },
}

/// A `{` that was never closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unterminated {
    pub column: usize,
    pub text: String,
}

/// Output of [`scan_line`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scan {
    pub tokens: Vec<Token>,
    pub unterminated: Option<Unterminated>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Literal,
    EscapePending,
    Slot,
}

/// Split one raw line into literal fragments and descriptor payloads.
#[must_use]
pub fn scan_line(raw: &str) -> Scan {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut mode = Mode::Literal;
    let mut open_column = 0;

    let mut chars = raw.chars().enumerate().peekable();
    while let Some((idx, c)) = chars.next() {
        let at_line_end = c == '\n' || (c == '\r' && matches!(chars.peek(), None | Some((_, '\n'))));
        if at_line_end {
            break;
        }

        match mode {
            Mode::Literal => match c {
                '{' => {
                    tokens.push(Token::Text(std::mem::take(&mut current)));
                    open_column = idx + 1;
                    mode = Mode::Slot;
                }
                '\\' => mode = Mode::EscapePending,
                _ => current.push(c),
            },
            Mode::EscapePending => {
                current.push(c);
                mode = Mode::Literal;
            }
            Mode::Slot => {
                if c == '}' {
                    tokens.push(Token::Descriptor {
                        text: std::mem::take(&mut current),
                        column: open_column,
                    });
                    mode = Mode::Literal;
                } else {
                    current.push(c);
                }
            }
        }
    }

    let unterminated = match mode {
        Mode::Slot => Some(Unterminated {
            column: open_column,
            text: current,
        }),
        Mode::Literal | Mode::EscapePending => {
            if !current.is_empty() {
                tokens.push(Token::Text(current));
            }
            None
        }
    };

    Scan {
        tokens,
        unterminated,
    }
}

// ---------------------------------------------------------------------------
// MarkupParser
// ---------------------------------------------------------------------------

/// A parsed line and everything that went wrong while parsing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub line: Line,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedLine {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Turns raw markup lines into [`Line`]s, declaring slots as it goes.
///
/// Slots declared on one line can be referenced by name on any later line
/// parsed into the same arena.
pub struct MarkupParser<'a, R: ?Sized> {
    slots: &'a mut SlotArena,
    styles: &'a R,
    defaults: StyleSpec,
    line_style: StyleToken,
}

impl<'a, R: StyleResolver + ?Sized> MarkupParser<'a, R> {
    pub fn new(slots: &'a mut SlotArena, styles: &'a R) -> Self {
        Self {
            slots,
            styles,
            defaults: StyleSpec::default(),
            line_style: StyleToken::none(),
        }
    }

    /// Fallbacks for style parts omitted in inline `|style` and `{!style}`
    /// directives.
    #[must_use]
    pub fn with_defaults(mut self, defaults: StyleSpec) -> Self {
        self.defaults = defaults;
        self
    }

    /// Default style for lines without a `{!style}` directive.
    #[must_use]
    pub fn with_line_style(mut self, style: StyleToken) -> Self {
        self.line_style = style;
        self
    }

    /// Parse one line, reporting diagnostics as line 1.
    pub fn parse_line(&mut self, raw: &str) -> ParsedLine {
        self.parse_line_at(raw, 1)
    }

    /// Parse one line; `line_no` (1-based) is used for diagnostics only.
    ///
    /// Never fails as a whole: each malformed descriptor is dropped from the
    /// line and reported, and parsing continues after it.
    pub fn parse_line_at(&mut self, raw: &str, line_no: usize) -> ParsedLine {
        let scan = scan_line(raw);
        let mut elements = Vec::with_capacity(scan.tokens.len());
        let mut diagnostics = Vec::new();
        let mut line_style = self.line_style.clone();

        for token in scan.tokens {
            match token {
                Token::Text(t) => elements.push(Element::Text(t)),
                Token::Descriptor { text, column } => {
                    let mut report = |error: ParseError| {
                        diagnostics.push(Diagnostic {
                            line: line_no,
                            column,
                            error,
                        });
                    };
                    let resolved = match descriptor::parse(&text, &self.defaults) {
                        Ok(Descriptor::LineStyle(spec)) => {
                            line_style = self.resolve_style(&spec, &mut report);
                            continue;
                        }
                        Ok(Descriptor::Declare {
                            name,
                            width,
                            value,
                            style,
                        }) => self.declare(name, width, &value, style, &mut report),
                        Ok(Descriptor::Reference { name, value, style }) => {
                            self.reference(name, value, style, &mut report)
                        }
                        Err(reason) => Err(reason),
                    };
                    match resolved {
                        Ok(element) => elements.push(element),
                        Err(reason) => report(ParseError::UnresolvedContentDescriptor {
                            descriptor: text,
                            reason,
                        }),
                    }
                }
            }
        }

        if let Some(Unterminated { column, text }) = scan.unterminated {
            diagnostics.push(Diagnostic {
                line: line_no,
                column,
                error: ParseError::UnterminatedSlot { descriptor: text },
            });
        }

        for d in &diagnostics {
            tracing::warn!(line = d.line, column = d.column, error = %d.error, "markup diagnostic");
        }

        ParsedLine {
            line: Line::new(line_style, elements),
            diagnostics,
        }
    }

    fn resolve_style(&self, spec: &StyleSpec, report: &mut impl FnMut(ParseError)) -> StyleToken {
        let resolution = self.styles.resolve_spec(spec);
        for e in resolution.errors {
            report(ParseError::UnknownStyleComponent(e));
        }
        resolution.token
    }

    fn declare(
        &mut self,
        name: Option<String>,
        width: usize,
        value: &str,
        style: Option<StyleSpec>,
        report: &mut impl FnMut(ParseError),
    ) -> Result<Element, DescriptorIssue> {
        let created = match &name {
            Some(n) => self.slots.create_named(n, width, value, StyleToken::none()),
            None => self.slots.create(width, value, StyleToken::none()),
        };
        let id = created.map_err(slot_issue)?;
        // Only a created slot gets its inline style resolved.
        if let Some(spec) = style {
            let token = self.resolve_style(&spec, report);
            self.slots.set_style(id, token).map_err(slot_issue)?;
        }
        tracing::debug!(%id, name = name.as_deref().unwrap_or(""), width, "slot declared");
        Ok(Element::Slot(id))
    }

    fn reference(
        &mut self,
        name: String,
        value: Option<String>,
        style: Option<StyleSpec>,
        report: &mut impl FnMut(ParseError),
    ) -> Result<Element, DescriptorIssue> {
        let Some(id) = self.slots.find(&name) else {
            return Err(DescriptorIssue::UnknownSlot(name));
        };
        let style = style.map(|spec| self.resolve_style(&spec, report));
        let slot = self
            .slots
            .lookup_mut(id)
            .map_err(|_| DescriptorIssue::UnknownSlot(name))?;
        if let Some(v) = value {
            slot.set_value(&v);
        }
        if let Some(s) = style {
            slot.set_style(s);
        }
        Ok(Element::Slot(id))
    }
}

fn slot_issue(e: SlotError) -> DescriptorIssue {
    match e {
        SlotError::DuplicateName(n) => DescriptorIssue::DuplicateName(n),
        SlotError::InvalidWidth(w) => DescriptorIssue::InvalidWidth(w.to_string()),
        SlotError::UnknownSlotId(id) => DescriptorIssue::UnknownSlot(id.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StyleComponent, StyleError};
    use crate::style::{NoStyles, Resolution};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Resolves to `<fg/bg/em>`, rejecting the name `bogus` in any position.
    struct Tagged;

    impl StyleResolver for Tagged {
        fn resolve(&self, fg: &str, bg: &str, emphasis: &str) -> Resolution {
            let mut errors = Vec::new();
            let mut part = |component, name: &str| {
                if name == "bogus" {
                    errors.push(StyleError::UnknownStyleComponent {
                        component,
                        name: name.to_owned(),
                    });
                    String::new()
                } else {
                    name.to_owned()
                }
            };
            let fg = part(StyleComponent::Foreground, fg);
            let bg = part(StyleComponent::Background, bg);
            let em = part(StyleComponent::Emphasis, emphasis);
            Resolution {
                token: StyleToken::new(format!("<{fg}/{bg}/{em}>")),
                errors,
            }
        }
    }

    fn text(s: &str) -> Token {
        Token::Text(s.into())
    }

    fn desc(s: &str, column: usize) -> Token {
        Token::Descriptor {
            text: s.into(),
            column,
        }
    }

    // ── Scanner ─────────────────────────────────────────────────────────

    #[test]
    fn scan_plain_text() {
        assert_eq!(scan_line("hello").tokens, vec![text("hello")]);
    }

    #[test]
    fn scan_empty_line() {
        assert_eq!(scan_line(""), Scan::default());
        assert_eq!(scan_line("\n"), Scan::default());
    }

    #[test]
    fn scan_escaped_braces_are_literal() {
        let scan = scan_line(r"\{hello\}");
        assert_eq!(scan.tokens, vec![text("{hello}")]);
        assert_eq!(scan.unterminated, None);
    }

    #[test]
    fn scan_descriptor_pushes_empty_leading_fragment() {
        assert_eq!(scan_line("{a}").tokens, vec![text(""), desc("a", 1)]);
    }

    #[test]
    fn scan_text_slot_text() {
        assert_eq!(
            scan_line("A{slot1}B").tokens,
            vec![text("A"), desc("slot1", 2), text("B")]
        );
    }

    #[test]
    fn scan_adjacent_descriptors() {
        assert_eq!(
            scan_line("{a}{b}").tokens,
            vec![text(""), desc("a", 1), text(""), desc("b", 4)]
        );
    }

    #[test]
    fn scan_unterminated() {
        let scan = scan_line("abc{def");
        assert_eq!(scan.tokens, vec![text("abc")]);
        assert_eq!(
            scan.unterminated,
            Some(Unterminated {
                column: 4,
                text: "def".into()
            })
        );
    }

    #[test]
    fn scan_double_backslash_is_one_literal() {
        assert_eq!(scan_line(r"a\\b").tokens, vec![text(r"a\b")]);
    }

    #[test]
    fn scan_escape_does_not_chain() {
        // `\\` is a literal backslash; the following `{` opens a slot.
        assert_eq!(
            scan_line(r"\\{x}").tokens,
            vec![text(r"\"), desc("x", 3)]
        );
    }

    #[test]
    fn scan_escape_of_ordinary_char() {
        assert_eq!(scan_line(r"\n\x").tokens, vec![text("nx")]);
    }

    #[test]
    fn scan_trailing_escape_dropped() {
        assert_eq!(scan_line("abc\\").tokens, vec![text("abc")]);
        assert_eq!(scan_line("abc\\\n").tokens, vec![text("abc")]);
    }

    #[test]
    fn scan_no_escapes_inside_slot() {
        assert_eq!(
            scan_line(r"{a\}b").tokens,
            vec![text(""), desc(r"a\", 1), text("b")]
        );
    }

    #[test]
    fn scan_close_brace_in_literal_mode() {
        assert_eq!(scan_line("a}b").tokens, vec![text("a}b")]);
    }

    #[test]
    fn scan_stops_at_line_terminator() {
        assert_eq!(scan_line("one\ntwo").tokens, vec![text("one")]);
        assert_eq!(scan_line("one\r\n").tokens, vec![text("one")]);
        assert_eq!(scan_line("one\r").tokens, vec![text("one")]);
    }

    #[test]
    fn scan_lone_carriage_return_mid_line_is_text() {
        assert_eq!(scan_line("a\rb").tokens, vec![text("a\rb")]);
    }

    #[test]
    fn scan_newline_inside_slot_is_unterminated() {
        let scan = scan_line("{a\n}");
        assert_eq!(scan.tokens, vec![text("")]);
        assert_eq!(
            scan.unterminated,
            Some(Unterminated {
                column: 1,
                text: "a".into()
            })
        );
    }

    #[test]
    fn scan_columns_count_chars() {
        assert_eq!(scan_line("héé{x}").tokens, vec![text("héé"), desc("x", 4)]);
    }

    // ── MarkupParser ────────────────────────────────────────────────────

    #[test]
    fn declares_and_renders_slot() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &NoStyles).parse_line("A{slot1:3=x}");
        assert!(parsed.is_clean());
        assert_eq!(parsed.line.render(&slots).unwrap(), "Ax  ");
        assert!(slots.find("slot1").is_some());
    }

    #[test]
    fn escaped_line_has_no_slots() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &NoStyles).parse_line(r"\{hello\}");
        assert_eq!(parsed.line.elements(), &[Element::Text("{hello}".into())]);
        assert_eq!(parsed.line.slot_ids().count(), 0);
        assert!(slots.is_empty());
    }

    #[test]
    fn unterminated_reports_and_keeps_prefix() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &NoStyles).parse_line("abc{def");
        assert_eq!(parsed.line.elements(), &[Element::Text("abc".into())]);
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic {
                line: 1,
                column: 4,
                error: ParseError::UnterminatedSlot {
                    descriptor: "def".into()
                },
            }]
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn reference_to_earlier_declaration() {
        let mut slots = SlotArena::new();
        let mut parser = MarkupParser::new(&mut slots, &NoStyles);
        let first = parser.parse_line("{n:2=ab}");
        let second = parser.parse_line("[{n}]");
        assert!(second.is_clean());
        assert_eq!(first.line.slot_ids().next(), second.line.slot_ids().next());
        assert_eq!(second.line.render(&slots).unwrap(), "[ab]");
    }

    #[test]
    fn unresolved_descriptor_skips_element_and_continues() {
        let mut slots = SlotArena::new();
        let parsed =
            MarkupParser::new(&mut slots, &NoStyles).parse_line("a{missing}b{ok:1=!}c");
        assert_eq!(parsed.line.render(&slots).unwrap(), "ab!c");
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic {
                line: 1,
                column: 2,
                error: ParseError::UnresolvedContentDescriptor {
                    descriptor: "missing".into(),
                    reason: DescriptorIssue::UnknownSlot("missing".into()),
                },
            }]
        );
    }

    #[test]
    fn duplicate_declaration_reported() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &NoStyles).parse_line("{a:1}{a:2}");
        assert_eq!(parsed.line.slot_ids().count(), 1);
        assert!(matches!(
            &parsed.diagnostics[0].error,
            ParseError::UnresolvedContentDescriptor {
                reason: DescriptorIssue::DuplicateName(n),
                ..
            } if n == "a"
        ));
    }

    #[test]
    fn zero_width_reported() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &NoStyles).parse_line("x{a:0}");
        assert_eq!(parsed.line.elements(), &[Element::Text("x".into())]);
        assert_eq!(parsed.diagnostics.len(), 1);
    }

    #[test]
    fn oversized_width_reported_not_allocated() {
        let mut slots = SlotArena::new();
        let huge = usize::MAX.to_string();
        let parsed = MarkupParser::new(&mut slots, &NoStyles).parse_line(&format!("x{{a:{huge}}}"));
        assert_eq!(parsed.line.elements(), &[Element::Text("x".into())]);
        assert_eq!(
            parsed.diagnostics[0].error,
            ParseError::UnresolvedContentDescriptor {
                descriptor: format!("a:{huge}"),
                reason: DescriptorIssue::InvalidWidth(huge),
            }
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn failed_declaration_reports_no_style_errors() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &Tagged).parse_line("{a:1}{a:2|bogus}");
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(matches!(
            &parsed.diagnostics[0].error,
            ParseError::UnresolvedContentDescriptor {
                reason: DescriptorIssue::DuplicateName(n),
                ..
            } if n == "a"
        ));
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn inline_style_on_declaration() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &Tagged).parse_line("{s:2=hi|red,blue,dim}");
        assert_eq!(parsed.line.render(&slots).unwrap(), "<red/blue/dim>hi");
    }

    #[test]
    fn unknown_style_degrades_gracefully() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &Tagged).parse_line("{s:1=x|bogus,blue}");
        assert_eq!(parsed.line.render(&slots).unwrap(), "</blue/bright>x");
        assert_eq!(
            parsed.diagnostics[0].error,
            ParseError::UnknownStyleComponent(StyleError::UnknownStyleComponent {
                component: StyleComponent::Foreground,
                name: "bogus".into(),
            })
        );
    }

    #[test]
    fn line_style_directive() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &Tagged)
            .with_line_style(StyleToken::from("<base>"))
            .parse_line("{!cyan}hi");
        assert_eq!(parsed.line.style().as_str(), "<cyan/black/bright>");
        assert_eq!(parsed.line.render(&slots).unwrap(), "<cyan/black/bright>hi");
    }

    #[test]
    fn configured_line_style_applies_without_directive() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &NoStyles)
            .with_line_style(StyleToken::from("<base>"))
            .parse_line("hi");
        assert_eq!(parsed.line.render(&slots).unwrap(), "<base>hi");
    }

    #[test]
    fn reference_can_restyle_and_reassign() {
        let mut slots = SlotArena::new();
        let mut parser = MarkupParser::new(&mut slots, &Tagged);
        parser.parse_line("{v:3=abc}");
        parser.parse_line("{v=z|green}");
        let id = slots.find("v").unwrap();
        assert_eq!(slots.lookup(id).unwrap().render(), "<green/black/bright>z  ");
    }

    #[test]
    fn custom_defaults_fill_style_gaps() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &Tagged)
            .with_defaults(StyleSpec::new("default", "default", "normal"))
            .parse_line("{a:1|red}");
        assert_eq!(parsed.line.render(&slots).unwrap(), "<red/default/normal> ");
    }

    #[test]
    fn parse_line_at_tags_line_number() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &NoStyles).parse_line_at("{}", 9);
        assert_eq!(parsed.diagnostics[0].line, 9);
        assert_eq!(
            parsed.diagnostics[0].error,
            ParseError::UnresolvedContentDescriptor {
                descriptor: String::new(),
                reason: DescriptorIssue::Empty,
            }
        );
    }

    #[test]
    fn zero_slot_line_round_trips() {
        let mut slots = SlotArena::new();
        let parsed = MarkupParser::new(&mut slots, &NoStyles).parse_line("just words, no slots");
        assert_eq!(parsed.line.render(&slots).unwrap(), "just words, no slots");
    }

    proptest! {
        #[test]
        fn scan_is_deterministic(raw in "[a-z{}:=|\\\\ ]{0,40}") {
            prop_assert_eq!(scan_line(&raw), scan_line(&raw));
        }

        #[test]
        fn parsing_twice_gives_same_structure(raw in "[a-c{}:1-3=\\\\ ]{0,30}") {
            let mut first = SlotArena::new();
            let mut second = SlotArena::new();
            let a = MarkupParser::new(&mut first, &NoStyles).parse_line(&raw);
            let b = MarkupParser::new(&mut second, &NoStyles).parse_line(&raw);
            prop_assert_eq!(a.line.elements(), b.line.elements());
            prop_assert_eq!(a.diagnostics, b.diagnostics);
            prop_assert_eq!(a.line.render(&first).unwrap(), b.line.render(&second).unwrap());
        }

        #[test]
        fn text_without_markup_round_trips(raw in "[a-zA-Z0-9 ,.;!?-]{0,60}") {
            let mut slots = SlotArena::new();
            let parsed = MarkupParser::new(&mut slots, &NoStyles).parse_line(&raw);
            prop_assert!(parsed.is_clean());
            prop_assert_eq!(parsed.line.render(&slots).unwrap(), raw);
        }
    }
}
