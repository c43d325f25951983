//! n-cui — display a markup-defined terminal screen.
//!
//! ```text
//! n-cui status.cui --set target=release --set result=ok
//! ```
//!
//! Markup problems are printed to stderr as `file:line:column: message`.
//! Logging goes to stderr and is controlled by `N_CUI_LOG` (an
//! `EnvFilter` directive, default `warn`).

mod cli;

use std::error::Error;
use std::fmt;
use std::io;
use std::process;

use clap::Parser;
use n_layout::{
    Document, DocumentError, NoClear, NoStyles, ParseConfig, ParseMode, StyleResolver,
    StyleSpec,
};
use n_term::ansi;
use n_term::output::OutputBuffer;
use n_term::terminal::{self, TerminalClear};
use n_theme::AnsiStyleResolver;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

/// `--check` found problems.
#[derive(Debug)]
struct CheckFailed(usize);

impl fmt::Display for CheckFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "1 markup problem"),
            n => write!(f, "{n} markup problems"),
        }
    }
}

impl Error for CheckFailed {}

fn init_logging() {
    let filter = EnvFilter::try_from_env("N_CUI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn parse_config(args: &Args) -> ParseConfig {
    ParseConfig {
        mode: if args.strict {
            ParseMode::Strict
        } else {
            ParseMode::BestEffort
        },
        line_style: args.line_style.as_deref().map(StyleSpec::parse),
        ..ParseConfig::default()
    }
}

/// Prefix a strict-mode parse error with its file, matching how
/// best-effort diagnostics are printed.
fn locate(origin: &str, e: DocumentError) -> Box<dyn Error> {
    match e {
        DocumentError::Parse(d) => format!("{origin}:{d}").into(),
        other => other.into(),
    }
}

/// `--plain` output carries no escape sequences, clearing included.
const fn should_clear(args: &Args, tty: bool) -> bool {
    tty && !args.no_clear && !args.plain
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let ansi_styles = if args.reset_styles {
        AnsiStyleResolver::new().with_reset()
    } else {
        AnsiStyleResolver::new()
    };
    let styles: &dyn StyleResolver = if args.plain { &NoStyles } else { &ansi_styles };

    let origin = args.file.display().to_string();
    let mut doc = Document::load(&args.file, styles, &parse_config(args))
        .map_err(|e| locate(&origin, e))?;

    for d in doc.diagnostics() {
        eprintln!("{origin}:{d}");
    }
    if args.check {
        return match doc.diagnostics().len() {
            0 => Ok(()),
            n => Err(CheckFailed(n).into()),
        };
    }

    for (name, value) in &args.set {
        doc.set(name, value)?;
    }

    let mut out = OutputBuffer::new();
    if should_clear(args, terminal::is_tty()) {
        let mut term = TerminalClear::stdout();
        doc.display(&mut || term.clear(), &mut out)?;
    } else {
        doc.display(&mut NoClear, &mut out)?;
    }
    if !args.plain {
        ansi::reset(&mut out)?;
    }
    out.push_str("\n");
    out.flush_stdout()?;
    Ok(())
}

fn main() {
    init_logging();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("n-cui: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
