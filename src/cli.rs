//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Display a screen defined in n-cui markup.
#[derive(Debug, Parser)]
#[command(name = "n-cui", version)]
pub struct Args {
    /// Screen definition file.
    pub file: PathBuf,

    /// Set a named slot before displaying. Repeatable.
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Fail on the first markup problem instead of displaying what resolved.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Parse and report problems, but display nothing.
    #[arg(long = "check")]
    pub check: bool,

    /// Do not clear the terminal before displaying.
    #[arg(long = "no-clear")]
    pub no_clear: bool,

    /// Emit no escape sequences at all.
    #[arg(long = "plain")]
    pub plain: bool,

    /// Start every style with a full attribute reset.
    #[arg(long = "reset-styles", conflicts_with = "plain")]
    pub reset_styles: bool,

    /// Style for lines without a `{!style}` directive.
    #[arg(long = "line-style", value_name = "FG,BG,EM")]
    pub line_style: Option<String>,
}

/// Parse a `NAME=VALUE` pair. The value may be empty or contain `=`.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing slot name in '{s}'"));
    }
    Ok((name.to_owned(), value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn assignment() {
        assert_eq!(parse_assignment("clock=12:00"), Ok(("clock".into(), "12:00".into())));
        assert_eq!(parse_assignment("eq=a=b"), Ok(("eq".into(), "a=b".into())));
        assert_eq!(parse_assignment("empty="), Ok(("empty".into(), String::new())));
    }

    #[test]
    fn bad_assignments() {
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn full_command_line() {
        let args = Args::parse_from([
            "n-cui",
            "status.cui",
            "--set",
            "a=1",
            "-s",
            "b=2",
            "--strict",
            "--line-style",
            "white,blue",
        ]);
        assert_eq!(args.file, PathBuf::from("status.cui"));
        assert_eq!(
            args.set,
            vec![("a".into(), "1".into()), ("b".into(), "2".into())]
        );
        assert!(args.strict);
        assert!(!args.check);
        assert_eq!(args.line_style.as_deref(), Some("white,blue"));
    }

    #[test]
    fn plain_conflicts_with_reset() {
        assert!(Args::try_parse_from(["n-cui", "f", "--plain", "--reset-styles"]).is_err());
    }

    #[test]
    fn file_is_required() {
        assert!(Args::try_parse_from(["n-cui"]).is_err());
    }
}
