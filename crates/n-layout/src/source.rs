//! Loading screen definitions.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::SourceError;

/// Read all of `reader` as markup lines.
///
/// Lines keep their terminator; the markup scanner treats it as the end of
/// the line. `origin` names the source in errors.
///
/// # Errors
///
/// [`SourceError::SourceLoadFailure`] on any read error, including input
/// that is not valid UTF-8.
pub fn read_lines(mut reader: impl Read, origin: &str) -> Result<Vec<String>, SourceError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| SourceError::SourceLoadFailure {
            origin: origin.to_owned(),
            source,
        })?;
    Ok(text.split_inclusive('\n').map(str::to_owned).collect())
}

/// Read a screen definition file.
///
/// # Errors
///
/// [`SourceError::SourceLoadFailure`] if the file cannot be opened or read.
pub fn load_file(path: &Path) -> Result<Vec<String>, SourceError> {
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|source| SourceError::SourceLoadFailure {
        origin: origin.clone(),
        source,
    })?;
    let lines = read_lines(BufReader::new(file), &origin)?;
    tracing::debug!(path = %origin, lines = lines.len(), "screen definition loaded");
    Ok(lines)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{self, Cursor};

    #[test]
    fn lines_keep_terminators() {
        let lines = read_lines(Cursor::new("a\nb\r\nc"), "mem").unwrap();
        assert_eq!(lines, vec!["a\n", "b\r\n", "c"]);
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(read_lines(Cursor::new(""), "mem").unwrap().is_empty());
    }

    #[test]
    fn invalid_utf8_is_a_load_failure() {
        let err = read_lines(Cursor::new(vec![b'a', 0xff, b'\n']), "bin").unwrap_err();
        let SourceError::SourceLoadFailure { origin, source } = err;
        assert_eq!(origin, "bin");
        assert_eq!(source.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn missing_file() {
        let path = Path::new("/nonexistent/n-cui/screen.cui");
        let err = load_file(path).unwrap_err();
        assert!(err.to_string().starts_with("could not open '/nonexistent/n-cui/screen.cui'"));
    }

    #[test]
    fn load_real_file() {
        let path = std::env::temp_dir().join(format!("n-cui-source-{}.cui", std::process::id()));
        std::fs::write(&path, "{t:3=abc}\nline two\n").unwrap();
        let lines = load_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(lines.unwrap(), vec!["{t:3=abc}\n", "line two\n"]);
    }
}
