//! Reading and validating named input strings.
//!
//! Input files hold one `key=value` entry per line. Lines that fail
//! validation are skipped with a warning; a duplicate key or fewer than two
//! surviving entries aborts the read.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::InputError;

/// One validated input entry, e.g. `S1=ABCBDAB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedString {
    pub name: String,
    pub value: String,
}

impl NamedString {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Why a single line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRejection {
    MissingSeparator,
    MissingKey,
    MissingValue,
    NotAlphanumeric,
}

impl fmt::Display for LineRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            LineRejection::MissingSeparator => "line must contain a key and a value separated by '='",
            LineRejection::MissingKey => "key part is missing",
            LineRejection::MissingValue => "value part is missing",
            LineRejection::NotAlphanumeric => "both key and value must be alphanumeric",
        };
        f.write_str(msg)
    }
}

fn is_alphanumeric(s: &str) -> bool {
    s.chars().all(char::is_alphanumeric)
}

/// Split and validate one line; returns the trimmed key and value.
pub fn parse_line(line: &str) -> Result<(&str, &str), LineRejection> {
    let (key, value) = line
        .split_once('=')
        .ok_or(LineRejection::MissingSeparator)?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() {
        return Err(LineRejection::MissingKey);
    }
    if value.is_empty() {
        return Err(LineRejection::MissingValue);
    }
    if !(is_alphanumeric(key) && is_alphanumeric(value)) {
        return Err(LineRejection::NotAlphanumeric);
    }
    Ok((key, value))
}

/// Read entries from any buffered source, keeping file order.
pub fn read_strings<R: BufRead>(reader: R) -> Result<Vec<NamedString>, InputError> {
    let mut strings = Vec::new();
    let mut seen = HashSet::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| InputError::Read {
            line: line_no,
            source,
        })?;
        let (key, value) = match parse_line(&line) {
            Ok(kv) => kv,
            Err(reason) => {
                warn!(line = line_no, "skipping invalid line: {reason}");
                continue;
            }
        };
        if !seen.insert(key.to_string()) {
            return Err(InputError::DuplicateKey {
                key: key.to_string(),
                line: line_no,
            });
        }
        strings.push(NamedString::new(key, value));
    }

    if strings.len() < 2 {
        return Err(InputError::TooFewStrings {
            found: strings.len(),
        });
    }
    debug!(count = strings.len(), "input strings accepted");
    Ok(strings)
}

/// Open `path` and read its entries.
pub fn read_input(path: impl AsRef<Path>) -> Result<Vec<NamedString>, InputError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_strings(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_trims_and_accepts() {
        assert_eq!(parse_line("  S1 = ABC123 "), Ok(("S1", "ABC123")));
        assert_eq!(parse_line("k=v\r"), Ok(("k", "v")));
    }

    #[test]
    fn parse_line_rejections() {
        assert_eq!(parse_line("no separator"), Err(LineRejection::MissingSeparator));
        assert_eq!(parse_line(""), Err(LineRejection::MissingSeparator));
        assert_eq!(parse_line(" =ABC"), Err(LineRejection::MissingKey));
        assert_eq!(parse_line("S1=  "), Err(LineRejection::MissingValue));
        assert_eq!(parse_line("S1=AB-C"), Err(LineRejection::NotAlphanumeric));
        assert_eq!(parse_line("S 1=ABC"), Err(LineRejection::NotAlphanumeric));
        // only the first '=' separates
        assert_eq!(parse_line("S1=A=B"), Err(LineRejection::NotAlphanumeric));
    }

    #[test]
    fn unicode_alphanumerics_are_accepted() {
        assert_eq!(parse_line("clé=été2"), Ok(("clé", "été2")));
    }

    #[test]
    fn invalid_lines_are_skipped() {
        let src = "S1=ABCBDAB\n\ngarbage\nS2=BDCABA\nS3=a b\n";
        let strings = read_strings(src.as_bytes()).unwrap();
        assert_eq!(
            strings,
            vec![
                NamedString::new("S1", "ABCBDAB"),
                NamedString::new("S2", "BDCABA"),
            ]
        );
    }

    #[test]
    fn duplicate_key_aborts() {
        let src = "S1=AAA\nS2=BBB\nS1=CCC\n";
        match read_strings(src.as_bytes()) {
            Err(InputError::DuplicateKey { key, line }) => {
                assert_eq!(key, "S1");
                assert_eq!(line, 3);
            }
            other => panic!("expected duplicate key error, got {other:?}"),
        }
    }

    #[test]
    fn too_few_strings_aborts() {
        let err = read_strings("S1=AAA\nbad line\n".as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::TooFewStrings { found: 1 }));
        let err = read_strings("".as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::TooFewStrings { found: 0 }));
    }

    #[test]
    fn missing_file_is_open_error() {
        let err = read_input("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, InputError::Open { .. }));
    }
}
