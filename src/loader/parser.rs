//! CSV header parsing
//!
//! Only the header line is parsed here; the rows themselves are read by
//! DuckDB.

use super::REQUIRED_COLUMNS;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read and parse the header line of a CSV file
pub fn read_header(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::csv(format!("Failed to open '{}': {}", path.display(), e))
        }
    })?;

    let mut line = String::new();
    let read = BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| Error::csv(format!("Failed to read '{}': {}", path.display(), e)))?;

    if read == 0 || line.trim().is_empty() {
        return Err(Error::csv(format!(
            "'{}' has no header row",
            path.display()
        )));
    }

    parse_header_line(&line)
}

/// Split a header line into column names
pub fn parse_header_line(line: &str) -> Result<Vec<String>> {
    let line = line.trim_start_matches('\u{feff}').trim_end_matches(['\r', '\n']);

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                in_quotes = true;
            }
        } else if c == ',' && !in_quotes {
            fields.push(current.trim().to_string());
            current = String::new();
        } else {
            current.push(c);
        }
    }

    if in_quotes {
        return Err(Error::csv("Unterminated quote in header row"));
    }
    fields.push(current.trim().to_string());

    if let Some(pos) = fields.iter().position(String::is_empty) {
        return Err(Error::csv(format!("Header column {} is empty", pos + 1)));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = fields.iter().find(|f| !seen.insert(f.as_str())) {
        return Err(Error::csv(format!("Duplicate header column: {dup}")));
    }

    Ok(fields)
}

/// Ensure every required column is present
pub fn validate_header(columns: &[String]) -> Result<()> {
    match REQUIRED_COLUMNS
        .iter()
        .find(|required| !columns.iter().any(|c| c == *required))
    {
        Some(missing) => Err(Error::missing_column(*missing)),
        None => Ok(()),
    }
}
