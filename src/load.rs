use std::{fs, path::Path};

use thiserror::Error;

use crate::memory::MemError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read program file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected 8 hex digits, got `{text}`")]
    Malformed { line: usize, text: String },
    #[error("program does not fit in instruction memory: {0}")]
    Image(#[from] MemError),
}

/// Parse the hex program format: one instruction per line, exactly 8
/// hex digits, case-insensitive. Blank lines are skipped; a leading
/// `0x` and trailing `#` comments are tolerated.
pub fn parse_hex(text: &str) -> Result<Vec<u32>, LoadError> {
    let mut words = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = match raw.split_once('#') {
            Some((before, _)) => before.trim(),
            None => raw.trim(),
        };
        if line.is_empty() {
            continue;
        }

        let digits = line
            .strip_prefix("0x")
            .or_else(|| line.strip_prefix("0X"))
            .unwrap_or(line);

        let malformed = || LoadError::Malformed {
            line: idx + 1,
            text: line.to_string(),
        };
        if digits.len() != 8 {
            return Err(malformed());
        }
        words.push(u32::from_str_radix(digits, 16).map_err(|_| malformed())?);
    }

    Ok(words)
}

pub fn load_hex_file(path: &Path) -> Result<Vec<u32>, LoadError> {
    parse_hex(&fs::read_to_string(path)?)
}
