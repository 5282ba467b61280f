//! Optional decision input read from stdin.
//!
//! The workflow accepts an optional JSON document on stdin; interactive runs
//! (stdin is a TTY) and empty pipes are treated as "no input". Whether the
//! text actually parses as JSON is decided later by the submit stage, which
//! degrades gracefully instead of failing.

use anyhow::{Context, Result};
use std::io::{self, IsTerminal, Read};

/// Read raw input text from stdin, if any was piped in.
pub fn read_stdin_input() -> Result<Option<String>> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut raw = String::new();
    stdin
        .read_to_string(&mut raw)
        .context("read input from stdin")?;
    Ok(normalize_input(raw))
}

fn normalize_input(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_absent() {
        assert_eq!(normalize_input(String::new()), None);
        assert_eq!(normalize_input("  \n\t ".to_string()), None);
    }

    #[test]
    fn input_is_trimmed() {
        assert_eq!(
            normalize_input("  {\"a\": 1}\n".to_string()),
            Some("{\"a\": 1}".to_string())
        );
    }
}
