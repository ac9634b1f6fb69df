//! Terminal output for CLI commands
//!
//! Results go to stdout as either a text rendering or pretty JSON; progress
//! lines respect `--quiet`; errors always go to stderr.

use anyhow::{Context, Result};
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render `value` in the requested format
pub fn render<T, F>(value: &T, format: OutputFormat, text: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to encode output as JSON")
        }
    }
}

/// Print `value` as pretty JSON or through the text formatter
pub fn print_formatted<T, F>(value: &T, format: OutputFormat, text: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    println!("{}", render(value, format, text)?);
    Ok(())
}

/// Progress or confirmation line, silent under `--quiet`
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Error line for the shell, which keeps running after a failed command
pub fn print_error(message: &str) {
    eprintln!("Error: {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_render_text_uses_formatter() {
        let out = render(&[1, 2, 3][..], OutputFormat::Text, |v| format!("{} items", v.len())).unwrap();
        assert_eq!(out, "3 items");
    }

    #[test]
    fn test_render_json_is_pretty() {
        let out = render(&vec!["a"], OutputFormat::Json, |_| unreachable!()).unwrap();
        assert_eq!(out, "[\n  \"a\"\n]");
    }

    #[test]
    fn test_json_encode_failure_is_an_error() {
        // JSON object keys must be strings
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), "pair");

        let err = print_formatted(&map, OutputFormat::Json, |_| String::new()).unwrap_err();
        assert!(err.to_string().contains("JSON"));
    }
}
