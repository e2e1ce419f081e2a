use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Whether `text` can be written as a bare identifier in the target languages.
pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text)
}

/// Quotes `text` as a JSON string literal, which TypeScript, Go and Rust all
/// accept for plain identifiers and descriptions.
pub fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// Splits a description into the lines of a doc comment. Surrounding blank
/// space is trimmed; an empty description yields no lines.
pub fn doc_lines(description: &str) -> Vec<&str> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.lines().map(str::trim_end).collect()
}
