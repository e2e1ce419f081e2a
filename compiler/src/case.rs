//! Identifier case conversion shared by the backends.
//!
//! Words are split the same way for every style: on any run of characters that
//! are not letters or digits, between a lowercase letter (or digit) and an
//! uppercase letter, and before the last capital of an acronym that is followed
//! by a lowercase letter (`"HTTPServer"` is `HTTP` + `Server`). Digits stick to
//! the word they follow, so `"option1"` stays a single word.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LOWER_UPPER:    Regex = Regex::new(r"([\p{Ll}\d])(\p{Lu})").unwrap();
    static ref UPPER_UPPER:    Regex = Regex::new(r"(\p{Lu})(\p{Lu}\p{Ll})").unwrap();
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^\p{L}\d]+").unwrap();
}

/// Splits an identifier into its words, keeping the original casing.
pub fn split_words(s: &str) -> Vec<String> {
    let spaced = LOWER_UPPER.replace_all(s, "$1 $2");
    let spaced = UPPER_UPPER.replace_all(&spaced, "$1 $2");

    NON_ALPHANUMERIC
        .split(&spaced)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None        => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// `"some_struct"` → `"SomeStruct"`.
pub fn pascal_case(s: &str) -> String {
    split_words(s).iter().map(|word| capitalize(word)).collect()
}

/// `"some_struct"` → `"someStruct"`.
pub fn camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, word)| if i == 0 { word.to_lowercase() } else { capitalize(word) })
        .collect()
}

/// `"sessionID"` → `"session_id"`.
pub fn snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
