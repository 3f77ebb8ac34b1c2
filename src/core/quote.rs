//! Escaping text for use inside a pattern

use super::regexp::PosixRegexp;

/// Escape `text` so that it matches itself literally.
///
/// Metacharacters get a backslash; whitespace control characters are
/// written as their escape sequences.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        match c {
            '[' | ']' | '{' | '}' | '(' | ')' | '|' | '-' | '*' | '.' | '\\' | '?' | '+'
            | '^' | '$' | '#' => {
                out.push('\\');
                out.push(c);
            }
            ' ' => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '\x0b' => out.push_str("\\v"),
            _ => out.push(c),
        }
    }
    out
}

/// Same as [`quote`].
pub fn escape(text: &str) -> String {
    quote(text)
}

/// Quote the source of an existing pattern.
pub fn quote_pattern(pattern: &PosixRegexp) -> String {
    quote(pattern.source())
}
