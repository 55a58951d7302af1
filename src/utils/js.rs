//! Helpers for embedding values into generated JavaScript text.

use serde_json::Value;

/// Render `s` as a double-quoted JavaScript string literal.
pub fn string_literal(s: &str) -> String {
    // JSON string syntax is valid JavaScript string syntax.
    Value::String(s.to_string()).to_string()
}

/// Render `s` as a single-quoted JavaScript string literal, the style used for import specifiers.
pub fn single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// Make `s` safe to place on a single `//` comment line.
pub fn line_comment(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

/// Make `s` safe to place on a line inside a `/** ... */` block.
pub fn block_comment(s: &str) -> String {
    line_comment(s).replace("*/", "*\\/")
}
