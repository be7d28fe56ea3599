//! Escaping for user-supplied text embedded in generated scripts.
//!
//! Every keyword and content string a user types ends up inside a
//! single-quoted string literal (and sometimes a `new RegExp(...)` argument)
//! in the generated code. These functions keep that embedding from breaking
//! out of the literal, which would let form content inject arbitrary code
//! into the produced script.

/// Escape a string for safe inclusion inside a single-quoted literal in
/// generated script code.
///
/// Escapes everything a JSON-style double-quoted literal would escape
/// (quotes, backslashes, control characters), plus literal apostrophes for
/// single-quote safety, plus the U+2028/U+2029 line separators which are
/// line terminators in older script parsers.
///
/// Total function: empty input yields empty output.
pub fn escape_for_script_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Escape regex metacharacters so the string matches itself literally when
/// used inside a generated regular expression.
///
/// Total function: empty input yields empty output.
pub fn escape_for_regex_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '.' | '*' | '+' | '?' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '[' | ']'
            | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Render a string as a complete single-quoted script literal, escaping
/// included.
pub fn js_quote(s: &str) -> String {
    format!("'{}'", escape_for_script_literal(s))
}
