//! Small text helpers shared by the analyzer and CLI output.

/// Truncate `s` to at most `max` characters, appending `...` when cut.
/// Char-boundary safe, unlike byte slicing.
pub fn preview(s: &str, max: usize) -> String {
    let mut out: String = s.chars().take(max).collect();
    if s.chars().count() > max {
        out.push_str("...");
    }
    out
}
