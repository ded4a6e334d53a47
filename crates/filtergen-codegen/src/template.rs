//! # Template Engine
//!
//! Replaces `${name}` placeholders with token text in a single left-to-right
//! pass. Substituted text is never scanned again, and placeholders with no
//! token are left exactly as written. Lines without a placeholder come back
//! unchanged.

use crate::tokens::TokenMap;

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Render one line.
///
/// A `${` that does not open a known token is copied as-is and scanning
/// resumes right after it, so it never hides a placeholder further on.
pub fn render_line(line: &str, tokens: &TokenMap) -> String {
    if !line.contains(OPEN) {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let known = after
            .find(CLOSE)
            .and_then(|end| tokens.get(&after[..end]).map(|text| (end, text)));
        match known {
            Some((end, text)) => {
                out.push_str(text);
                rest = &after[end + CLOSE.len_utf8()..];
            }
            None => {
                out.push_str(OPEN);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render a sequence of lines.
pub fn render<'a, I>(lines: I, tokens: &TokenMap) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().map(|line| render_line(line, tokens)).collect()
}

/// Render a whole template, keeping its line endings.
pub fn render_text(template: &str, tokens: &TokenMap) -> String {
    render(template.split_inclusive('\n'), tokens).concat()
}
