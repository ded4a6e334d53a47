//! # Filter Naming Rules
//!
//! A descriptor carries the upstream filter name (for example
//! `MedianImageFilter`). Every generated identifier, file name and heading is
//! derived from it by the functions here.

/// Prefix of every generated filter name.
pub const FILTER_NAME_PREFIX: &str = "ITK";

/// Generated filter name: `ITK` + raw name with every `Filter` removed.
///
/// `MedianImageFilter` becomes `ITKMedianImage`.
pub fn filter_name(raw: &str) -> String {
    format!("{FILTER_NAME_PREFIX}{}", raw.replace("Filter", ""))
}

/// Human-readable name with a space before every interior capital.
///
/// `MedianImageFilter` becomes `Median Image Filter`.
pub fn expanded_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Markdown heading underline matching the generated filter name length.
pub fn markdown_underline(filter_name: &str) -> String {
    "=".repeat(filter_name.chars().count())
}

/// Upstream header providing the filter class.
pub fn itk_header(raw: &str) -> String {
    format!("itk{raw}.h")
}

/// Name of the generated test function for one test case, including the
/// call parentheses.
pub fn test_function_name(raw: &str, tag: &str) -> String {
    format!("Test{}{tag}Test()", filter_name(raw))
}

/// Collapse doubled back-ticks and doubled single quotes into `'`.
pub fn clean_description(text: &str) -> String {
    text.replace("``", "'").replace("''", "'")
}
