//! # Generated-File Marker
//!
//! The first line of every generated file. Its presence is the only thing
//! that makes an existing file safe to overwrite.

/// Sentinel first line of generated files.
pub const GENERATED_FILE_MARKER: &str = "// File automatically generated";

/// Whether file content starts with the marker line.
pub fn is_generated(content: &str) -> bool {
    let first = content.lines().next().unwrap_or("");
    first.trim_end_matches('\r') == GENERATED_FILE_MARKER
}

/// Prepend the marker unless the content already starts with it.
pub fn ensure_marker(content: String) -> String {
    if is_generated(&content) {
        content
    } else {
        format!("{GENERATED_FILE_MARKER}\n{content}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_marker_on_first_line_only() {
        assert!(is_generated("// File automatically generated\nint x;\n"));
        assert!(is_generated("// File automatically generated\r\n"));
        assert!(!is_generated("int x;\n// File automatically generated\n"));
        assert!(!is_generated(""));
        assert!(!is_generated("// File automatically generated by hand\n"));
    }

    #[test]
    fn ensure_marker_is_idempotent() {
        let once = ensure_marker("body\n".to_string());
        assert_eq!(once, "// File automatically generated\nbody\n");
        assert_eq!(ensure_marker(once.clone()), once);
    }
}
