//! String utilities for the domain layer.

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe)
///
/// Truncation always lands on a character boundary.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// One-line preview of a model reply for log lines.
///
/// Collapses all whitespace runs (including newlines) into single spaces
/// before truncating.
pub fn preview(s: &str, max_len: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&collapsed, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // Each Devanagari letter here is 3 bytes
        let s = "नमस्ते दुनिया";
        let out = truncate(s, 10);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 10);
    }

    #[test]
    fn test_preview_collapses_lines() {
        let reply = "First line\n\n   second   line\tend";
        assert_eq!(preview(reply, 100), "First line second line end");
        assert_eq!(preview(reply, 13), "First line...");
    }
}
