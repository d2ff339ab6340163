//! Helpers for putting user-supplied query text into log lines.
//!
//! Queries and user ids are free text; a pasted multi-line question would otherwise
//! split one log record across several lines. Everything logged from the responder
//! goes through [`escape_log`].

use std::fmt::Write;

/// Longest query preview kept in a log line, in characters.
pub const MAX_PREVIEW: usize = 160;

/// Escape a string for single-line logging, truncated to [`MAX_PREVIEW`] characters.
///
/// - `\n`, `\r`, `\t` become `\\n`, `\\r`, `\\t`
/// - backslash and `'` are escaped so quoted previews stay unambiguous
/// - other control characters become `\xNN`
pub fn escape_log(s: &str) -> String {
    escape_log_with_limit(s, MAX_PREVIEW)
}

pub fn escape_log_with_limit(s: &str, limit: usize) -> String {
    let mut out = String::with_capacity(s.len().min(limit) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= limit {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_newlines_and_quotes() {
        let esc = escape_log("How do I\nreset my password?\t'now'");
        assert_eq!(esc, "How do I\\nreset my password?\\t\\'now\\'");
    }

    #[test]
    fn truncates_long_queries() {
        let long = "a".repeat(MAX_PREVIEW + 10);
        let esc = escape_log(&long);
        assert_eq!(esc.chars().count(), MAX_PREVIEW + 1);
        assert!(esc.ends_with('…'));
    }

    #[test]
    fn hex_escapes_other_control_chars() {
        assert_eq!(escape_log_with_limit("a\u{7}b", 10), "a\\x07b");
    }
}
