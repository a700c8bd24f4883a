//! Text helpers for rendering values in diagnostics.

/// Maximum number of characters of an input value echoed into a log line.
pub const LOG_PREVIEW_CHARS: usize = 200;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Single-line, length-capped rendering of `text` for log messages.
pub fn log_preview(text: &str) -> String {
    let inline = normalize_inline_whitespace(text);
    match inline.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &inline[..cut]),
        None => inline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_inline_whitespace_collapses_runs() {
        let input = "Alpha\n\n  Beta\tGamma";
        assert_eq!(normalize_inline_whitespace(input), "Alpha Beta Gamma");
    }

    #[test]
    fn log_preview_stays_on_one_line() {
        assert_eq!(log_preview("  first line\nsecond  "), "first line second");
    }

    #[test]
    fn log_preview_truncates_long_values() {
        let long = "x".repeat(LOG_PREVIEW_CHARS + 50);
        let preview = log_preview(&long);
        assert_eq!(preview.len(), LOG_PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
        assert_eq!(log_preview(&"y".repeat(LOG_PREVIEW_CHARS)).len(), LOG_PREVIEW_CHARS);
    }
}
