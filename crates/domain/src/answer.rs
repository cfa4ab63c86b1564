//! Makes generated text safe to ship inside TXT character-strings.

const TRUNCATION_MARKER: &str = "...";
const TRUNCATION_RESERVE: usize = 10;

const PUNCTUATION_MAP: &[(char, &str)] = &[
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2014}', "--"),
    ('\u{2013}', "-"),
    ('\u{2026}', "..."),
];

/// Replace typographic punctuation with ASCII and cap the result at
/// `max_chars` characters (0 means unbounded).
///
/// Over-long text is cut to `max_chars - 10` characters, trailing
/// whitespace removed and `...` appended.
pub fn sanitize_answer(text: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match PUNCTUATION_MAP.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => out.push_str(to),
            None => out.push(ch),
        }
    }

    if max_chars == 0 || out.chars().count() <= max_chars {
        return out;
    }

    if max_chars <= TRUNCATION_MARKER.len() {
        return TRUNCATION_MARKER[..max_chars].to_string();
    }

    let keep = max_chars.saturating_sub(TRUNCATION_RESERVE);
    let cut = out
        .char_indices()
        .nth(keep)
        .map(|(idx, _)| idx)
        .unwrap_or(out.len());
    out.truncate(cut);
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out.push_str(TRUNCATION_MARKER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsis_character_expands() {
        assert_eq!(sanitize_answer("wait\u{2026}", 0), "wait...");
    }

    #[test]
    fn test_exact_limit_is_not_truncated() {
        let text = "x".repeat(50);
        assert_eq!(sanitize_answer(&text, 50), text);
    }

    #[test]
    fn test_truncation_strips_trailing_whitespace() {
        // 40 kept chars end in spaces
        let text = format!("{}{}{}", "a".repeat(35), " ".repeat(5), "b".repeat(30));
        let out = sanitize_answer(&text, 50);
        assert_eq!(out, format!("{}...", "a".repeat(35)));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "\u{e9}".repeat(60);
        let out = sanitize_answer(&text, 50);
        assert_eq!(out.chars().count(), 43);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_tiny_limit_still_bounded() {
        let text = "abcdefghijklmnop";
        assert_eq!(sanitize_answer(text, 2), "..");
        assert_eq!(sanitize_answer(text, 5), "...");
    }

    #[test]
    fn test_limit_applies_after_substitution() {
        // 9 em dashes become 18 ASCII characters
        let text = "\u{2014}".repeat(9);
        let out = sanitize_answer(&text, 15);
        assert!(out.chars().count() <= 15);
    }
}
