//! Text helpers shared by the scoring and extraction code paths.

use std::collections::HashSet;

/// Words carrying no signal in prompt/summary overlap scoring.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "do", "for", "from", "get", "have",
    "how", "i", "in", "is", "it", "me", "my", "of", "on", "or", "set", "that", "the", "this",
    "to", "use", "using", "want", "what", "with", "you",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Tokenize a prompt: lowercase, split on whitespace, `-`, and `_`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Tokenize into a set, for overlap scoring.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Token set minus stop words.
pub fn meaningful_token_set(text: &str) -> HashSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|w| !is_stop_word(w))
        .collect()
}

/// Largest byte index `<= max` that sits on a char boundary.
fn floor_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Truncate to at most `max_chars` bytes, respecting UTF-8 boundaries.
pub fn clip(s: &str, max_chars: usize) -> &str {
    &s[..floor_boundary(s, max_chars)]
}

/// Truncate with a trailing ellipsis when anything was cut.
pub fn clip_ellipsis(s: &str, max_chars: usize) -> String {
    if s.len() <= max_chars {
        return s.to_owned();
    }
    format!("{}...", clip(s, max_chars))
}

/// Format an integer with `,` thousands separators.
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_dashes_and_underscores() {
        let tokens = tokenize("Build a bun-sqlite API_server");
        assert_eq!(tokens, vec!["build", "a", "bun", "sqlite", "api", "server"]);
    }

    #[test]
    fn tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  - _ ").is_empty());
    }

    #[test]
    fn meaningful_tokens_drop_stop_words() {
        let tokens = meaningful_token_set("how to use the hooks");
        assert!(tokens.contains("hooks"));
        assert!(!tokens.contains("the"));
        assert!(!tokens.contains("use"));
    }

    #[test]
    fn clip_respects_utf8() {
        // "é" is two bytes; clipping mid-char backs off.
        let s = "héllo";
        let clipped = clip(s, 2);
        assert_eq!(clipped, "h");
    }

    #[test]
    fn clip_short_is_identity() {
        assert_eq!(clip("abc", 10), "abc");
    }

    #[test]
    fn clip_ellipsis_marks_cut() {
        assert_eq!(clip_ellipsis("abcdef", 3), "abc...");
        assert_eq!(clip_ellipsis("abc", 3), "abc");
    }

    #[test]
    fn thousands_formatting() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(60_000), "60,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }
}
