//! Text helpers shared by the aggregator and the renderers.

use std::collections::BTreeSet;

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// First sentence of `text`, including its terminating punctuation.
///
/// Falls back to the first line when no sentence terminator is found.
pub fn leading_sentence(text: &str) -> &str {
    let text = text.trim();
    let line_end = text.find('\n').unwrap_or(text.len());
    let line = &text[..line_end];

    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            match chars.peek() {
                None => return line,
                Some((_, next)) if next.is_whitespace() => return &line[..i + c.len_utf8()],
                _ => {}
            }
        }
    }
    line.trim_end()
}

/// Lower-cased alphanumeric word set used for similarity checks
pub fn word_set(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Jaccard similarity between the word sets of two strings (0.0 to 1.0)
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let a = word_set(a);
    let b = word_set(b);
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("あのね", 7), "あ...");
    }

    #[test]
    fn test_leading_sentence() {
        assert_eq!(
            leading_sentence("Costs drop by 30%. Migration takes a quarter."),
            "Costs drop by 30%."
        );
        assert_eq!(leading_sentence("Version 2.5 is stable"), "Version 2.5 is stable");
        assert_eq!(leading_sentence("First line\nSecond line"), "First line");
        assert_eq!(leading_sentence("  "), "");
    }

    #[test]
    fn test_jaccard_similarity() {
        assert_eq!(jaccard_similarity("the cost is high", "The cost is HIGH!"), 1.0);
        assert_eq!(jaccard_similarity("alpha beta", "gamma delta"), 0.0);
        let partial = jaccard_similarity("latency budget is tight", "latency budget is fine");
        assert!(partial > 0.5 && partial < 1.0);
    }
}
