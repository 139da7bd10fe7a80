use ragkit_core::{RagkitError, RagkitResult};
use regex::Regex;

const URL_PATTERN: &str = r"https?://\S+|www\.\S+";
const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b";
/// Anything that is neither a word character nor whitespace, plus
/// combining marks and zero-width (non-)joiners. U+001C..U+001F count as
/// whitespace and survive cleaning.
const PUNCTUATION_PATTERN: &str = r"[^\w\s\x{1C}-\x{1F}]|[\p{M}\x{200C}\x{200D}]";

/// Strips URL-like and e-mail-like substrings, then punctuation.
///
/// URLs are removed before e-mail addresses, and both before punctuation.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    url: Regex,
    email: Regex,
    punctuation: Regex,
}

impl TextCleaner {
    pub fn new() -> RagkitResult<Self> {
        Ok(Self {
            url: compile(URL_PATTERN)?,
            email: compile(EMAIL_PATTERN)?,
            punctuation: compile(PUNCTUATION_PATTERN)?,
        })
    }

    pub fn clean(&self, text: &str) -> String {
        let text = self.url.replace_all(text, "");
        let text = self.email.replace_all(&text, "");
        self.punctuation.replace_all(&text, "").into_owned()
    }
}

fn compile(pattern: &str) -> RagkitResult<Regex> {
    Regex::new(pattern).map_err(|e| RagkitError::Text(format!("invalid pattern {pattern}: {e}")))
}

/// Split cleaned text on Unicode whitespace and the U+001C..U+001F
/// information separators.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(is_separator).filter(|t| !t.is_empty()).collect()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn clean(text: &str) -> String {
        TextCleaner::new().unwrap().clean(text)
    }

    #[test]
    fn test_removes_url() {
        assert_eq!(tokenize(&clean("visit http://x.com now")), vec!["visit", "now"]);
        assert_eq!(tokenize(&clean("see https://a.b/c?d=1 and www.site.org")), vec!["see", "and"]);
    }

    #[test]
    fn test_removes_email() {
        assert_eq!(tokenize(&clean("mail me at jane.doe@example.com today")), vec!["mail", "me", "at", "today"]);
    }

    #[test]
    fn test_strips_punctuation_but_keeps_underscore_and_digits() {
        assert_eq!(clean("Hello, world! snake_case 42."), "Hello world snake_case 42");
    }

    #[test]
    fn test_keeps_non_latin_words() {
        // Persian comma and question mark are punctuation, letters are not.
        assert_eq!(tokenize(&clean("سلام، دنیا؟")), vec!["سلام", "دنیا"]);
    }

    #[test]
    fn test_strips_zero_width_joiners_and_marks() {
        assert_eq!(clean("می\u{200c}شود"), "میشود");
        assert_eq!(clean("کتابِ"), "کتاب");
        assert_eq!(clean("a\u{200d}b e\u{301}"), "ab e");
    }

    #[test]
    fn test_information_separators_split_tokens() {
        assert_eq!(clean("a\x1cb"), "a\x1cb");
        assert_eq!(tokenize(&clean("a\x1cb\x1fc")), vec!["a", "b", "c"]);
        assert_eq!(tokenize(" x \u{3000}y\n"), vec!["x", "y"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean(""), "");
        assert!(tokenize("   \n\t ").is_empty());
    }
}
