use ragkit_core::RagkitResult;
use std::collections::HashSet;
use std::path::Path;

/// Common Persian function words.
pub const PERSIAN_STOP_WORDS: &[&str] = &[
    "و", "در", "به", "از", "که", "این", "را", "با", "است", "برای", "آن", "یک", "هم", "تا", "نیز",
    "اما", "یا", "بر", "اگر", "هر", "چون", "باید", "می", "شد", "کند", "کرد", "شده", "دیگر", "همه",
];

/// Words excluded from frequency analysis. Matching is exact.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// The Persian list used by default.
    pub fn persian() -> Self {
        Self::new(PERSIAN_STOP_WORDS.iter().copied())
    }

    /// Parse a word-per-line list. Blank lines and `#` comments are skipped.
    pub fn parse(list: &str) -> Self {
        Self::new(
            list.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    pub fn load(path: &Path) -> RagkitResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::parse(&data))
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drop stop words, keeping token order.
    pub fn remove_from<'a>(&self, tokens: &[&'a str]) -> Vec<&'a str> {
        tokens.iter().copied().filter(|t| !self.contains(t)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_persian_defaults() {
        let stop = StopWords::persian();
        assert_eq!(stop.len(), 29);
        assert!(stop.contains("و"));
        assert!(!stop.contains("hello"));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let stop = StopWords::parse("# english\nthe\n\n  a  \n");
        assert_eq!(stop.len(), 2);
        assert!(stop.contains("the"));
        assert!(stop.contains("a"));
    }

    #[test]
    fn test_remove_keeps_order() {
        let stop = StopWords::new(["the", "a"]);
        let kept = stop.remove_from(&["the", "cat", "a", "hat", "the"]);
        assert_eq!(kept, vec!["cat", "hat"]);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("stop.txt");
        std::fs::write(&path, "of\nand\n").unwrap();
        let stop = StopWords::load(&path).unwrap();
        assert!(stop.contains("of"));
        assert!(stop.contains("and"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(StopWords::load(Path::new("/no/such/stopwords.txt")).is_err());
    }
}
