use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Token counts, kept in order of first occurrence.
///
/// Serializes as a flat JSON object `{token: count}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencies {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl WordFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }

    pub fn get(&self, token: &str) -> Option<u64> {
        self.index.get(token).map(|&pos| self.entries[pos].1)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens counted.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// The `n` most frequent tokens. Ties keep first-occurrence order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        // sort_by is stable, so equal counts stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl Serialize for WordFrequencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (token, count) in &self.entries {
            map.serialize_entry(token, count)?;
        }
        map.end()
    }
}

/// Count how many times each token occurs.
pub fn count_frequencies<'a, I>(tokens: I) -> WordFrequencies
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = WordFrequencies::new();
    for token in tokens {
        counts.add(token);
    }
    counts
}
