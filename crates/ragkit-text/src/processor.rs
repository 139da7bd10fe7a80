use crate::cleaner::{tokenize, TextCleaner};
use crate::frequencies::{count_frequencies, WordFrequencies};
use crate::stopwords::StopWords;
use ragkit_core::RagkitResult;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Reads a text file and writes its word frequencies as JSON.
pub struct TextProcessor {
    cleaner: TextCleaner,
    stop_words: StopWords,
}

impl TextProcessor {
    pub fn new(stop_words: StopWords) -> RagkitResult<Self> {
        Ok(Self {
            cleaner: TextCleaner::new()?,
            stop_words,
        })
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Clean, tokenize, drop stop words and count, all in memory.
    pub fn analyze(&self, text: &str) -> WordFrequencies {
        let cleaned = self.cleaner.clean(text);
        let tokens = tokenize(&cleaned);
        let kept = self.stop_words.remove_from(&tokens);
        debug!(
            tokens = tokens.len(),
            kept = kept.len(),
            "Stop words removed"
        );
        count_frequencies(kept)
    }

    /// Run the full pipeline from `input` to `output`.
    pub fn process(&self, input: &Path, output: &Path) -> RagkitResult<WordFrequencies> {
        let text = std::fs::read_to_string(input)?;
        info!(path = %input.display(), bytes = text.len(), "Read input");

        let counts = self.analyze(&text);
        write_json(&counts, output)?;

        info!(
            path = %output.display(),
            distinct = counts.len(),
            total = counts.total(),
            "Word frequencies written"
        );
        Ok(counts)
    }
}

/// Write as UTF-8 JSON with a 4-space indent, non-ASCII kept verbatim.
pub fn write_json(counts: &WordFrequencies, path: &Path) -> RagkitResult<()> {
    std::fs::write(path, to_json(counts)?)?;
    Ok(())
}

pub fn to_json(counts: &WordFrequencies) -> RagkitResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    counts.serialize(&mut ser)?;
    Ok(buf)
}
