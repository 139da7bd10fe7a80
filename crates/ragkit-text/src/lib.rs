//! Word-frequency analysis for plain-text files.
//!
//! The pipeline is strictly linear: read, clean, tokenize, drop stop
//! words, count, write JSON.
//!
//! # Main types
//!
//! - [`TextCleaner`] — Removes URLs, e-mail addresses and punctuation.
//! - [`StopWords`] — The set of words excluded from counting.
//! - [`WordFrequencies`] — Insertion-ordered token counts.
//! - [`TextProcessor`] — Runs the whole pipeline from file to file.

/// URL, e-mail and punctuation removal.
pub mod cleaner;
/// Token frequency map.
pub mod frequencies;
/// File-to-file processing pipeline.
pub mod processor;
/// Stop-word sets.
pub mod stopwords;

pub use cleaner::{tokenize, TextCleaner};
pub use frequencies::{count_frequencies, WordFrequencies};
pub use processor::TextProcessor;
pub use stopwords::StopWords;
