#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the ragkit-text crate: full file-to-file runs,
//! counting invariants and determinism.

use ragkit_core::RagkitError;
use ragkit_text::{tokenize, StopWords, TextCleaner, TextProcessor};
use tempfile::TempDir;

const SAMPLE: &str = "این یک متن نمونه است. برای اطلاعات بیشتر به https://example.com \
                      یا www.example.org سر بزنید یا به info@example.com ایمیل بزنید.\n\
                      متن نمونه، متن ساده!";

#[test]
fn process_writes_json_file() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("input.txt");
    let output = tmp.path().join("word_frequencies.json");
    std::fs::write(&input, SAMPLE).unwrap();

    let processor = TextProcessor::new(StopWords::persian()).unwrap();
    let counts = processor.process(&input, &output).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let obj = written.as_object().unwrap();
    assert_eq!(obj.len(), counts.len());
    assert_eq!(obj["متن"], 3);
    assert_eq!(obj["نمونه"], 2);
    assert!(!obj.contains_key("است"), "stop words must not be counted");
    assert!(obj.keys().all(|k| !k.contains("example")));
}

#[test]
fn sum_of_counts_equals_kept_tokens() {
    let stop = StopWords::persian();
    let cleaner = TextCleaner::new().unwrap();
    let cleaned = cleaner.clean(SAMPLE);
    let expected = tokenize(&cleaned)
        .into_iter()
        .filter(|t| !stop.contains(t))
        .count() as u64;

    let processor = TextProcessor::new(stop).unwrap();
    assert_eq!(processor.analyze(SAMPLE).total(), expected);
}

#[test]
fn analysis_is_deterministic() {
    let processor = TextProcessor::new(StopWords::persian()).unwrap();
    let first = processor.analyze(SAMPLE);
    let second = processor.analyze(SAMPLE);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn missing_input_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let processor = TextProcessor::new(StopWords::default()).unwrap();
    let err = processor
        .process(&tmp.path().join("nope.txt"), &tmp.path().join("out.json"))
        .unwrap_err();
    assert!(matches!(err, RagkitError::Io(_)));
}

#[test]
fn hello_world_example() {
    let processor = TextProcessor::new(StopWords::default()).unwrap();
    let counts = processor.analyze("hello hello world");
    assert_eq!(
        serde_json::to_string(&counts).unwrap(),
        r#"{"hello":2,"world":1}"#
    );
}

#[test]
fn zero_width_joiner_spellings_share_one_key() {
    let processor = TextProcessor::new(StopWords::persian()).unwrap();
    let counts = processor.analyze("می\u{200c}شود میشود کتابِ کتاب");
    assert_eq!(counts.get("میشود"), Some(2));
    assert_eq!(counts.get("کتاب"), Some(2));
    assert_eq!(counts.len(), 2);
}
