//! Extractive summarization.
//!
//! Produces a summary by selecting existing sentences rather than
//! generating new text: markup is stripped, the text is segmented into
//! sentences, each sentence is scored by the normalized frequency of the
//! words it contains (stopwords excluded), and the top N sentences are
//! returned in original document order for readability.

use std::collections::HashMap;

use regex::Regex;

/// Common English words excluded from frequency scoring.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "had", "has", "have", "he", "her", "his",
    "i", "if", "in", "into", "is", "it", "its", "not", "of", "on", "or", "she", "that", "the", "their", "them",
    "they", "this", "to", "was", "we", "were", "which", "will", "with", "you",
];

/// Extracts the `sentence_count` most representative sentences.
///
/// Accepts plain text or HTML; any markup is stripped first. Deterministic
/// for a fixed input, never fails on well-formed text, and returns an empty
/// sequence for empty input.
///
/// # Example
///
/// ```rust
/// use legenda_core::summarize::summarize;
///
/// let sentences = summarize("<p>Rust is fast. Rust is safe. The weather is nice.</p>", 2);
/// assert_eq!(sentences.len(), 2);
/// ```
pub fn summarize(input: &str, sentence_count: usize) -> Vec<String> {
    let text = strip_tags(input);
    let sentences = split_sentences(&text);
    if sentences.is_empty() || sentence_count == 0 {
        return Vec::new();
    }
    if sentences.len() <= sentence_count {
        return sentences;
    }

    let frequencies = word_frequencies(&text);

    let mut ranked: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| (index, sentence_score(sentence, &frequencies)))
        .collect();

    // Stable by construction: ties keep earlier sentences first.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(sentence_count);
    ranked.sort_by_key(|(index, _)| *index);

    ranked.into_iter().map(|(index, _)| sentences[index].clone()).collect()
}

/// Removes markup the way the summary endpoint always has: a single pass
/// over anything shaped like a tag.
fn strip_tags(input: &str) -> String {
    let tags = Regex::new(r"</?[^>]+>").expect("static regex");
    tags.replace_all(input, " ").to_string()
}

/// Splits text into sentences on terminal punctuation.
fn split_sentences(text: &str) -> Vec<String> {
    let boundary = Regex::new(r"[^.!?]*[.!?]+|[^.!?]+$").expect("static regex");

    boundary
        .find_iter(text)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| s.chars().any(|c| c.is_alphanumeric()))
        .collect()
}

/// Word frequencies normalized by the most frequent word.
fn word_frequencies(text: &str) -> HashMap<String, f64> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in tokenize(text) {
        *counts.entry(word).or_insert(0) += 1;
    }

    let max = counts.values().copied().max().unwrap_or(1) as f64;
    counts.into_iter().map(|(word, count)| (word, count as f64 / max)).collect()
}

/// Average normalized frequency of a sentence's words.
///
/// Averaging rather than summing keeps long sentences from winning on
/// length alone.
fn sentence_score(sentence: &str, frequencies: &HashMap<String, f64>) -> f64 {
    let words: Vec<String> = tokenize(sentence).collect();
    if words.is_empty() {
        return 0.0;
    }

    let total: f64 = words.iter().filter_map(|w| frequencies.get(w)).sum();
    total / words.len() as f64
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| w.len() > 1 && !STOPWORDS.contains(&w.as_str()))
}
