//! Reading-time estimation.
//!
//! A deterministic function of word count only, using the conventional
//! 200 words-per-minute divisor. Computed once at article creation from the
//! fetched plain text and stored on the record.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Words per minute assumed for the estimate.
const WORDS_PER_MINUTE: f64 = 200.0;

/// Reading-time estimate for a piece of plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingTime {
    /// Human-readable form, e.g. "3 min read".
    pub text: String,
    /// Estimated minutes-to-read (fractional).
    pub minutes: f64,
    /// Number of words counted.
    pub words: usize,
}

/// Estimates minutes-to-read and word count for plain text.
///
/// Never fails; empty input yields zero words and zero minutes.
///
/// # Example
///
/// ```rust
/// use legenda_core::readtime::estimate_reading_time;
///
/// let estimate = estimate_reading_time("a short note");
/// assert_eq!(estimate.words, 3);
/// ```
pub fn estimate_reading_time(text: &str) -> ReadingTime {
    let words = count_words(text);
    let minutes = words as f64 / WORDS_PER_MINUTE;
    let display = (minutes.ceil() as u64).max(if words > 0 { 1 } else { 0 });

    ReadingTime { text: format!("{} min read", display), minutes, words }
}

/// Counts words on word boundaries, keeping contractions and hyphenations
/// as single words.
fn count_words(text: &str) -> usize {
    let word_regex = Regex::new(r"\b[\w'-]+\b").expect("static regex");
    word_regex.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let estimate = estimate_reading_time("");
        assert_eq!(estimate.words, 0);
        assert_eq!(estimate.minutes, 0.0);
        assert_eq!(estimate.text, "0 min read");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("hello world"), 2);
        assert_eq!(count_words("it's a two-part word"), 4);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_two_hundred_words_is_one_minute() {
        let text = "word ".repeat(200);
        let estimate = estimate_reading_time(&text);
        assert_eq!(estimate.words, 200);
        assert!((estimate.minutes - 1.0).abs() < f64::EPSILON);
        assert_eq!(estimate.text, "1 min read");
    }

    #[test]
    fn test_display_rounds_up() {
        let text = "word ".repeat(201);
        assert_eq!(estimate_reading_time(&text).text, "2 min read");
    }

    #[test]
    fn test_estimate_scales_linearly() {
        let short = estimate_reading_time(&"word ".repeat(1_000));
        let long = estimate_reading_time(&"word ".repeat(10_000));
        assert!((long.minutes / short.minutes - 10.0).abs() < 1e-9);
        assert_eq!(long.words, short.words * 10);
    }
}
