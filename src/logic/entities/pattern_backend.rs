//! Primary recognizer: curated regex patterns with context boosting
//!
//! Walks the pattern table in priority order. A match is dropped when it
//! overlaps an already accepted span, so the most specific pattern wins
//! (a full phone number suppresses the shorter local form inside it).

use super::patterns::{all_patterns, CONTEXT_BOOST, CONTEXT_WINDOW};
use super::types::{labels, RecognizedSpan, Recognizer, RecognizerError};

pub struct PatternRecognizer;

impl PatternRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for PatternRecognizer {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>, RecognizerError> {
        let mut accepted: Vec<RecognizedSpan> = Vec::new();

        for pattern in all_patterns() {
            let re = match pattern.regex.as_ref() {
                Some(re) => re,
                None => continue,
            };
            for m in re.find_iter(text) {
                if pattern.label == labels::CREDIT_CARD && !luhn_valid(m.as_str()) {
                    continue;
                }
                if overlaps_any(&accepted, m.start(), m.end()) {
                    continue;
                }
                let mut confidence = pattern.base_confidence;
                if has_context(text, m.start(), m.end(), pattern.context_words) {
                    confidence = (confidence + CONTEXT_BOOST).min(1.0);
                }
                accepted.push(RecognizedSpan {
                    label: pattern.label.to_string(),
                    start: m.start(),
                    end: m.end(),
                    confidence,
                });
            }
        }

        Ok(accepted)
    }
}

fn overlaps_any(accepted: &[RecognizedSpan], start: usize, end: usize) -> bool {
    accepted.iter().any(|s| start < s.end && s.start < end)
}

/// Lowercased window around the match, clamped to char boundaries
fn context_window(text: &str, start: usize, end: usize) -> String {
    let mut lo = start.saturating_sub(CONTEXT_WINDOW);
    while lo > 0 && !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + CONTEXT_WINDOW).min(text.len());
    while hi < text.len() && !text.is_char_boundary(hi) {
        hi += 1;
    }
    text[lo..hi].to_lowercase()
}

fn has_context(text: &str, start: usize, end: usize, words: &[&str]) -> bool {
    if words.is_empty() {
        return false;
    }
    let window = context_window(text, start, end);
    words.iter().any(|word| window.contains(word))
}

/// Luhn checksum over the digits of a candidate card number
fn luhn_valid(raw: &str) -> bool {
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }
    let mut sum = 0u32;
    for (i, d) in digits.iter().rev().enumerate() {
        let mut d = *d;
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    sum % 10 == 0
}

// ============================================================================
// TESTS
// ============================================================================
