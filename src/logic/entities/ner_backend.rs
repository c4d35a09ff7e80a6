//! Supplementary recognizer: lexical NER
//!
//! Lightweight stand-in for a statistical tagger. Capitalized runs are
//! only labeled when anchored by a cue word, an honorific, or an
//! organization marker, plus month-name dates. Precision over recall:
//! anything ambiguous is skipped, so plain prose yields nothing.

use super::types::{labels, RecognizedSpan, Recognizer, RecognizerError};

// ============================================================================
// LEXICONS
// ============================================================================

/// Word right before a run that marks it as a name
const PERSON_CUES: &[&str] = &[
    "i'm", "i\u{2019}m", "im", "am", "name", "named", "meet", "son", "daughter", "wife",
    "husband", "friend", "brother", "sister", "mother", "father",
];

/// Word right before a run that marks it as a place
const LOCATION_CUES: &[&str] = &["from", "in", "at", "near", "to", "visiting"];

const HONORIFICS: &[&str] = &["mr", "mrs", "ms", "dr", "doctor", "prof"];

/// A run containing one of these is an organization
const ORG_SUFFIXES: &[&str] = &[
    "inc", "llc", "ltd", "corp", "corporation", "company", "hospital", "university",
    "college", "school", "bank", "clinic", "institute", "airlines", "airport",
];

/// Single-token runs matching these are organizations without any cue
const KNOWN_ORGS: &[&str] = &["google", "microsoft", "amazon", "facebook", "apple", "netflix"];

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
    "sep", "sept", "oct", "nov", "dec",
];

/// Months that are dates even without a day number ("may" stays out, it
/// is usually the modal verb)
const UNAMBIGUOUS_MONTHS: &[&str] = &[
    "january", "february", "march", "april", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Capitalized tokens that never start an entity run
const SKIP_CAPITALIZED: &[&str] = &[
    "the", "a", "an", "i", "i'm", "i\u{2019}m", "i'll", "i've", "i'd", "my", "we", "he",
    "she", "it", "they", "this", "that", "hi", "hello", "hey", "monday", "tuesday",
    "wednesday", "thursday", "friday", "saturday", "sunday",
];

/// Nominal score; the aggregator replaces it with its fixed default
const UNCALIBRATED_CONFIDENCE: f32 = 0.5;

/// Longest entity run in tokens
const MAX_RUN_TOKENS: usize = 4;

// ============================================================================
// TOKENIZER
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        let word_char = ch.is_alphanumeric() || ch == '\'' || ch == '\u{2019}';
        if word_char {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            tokens.push(Token { text: &text[s..i], start: s, end: i });
        }
    }
    if let Some(s) = start {
        tokens.push(Token { text: &text[s..], start: s, end: text.len() });
    }
    tokens
}

// ============================================================================
// RECOGNIZER
// ============================================================================

pub struct LexicalNerRecognizer;

impl LexicalNerRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LexicalNerRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for LexicalNerRecognizer {
    fn name(&self) -> &'static str {
        "lexical_ner"
    }

    fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>, RecognizerError> {
        let tokens = tokenize(text);
        let mut spans = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if let Some((span, consumed)) = match_date(text, &tokens, i) {
                spans.push(span);
                i += consumed;
                continue;
            }
            if is_candidate(&tokens[i]) {
                let run_len = run_length(text, &tokens, i);
                if let Some((label, start_idx, len)) = classify_run(text, &tokens, i, run_len) {
                    let first = tokens[start_idx];
                    let last = tokens[start_idx + len - 1];
                    spans.push(RecognizedSpan {
                        label: label.to_string(),
                        start: first.start,
                        end: last.end,
                        confidence: UNCALIBRATED_CONFIDENCE,
                    });
                }
                i += run_len;
                continue;
            }
            i += 1;
        }

        Ok(spans)
    }
}

// ============================================================================
// RUN DETECTION
// ============================================================================

/// First char uppercase plus at least one lowercase after it; acronyms
/// and bare initials stay out
fn is_capitalized(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.any(|c| c.is_lowercase()),
        _ => false,
    }
}

fn is_candidate(token: &Token) -> bool {
    if !is_capitalized(token.text) {
        return false;
    }
    let lower = token.text.to_lowercase();
    !SKIP_CAPITALIZED.contains(&lower.as_str()) && !MONTHS.contains(&lower.as_str())
}

/// Tokens continue a run only across plain spaces; any punctuation in the
/// gap (sentence end, comma) breaks it
fn joined_by_space(text: &str, prev: &Token, next: &Token) -> bool {
    next.start > prev.end && text[prev.end..next.start].chars().all(|c| c == ' ')
}

fn run_length(text: &str, tokens: &[Token], start: usize) -> usize {
    let mut len = 1;
    while start + len < tokens.len() && len < MAX_RUN_TOKENS {
        let prev = &tokens[start + len - 1];
        let next = &tokens[start + len];
        if !is_candidate(next) || !joined_by_space(text, prev, next) {
            break;
        }
        len += 1;
    }
    len
}

/// Decide what a capitalized run is, or None to skip it.
/// Returns (label, first token index, token count) so an honorific can be
/// stripped from the reported span.
fn classify_run(
    text: &str,
    tokens: &[Token],
    i: usize,
    run_len: usize,
) -> Option<(&'static str, usize, usize)> {
    let lowers: Vec<String> = tokens[i..i + run_len]
        .iter()
        .map(|t| t.text.to_lowercase())
        .collect();

    // "Doctor Priya Sharma": honorific inside the run
    if HONORIFICS.contains(&lowers[0].as_str()) {
        if run_len >= 2 {
            return Some((labels::PERSON, i + 1, run_len - 1));
        }
        // Lone "Dr" before a period; the name after it gets its own run
        return None;
    }

    // "Dr. Smith": abbreviated honorific before the run
    if i > 0 {
        let prev = &tokens[i - 1];
        let gap = &text[prev.end..tokens[i].start];
        if gap.chars().all(|c| c == ' ' || c == '.')
            && HONORIFICS.contains(&prev.text.to_lowercase().as_str())
        {
            return Some((labels::PERSON, i, run_len));
        }
    }

    if lowers.iter().any(|w| ORG_SUFFIXES.contains(&w.as_str()))
        || (run_len == 1 && KNOWN_ORGS.contains(&lowers[0].as_str()))
    {
        return Some((labels::ORG, i, run_len));
    }

    // Cue word immediately before the run, same sentence
    if i > 0 && joined_by_space(text, &tokens[i - 1], &tokens[i]) {
        let mut cue_idx = i - 1;
        let mut cue = tokens[cue_idx].text.to_lowercase();
        // "name is John": step over a linking verb to the real cue
        if (cue == "is" || cue == "was")
            && cue_idx > 0
            && joined_by_space(text, &tokens[cue_idx - 1], &tokens[cue_idx])
        {
            cue_idx -= 1;
            cue = tokens[cue_idx].text.to_lowercase();
        }
        if PERSON_CUES.contains(&cue.as_str()) {
            return Some((labels::PERSON, i, run_len));
        }
        if LOCATION_CUES.contains(&cue.as_str()) {
            return Some((labels::GPE, i, run_len));
        }
    }

    None
}

// ============================================================================
// DATE DETECTION
// ============================================================================

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

fn is_day_number(token: &str) -> bool {
    token.len() <= 2
        && token.chars().all(|c| c.is_ascii_digit())
        && token.parse::<u32>().map(|d| (1..=31).contains(&d)).unwrap_or(false)
}

fn is_year(token: &str) -> bool {
    token.len() == 4
        && token.chars().all(|c| c.is_ascii_digit())
        && (token.starts_with("19") || token.starts_with("20"))
}

/// Gap inside a date phrase: spaces and at most one comma
fn date_gap(text: &str, from: usize, to: usize) -> bool {
    to > from && to - from <= 2 && text[from..to].chars().all(|c| c == ' ' || c == ',')
}

/// "March 15, 2016", "Dec 15, 2024", "January 2024", bare "January".
/// Abbreviations and "May" need a following number to count.
fn match_date(text: &str, tokens: &[Token], i: usize) -> Option<(RecognizedSpan, usize)> {
    let token = &tokens[i];
    let lower = token.text.to_lowercase();
    if !MONTHS.contains(&lower.as_str()) || !starts_uppercase(token.text) {
        return None;
    }

    let mut end = token.end;
    let mut consumed = 1;
    let mut has_number = false;

    if let Some(next) = tokens.get(i + 1) {
        if is_day_number(next.text) && date_gap(text, token.end, next.start) {
            end = next.end;
            consumed = 2;
            has_number = true;
            if let Some(year) = tokens.get(i + 2) {
                if is_year(year.text) && date_gap(text, next.end, year.start) {
                    end = year.end;
                    consumed = 3;
                }
            }
        } else if is_year(next.text) && date_gap(text, token.end, next.start) {
            end = next.end;
            consumed = 2;
            has_number = true;
        }
    }

    if !has_number && !UNAMBIGUOUS_MONTHS.contains(&lower.as_str()) {
        return None;
    }

    Some((
        RecognizedSpan {
            label: labels::DATE.to_string(),
            start: token.start,
            end,
            confidence: UNCALIBRATED_CONFIDENCE,
        },
        consumed,
    ))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_of(text: &str) -> Vec<RecognizedSpan> {
        LexicalNerRecognizer::new().recognize(text).unwrap()
    }

    fn labels_of(text: &str) -> Vec<String> {
        spans_of(text).into_iter().map(|s| s.label).collect()
    }

    #[test]
    fn test_plain_prose_yields_nothing() {
        assert!(spans_of("The weather today is sunny and pleasant outside.").is_empty());
    }

    #[test]
    fn test_person_after_contraction_cue() {
        let text = "Hi! I'm Sarah from New York. Call me at 555-1234!";
        let spans = spans_of(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].label, labels::PERSON);
        assert_eq!(&text[spans[0].start..spans[0].end], "Sarah");
        assert_eq!(spans[1].label, labels::GPE);
        assert_eq!(&text[spans[1].start..spans[1].end], "New York");
    }

    #[test]
    fn test_linking_verb_between_cue_and_name() {
        let text = "My name is John Smith and that is that";
        let spans = spans_of(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, labels::PERSON);
        assert_eq!(&text[spans[0].start..spans[0].end], "John Smith");
    }

    #[test]
    fn test_sentence_start_verb_not_tagged() {
        // "Call" is capitalized but has no cue before it
        assert!(spans_of("Nice day today. Call whenever works for you.").is_empty());
    }

    #[test]
    fn test_honorific_with_period() {
        let text = "Results came from Dr. Smith yesterday";
        let spans = spans_of(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, labels::PERSON);
        assert_eq!(&text[spans[0].start..spans[0].end], "Smith");
    }

    #[test]
    fn test_honorific_inside_run() {
        let text = "Doctor Priya Sharma prescribed medication";
        let spans = spans_of(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, labels::PERSON);
        assert_eq!(&text[spans[0].start..spans[0].end], "Priya Sharma");
    }

    #[test]
    fn test_org_suffix() {
        let text = "admitted at Apollo Hospital this week";
        let spans = spans_of(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, labels::ORG);
        assert_eq!(&text[spans[0].start..spans[0].end], "Apollo Hospital");
    }

    #[test]
    fn test_relation_cue() {
        let text = "Happy birthday to my son James! He turns 8 today";
        let spans = spans_of(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, labels::PERSON);
        assert_eq!(&text[spans[0].start..spans[0].end], "James");
    }

    #[test]
    fn test_month_day_year_date() {
        let text = "born on March 15, 2016!";
        let spans = spans_of(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, labels::DATE);
        assert_eq!(&text[spans[0].start..spans[0].end], "March 15, 2016");
    }

    #[test]
    fn test_abbreviated_month_needs_number() {
        assert_eq!(labels_of("Receipt shows Dec 15, 2024 here"), vec![labels::DATE]);
        assert!(spans_of("see you in Dec sometime").is_empty());
    }

    #[test]
    fn test_bare_may_not_a_date() {
        assert!(spans_of("May we help you with this?").is_empty());
    }

    #[test]
    fn test_comma_breaks_runs() {
        // "Bengaluru" follows a comma, so "Hospital" cannot pull it in
        let text = "at Apollo Hospital, Bengaluru";
        let spans = spans_of(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "Apollo Hospital");
    }

    #[test]
    fn test_known_org_gazetteer() {
        let text = "Just applied to Google! Wish me luck";
        let spans = spans_of(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, labels::ORG);
    }

    #[test]
    fn test_acronyms_skipped() {
        assert!(spans_of("flight EK-505 to AIIMS delayed").is_empty());
    }

    #[test]
    fn test_tokenizer_offsets() {
        let tokens = tokenize("I'm Sarah!");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "I'm");
        assert_eq!(tokens[1].text, "Sarah");
        assert_eq!(tokens[1].start, 4);
        assert_eq!(tokens[1].end, 9);
    }
}
