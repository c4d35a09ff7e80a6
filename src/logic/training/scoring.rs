//! Attempt scoring for training drills.
//!
//! Deliberately generous: the drills teach, they do not gatekeep. The
//! dominant signal is how many detected identifiers the rewrite removed;
//! length preservation is a secondary clarity heuristic.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Base points awarded for any attempt at a drill with detectable PII.
const ATTEMPT_BASE_SCORE: f64 = 40.0;

/// Points scaled by the fraction of identifiers removed.
const REDUCTION_SCALE: f64 = 60.0;

/// Bonus for removing at least half the identifiers.
const HALF_REMOVED_BONUS: f64 = 15.0;

/// Bonus for removing any identifier at all.
const ANY_REMOVED_BONUS: f64 = 10.0;

const TOTAL_WEIGHT_REDUCTION: f64 = 0.5;
const TOTAL_WEIGHT_CLARITY: f64 = 0.3;
const TOTAL_WEIGHT_STYLE: f64 = 0.2;

// ============================================================================
// TYPES
// ============================================================================

/// Scored outcome of one drill attempt, all components 0-100 with one
/// decimal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptScore {
    pub total_score: f64,
    pub pii_reduction_score: f64,
    pub clarity_score: f64,
    pub style_score: f64,
    pub feedback: Vec<String>,
}

// ============================================================================
// SCORING
// ============================================================================

/// Score a rewrite attempt given the identifier counts the detector found
/// in the original and the rewritten text.
pub fn score_attempt(
    original_text: &str,
    user_text: &str,
    original_count: usize,
    user_count: usize,
) -> AttemptScore {
    let pii_reduction_score = reduction_score(original_count, user_count);
    let length_ratio = length_ratio(original_text, user_text);
    let clarity_score = clarity_from_ratio(length_ratio);
    let style_score = (pii_reduction_score + clarity_score) / 2.0;
    let total_score = pii_reduction_score * TOTAL_WEIGHT_REDUCTION
        + clarity_score * TOTAL_WEIGHT_CLARITY
        + style_score * TOTAL_WEIGHT_STYLE;

    let mut feedback = Vec::new();
    if user_count == 0 {
        feedback.push(
            "\u{2713} Perfect! Your rewrite removes all detected personal identifiers.".to_string(),
        );
    } else if user_count < original_count {
        let removed = original_count - user_count;
        feedback.push(format!(
            "Good effort! You removed {} of {} sensitive details.",
            removed, original_count
        ));
        feedback.push(format!(
            "Try to remove the remaining {} PII element(s) for a better score.",
            user_count
        ));
    } else {
        feedback.push(
            "Your rewrite still exposes similar levels of PII. Try generalizing more.".to_string(),
        );
    }

    if !(0.6..=1.4).contains(&length_ratio) {
        feedback.push("Tip: Keep the rewrite roughly the same length as the original.".to_string());
    }

    if pii_reduction_score < 50.0 {
        feedback.push(
            "Focus on removing names, addresses, ID numbers, phone numbers, and exact dates."
                .to_string(),
        );
    }

    AttemptScore {
        total_score: round1(total_score),
        pii_reduction_score: round1(pii_reduction_score),
        clarity_score: round1(clarity_score),
        style_score: round1(style_score),
        feedback,
    }
}

fn reduction_score(original_count: usize, user_count: usize) -> f64 {
    if original_count == 0 {
        return if user_count == 0 { 100.0 } else { 60.0 };
    }

    let reduction = original_count.saturating_sub(user_count);
    let mut score =
        ATTEMPT_BASE_SCORE + (reduction as f64 / original_count as f64) * REDUCTION_SCALE;

    if reduction as f64 >= original_count as f64 / 2.0 {
        score = (score + HALF_REMOVED_BONUS).min(100.0);
    } else if reduction > 0 {
        score = (score + ANY_REMOVED_BONUS).min(100.0);
    }
    score
}

fn length_ratio(original_text: &str, user_text: &str) -> f64 {
    let original_chars = original_text.chars().count();
    if original_chars == 0 {
        return 1.0;
    }
    user_text.chars().count() as f64 / original_chars as f64
}

fn clarity_from_ratio(length_ratio: f64) -> f64 {
    if (0.6..=1.4).contains(&length_ratio) {
        90.0
    } else if (0.4..=1.8).contains(&length_ratio) {
        70.0
    } else {
        50.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_identifiers_removed_scores_top_marks() {
        let original = "a".repeat(100);
        let user = "b".repeat(100);
        let score = score_attempt(&original, &user, 3, 0);

        // 40 base + 60 full reduction + 15 half bonus, capped at 100
        assert_eq!(score.pii_reduction_score, 100.0);
        assert_eq!(score.clarity_score, 90.0);
        assert_eq!(score.style_score, 95.0);
        assert_eq!(score.total_score, 96.0);
        assert_eq!(score.feedback.len(), 1);
        assert!(score.feedback[0].contains("Perfect!"));
    }

    #[test]
    fn test_partial_removal_gets_remaining_hint() {
        let original = "a".repeat(100);
        let user = "b".repeat(100);
        let score = score_attempt(&original, &user, 3, 1);

        // 40 + 40 + 15 (two of three is at least half)
        assert_eq!(score.pii_reduction_score, 95.0);
        assert_eq!(score.total_score, 93.0);
        assert!(score.feedback[0].contains("You removed 2 of 3"));
        assert!(score.feedback[1].contains("remaining 1 PII element(s)"));
    }

    #[test]
    fn test_no_removal_triggers_focus_advice() {
        let original = "a".repeat(100);
        let user = "b".repeat(100);
        let score = score_attempt(&original, &user, 3, 3);

        assert_eq!(score.pii_reduction_score, 40.0);
        assert_eq!(score.style_score, 65.0);
        assert_eq!(score.total_score, 60.0);
        assert!(score.feedback[0].contains("similar levels of PII"));
        assert!(score.feedback[1].contains("Focus on removing names"));
    }

    #[test]
    fn test_exactly_half_removed_earns_big_bonus() {
        let original = "a".repeat(100);
        let user = "b".repeat(100);
        let score = score_attempt(&original, &user, 4, 2);

        // 40 + 30 + 15
        assert_eq!(score.pii_reduction_score, 85.0);
    }

    #[test]
    fn test_small_removal_earns_small_bonus() {
        let original = "a".repeat(100);
        let user = "b".repeat(100);
        let score = score_attempt(&original, &user, 5, 4);

        // 40 + 12 + 10
        assert_eq!(score.pii_reduction_score, 62.0);
        assert_eq!(score.total_score, 73.2);
    }

    #[test]
    fn test_clean_original_rewards_clean_rewrite() {
        let score = score_attempt("nothing sensitive here", "still nothing", 0, 0);
        assert_eq!(score.pii_reduction_score, 100.0);

        let worse = score_attempt("nothing sensitive here", "now with leaks", 0, 2);
        assert_eq!(worse.pii_reduction_score, 60.0);
    }

    #[test]
    fn test_added_identifiers_do_not_underflow() {
        let original = "a".repeat(100);
        let user = "b".repeat(100);
        let score = score_attempt(&original, &user, 2, 5);
        assert_eq!(score.pii_reduction_score, 40.0);
    }

    #[test]
    fn test_length_bands() {
        let original = "a".repeat(100);

        let short = score_attempt(&original, &"b".repeat(50), 1, 0);
        assert_eq!(short.clarity_score, 70.0);
        assert!(short.feedback.iter().any(|f| f.contains("same length")));

        let tiny = score_attempt(&original, &"b".repeat(30), 1, 0);
        assert_eq!(tiny.clarity_score, 50.0);

        let matched = score_attempt(&original, &"b".repeat(120), 1, 0);
        assert_eq!(matched.clarity_score, 90.0);
        assert!(!matched.feedback.iter().any(|f| f.contains("same length")));
    }

    #[test]
    fn test_empty_original_treated_as_matched_length() {
        let score = score_attempt("", "whatever length", 0, 0);
        assert_eq!(score.clarity_score, 90.0);
    }
}
