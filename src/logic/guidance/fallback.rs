//! Static guidance tier: deterministic recommendations, rewrite assembly,
//! and canned assistant strings used when no generative provider answers.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::logic::entities::PiiEntity;
use crate::logic::risk::RiskLevel;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Appended to every assistant answer that does not already carry it.
pub const ANSWER_DISCLAIMER: &str =
    "Educational use only. This response is not legal advice and may not cover your exact situation.";

/// Returned when no generative provider is configured at all.
pub const ASSISTANT_DISABLED_MESSAGE: &str = "The AI assistant feature is currently disabled because an API key has not been configured. Please set either OPENAI_API_KEY or GEMINI_API_KEY in your .env file to enable this feature.";

/// Static answer used when every generative tier fails.
pub const FALLBACK_ANSWER: &str = "Here are some general privacy practices: share personal details only with services you trust, prefer platform messaging over posting contact information publicly, review app permissions and privacy settings regularly, use strong unique passwords with two-factor authentication, and avoid posting anything that reveals your exact location or daily routine.";

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"19\d{2}|20\d{2}").unwrap());
static NEW_YORK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)New York|NYC").unwrap());
static STREET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d+\s+\w+\s+(Street|Avenue|Road|Blvd)").unwrap());

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

/// Rule-driven recommendations keyed off the detected entity types.
pub fn fallback_recommendations(entities: &[PiiEntity], risk_level: RiskLevel) -> Vec<String> {
    let entity_types: HashSet<&str> = entities.iter().map(|e| e.entity_type.as_str()).collect();
    let mut recommendations = Vec::new();

    if entity_types.contains("EMAIL_ADDRESS") || entity_types.contains("PHONE_NUMBER") {
        recommendations.push(
            "Remove or hide direct contact information. Use platform messaging instead."
                .to_string(),
        );
    }

    if entity_types.contains("PERSON") {
        recommendations
            .push("Avoid using full real names. Use initials or usernames instead.".to_string());
    }

    if entity_types.contains("LOCATION") || entity_types.contains("GPE") {
        recommendations.push(
            "Replace specific locations with general areas (e.g., 'New York' instead of full address)."
                .to_string(),
        );
    }

    if entity_types.contains("DATE") {
        recommendations.push("Generalize specific dates to protect timing information.".to_string());
    }

    if risk_level == RiskLevel::High {
        recommendations.push(
            "\u{26a0}\u{fe0f} HIGH RISK: Consider not sharing this information publicly at all."
                .to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations.push(
            "Your text appears relatively safe. Continue being mindful of personal details."
                .to_string(),
        );
    }

    recommendations
}

// ============================================================================
// REWRITE ASSEMBLY
// ============================================================================

/// Template-driven rewrite that swaps detected detail categories for
/// generic phrasing while keeping the message structure recognizable.
pub fn fallback_rewrite(text: &str, entities: &[PiiEntity]) -> String {
    let entity_types: HashSet<&str> = entities.iter().map(|e| e.entity_type.as_str()).collect();
    let lower = text.to_lowercase();
    let has = |label: &str| entity_types.contains(label);

    let mut parts: Vec<String> = Vec::new();

    // Subject line
    if lower.starts_with("subject:") {
        parts.push("Subject: Account Recovery Request - Urgent\n".to_string());
    }

    // Greeting
    if has("PERSON") {
        if lower.contains("medical") || lower.contains("hospital") {
            parts.push(
                "Hi, I'm a healthcare professional from a medical organization in the area."
                    .to_string(),
            );
        } else if lower.contains("company") || lower.contains("work") {
            parts.push("Hi, I'm a professional from an organization.".to_string());
        } else {
            parts.push("Hi, I'm interested in connecting with you.".to_string());
        }
    } else {
        parts.push("Hello there!".to_string());
    }

    // Purpose
    if lower.contains("recover") || lower.contains("account") {
        parts.push("I need to recover my account as soon as possible.".to_string());
    }

    // Personal details
    if has("SSN") || has("US_SSN") || has("DATE") {
        parts.push("\nPersonal Details:".to_string());

        if has("DATE") {
            if let Some(m) = YEAR_RE.find(text) {
                if let Ok(year) = m.as_str().parse::<i32>() {
                    let decade = (year / 10) * 10;
                    parts.push(format!(
                        "I was born in the early {}s generation, around the spring/summer timeframe.",
                        decade
                    ));
                }
            }
        }

        if has("SSN") || has("US_SSN") {
            parts.push(
                "My identification number and verification details are on file with your system."
                    .to_string(),
            );
        }

        if lower.contains("maiden") {
            parts.push("Security verification information is available in your records.".to_string());
        }
    }

    // Contact information
    if has("EMAIL_ADDRESS") || has("PHONE_NUMBER") {
        parts.push("\nContact Information:".to_string());
        parts.push(
            "You can reach me through this platform's messaging system or via the contact methods on file."
                .to_string(),
        );

        if text.matches('@').count() >= 2 {
            parts.push("I have both personal and professional contact channels available.".to_string());
        }
    }

    // Location
    if has("LOCATION") || has("GPE") {
        let mut location_context: Vec<&str> = Vec::new();
        if NEW_YORK_RE.is_match(text) {
            location_context.push("I'm located in the New York metropolitan area");
        } else if STREET_RE.is_match(text) {
            location_context.push("I'm in a residential area in the city");
        }

        if lower.contains("apartment") || lower.contains("apt") {
            location_context.push("in an apartment complex");
        }

        if !location_context.is_empty() {
            parts.push(format!("\nLocation: {}.", location_context.join(", ")));
        }
    }

    // Financial
    if has("CREDIT_CARD") || lower.contains("credit card") || lower.contains("bank") {
        parts.push("\nFinancial Information:".to_string());
        parts.push(
            "My payment information and financial details are securely stored in your system."
                .to_string(),
        );

        if lower.contains("salary") {
            parts.push("Employment and compensation details are on record.".to_string());
        }
    }

    // Medical
    if lower.contains("patient") || lower.contains("insurance") || lower.contains("prescription") {
        parts.push("\nMedical Information:".to_string());
        parts.push(
            "My patient ID and insurance policy information are available in the healthcare system."
                .to_string(),
        );
        parts.push("Prescription and medical history details are documented.".to_string());
    }

    // Employment
    if lower.contains("employee") || lower.contains("manager") {
        parts.push("\nEmployment:".to_string());
        if lower.contains("medical") || lower.contains("hospital") {
            parts.push(
                "I work in the healthcare sector, reporting to a supervisor in the medical department."
                    .to_string(),
            );
        } else {
            parts.push("I'm employed at an organization with management oversight.".to_string());
        }
        parts.push("My employee information and credentials are in the HR system.".to_string());
    }

    // Availability
    if lower.contains("weekend") || lower.contains("available") {
        if lower.contains("my place") || lower.contains("my home") {
            parts.push(
                "\nI'll be available at a local public location this coming weekend.".to_string(),
            );
        } else {
            parts.push("\nI'm available for communication in the near future.".to_string());
        }
    }

    // Contact reminder
    if has("EMAIL_ADDRESS") || has("PHONE_NUMBER") {
        parts.push(
            "Please use the secure messaging system or contact options available through the platform. Thanks!"
                .to_string(),
        );
    }

    let full_rewrite = parts.join(" ");

    if full_rewrite.chars().count() < 50 {
        return "I'd like to connect regarding my account. Please reach me through the platform's secure messaging system for verification. I'm available for communication and can provide additional details through proper channels. Thank you for your assistance!".to_string();
    }

    full_rewrite
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(entity_type: &str) -> PiiEntity {
        PiiEntity {
            entity_type: entity_type.to_string(),
            text: "x".to_string(),
            start: 0,
            end: 1,
            confidence: 1.0,
        }
    }

    #[test]
    fn test_recommendations_cover_detected_types() {
        let entities = vec![
            entity("EMAIL_ADDRESS"),
            entity("PERSON"),
            entity("GPE"),
            entity("DATE"),
        ];
        let recs = fallback_recommendations(&entities, RiskLevel::High);
        assert_eq!(recs.len(), 5);
        assert_eq!(
            recs[0],
            "Remove or hide direct contact information. Use platform messaging instead."
        );
        assert!(recs[4].contains("HIGH RISK"));
    }

    #[test]
    fn test_recommendations_safe_message_when_nothing_detected() {
        let recs = fallback_recommendations(&[], RiskLevel::Low);
        assert_eq!(
            recs,
            vec!["Your text appears relatively safe. Continue being mindful of personal details."]
        );
    }

    #[test]
    fn test_recommendations_phone_alone_triggers_contact_line() {
        let recs = fallback_recommendations(&[entity("PHONE_NUMBER")], RiskLevel::Medium);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("Remove or hide direct contact"));
    }

    #[test]
    fn test_rewrite_account_recovery_email() {
        let text = "Subject: Help\nHi, I'm John Smith and I need to recover my account. \
                    I was born March 5, 1994. My SSN is 123-45-6789. \
                    Email me at john@x.com or jsmith@work.com.";
        let entities = vec![
            entity("PERSON"),
            entity("DATE"),
            entity("US_SSN"),
            entity("EMAIL_ADDRESS"),
        ];
        let rewrite = fallback_rewrite(text, &entities);
        assert!(rewrite.starts_with("Subject: Account Recovery Request - Urgent"));
        assert!(rewrite.contains("I need to recover my account as soon as possible."));
        assert!(rewrite.contains("born in the early 1990s generation"));
        assert!(rewrite.contains("identification number and verification details"));
        assert!(rewrite.contains("I have both personal and professional contact channels"));
        assert!(rewrite.ends_with("Thanks!"));
    }

    #[test]
    fn test_rewrite_location_branches() {
        let text = "I'm Sarah from New York, apt 4B, available this weekend at my place!";
        let entities = vec![entity("PERSON"), entity("GPE")];
        let rewrite = fallback_rewrite(text, &entities);
        assert!(rewrite.contains(
            "Location: I'm located in the New York metropolitan area, in an apartment complex."
        ));
        assert!(rewrite.contains("local public location this coming weekend"));
    }

    #[test]
    fn test_rewrite_street_address_branch() {
        let text = "Meet Maria at 742 Evergreen Street tomorrow.";
        let entities = vec![entity("PERSON"), entity("LOCATION")];
        let rewrite = fallback_rewrite(text, &entities);
        assert!(rewrite.contains("I'm in a residential area in the city"));
    }

    #[test]
    fn test_rewrite_minimal_text_uses_generic_message() {
        let rewrite = fallback_rewrite("Nice weather today.", &[]);
        assert!(rewrite.starts_with("I'd like to connect regarding my account."));
    }

    #[test]
    fn test_rewrite_medical_employment_sections() {
        let text = "I'm an employee at the hospital, my manager knows my patient insurance details.";
        let entities = vec![entity("PERSON")];
        let rewrite = fallback_rewrite(text, &entities);
        assert!(rewrite.contains("healthcare professional from a medical organization"));
        assert!(rewrite.contains("Medical Information:"));
        assert!(rewrite.contains("healthcare sector, reporting to a supervisor"));
    }
}
