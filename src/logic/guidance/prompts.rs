//! Prompt templates and reply parsing for the generative tiers.

use crate::logic::entities::PiiEntity;

pub use crate::constants::{MAX_RECOMMENDATIONS, PROMPT_TEXT_CHARS};

/// Detected samples listed per entity type in the prompt summary.
pub const ENTITY_SAMPLE_LIMIT: usize = 3;

// ============================================================================
// PROMPT TEMPLATES
// ============================================================================

pub const RECOMMENDATIONS_SYSTEM_PROMPT: &str = "You are a privacy expert AI assistant. \nAnalyze the detected PII (Personal Identifiable Information) and provide \nspecific, actionable privacy recommendations. Be concise and practical.";

pub const REWRITE_SYSTEM_PROMPT: &str = "You are a privacy expert. Rewrite the given text to remove \nall PII while maintaining the FULL context, details, and natural tone. \n\nCRITICAL RULES:\n- PRESERVE the original message's length and detail level\n- KEEP all non-sensitive information (purpose, context, relationships, topics)\n- Replace names with generic but contextual descriptions (\"a colleague from the medical field\", \"someone from Springfield\")\n- Replace emails/phones with platform-agnostic contact methods (\"through this platform's messaging\", \"via the contact form\")\n- Replace exact addresses with general but useful areas (\"in the New York metro area\", \"in the downtown district\")\n- Replace exact dates with approximate but contextual timeframes (\"born in the early 90s\", \"around May\", \"this coming weekend\")\n- Replace SSN/credit cards/IDs with generic placeholders (\"my identification number\", \"payment information on file\")\n- Replace specific locations with public alternatives (\"at a local coffee shop\" instead of \"at my place\")\n- MAINTAIN all paragraphs, structure, and formatting from the original\n- Keep the friendly, conversational tone\n- Make it sound natural and complete, NOT overly shortened\n- DO NOT use [REDACTED] or brackets\n- The rewrite should be roughly the same length as the original\n\nReturn ONLY the rewritten text with FULL context preserved.";

pub const ASSISTANT_SYSTEM_PROMPT: &str = "You are a privacy assistant helping everyday users protect their personal \ninformation online. Answer in plain language with 3-5 practical steps the \nuser can take. Do not give legal advice; when a question needs a qualified \nprofessional, say so. Keep the answer under 200 words.";

/// User prompt for the recommendations tier.
pub fn recommendations_user_prompt(risk_level: &str, entity_summary: &str, text: &str) -> String {
    format!(
        "\nText Risk Level: {}\n\nDetected PII:\n{}\n\nOriginal Text:\n{}...\n\nProvide 3-5 specific privacy recommendations to reduce risk.\nFocus on what information to remove or generalize.\n",
        risk_level,
        entity_summary,
        truncate_chars(text, PROMPT_TEXT_CHARS)
    )
}

/// User prompt for the rewrite tier. The full text goes in untruncated.
pub fn rewrite_user_prompt(entity_summary: &str, text: &str) -> String {
    format!(
        "\nDetected PII to remove/generalize:\n{}\n\nOriginal Text:\n{}\n\nRewrite this as a natural, privacy-safe alternative:\n",
        entity_summary, text
    )
}

/// User prompt for the privacy question tier.
pub fn assistant_user_prompt(question: &str, locale: &str) -> String {
    format!(
        "\nUser locale: {}\n\nQuestion:\n{}\n\nGive practical privacy guidance, tailored to this locale where relevant.\n",
        locale, question
    )
}

// ============================================================================
// PROMPT HELPERS
// ============================================================================

/// One line per entity type, first-seen order, up to three samples each.
pub fn entity_summary(entities: &[PiiEntity]) -> String {
    if entities.is_empty() {
        return "No PII detected".to_string();
    }

    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for entity in entities {
        match groups
            .iter_mut()
            .find(|(label, _)| *label == entity.entity_type)
        {
            Some((_, samples)) => samples.push(entity.text.as_str()),
            None => groups.push((entity.entity_type.as_str(), vec![entity.text.as_str()])),
        }
    }

    groups
        .iter()
        .map(|(label, samples)| {
            let listed = samples
                .iter()
                .take(ENTITY_SAMPLE_LIMIT)
                .copied()
                .collect::<Vec<_>>()
                .join(", ");
            format!("- {}: {}", label, listed)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pull list items out of a completion: numbered, dashed, or bulleted lines.
pub fn parse_recommendations(reply: &str) -> Vec<String> {
    const MARKER_CHARS: &[char] = &[
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', '-', '\u{2022}', ')', ' ',
    ];

    let mut items = Vec::new();
    for raw in reply.lines() {
        let line = raw.trim();
        let first = match line.chars().next() {
            Some(c) => c,
            None => continue,
        };
        if !(first.is_ascii_digit() || first == '-' || first == '\u{2022}') {
            continue;
        }
        let item = line
            .trim_start_matches(|c: char| MARKER_CHARS.contains(&c))
            .trim();
        if !item.is_empty() {
            items.push(item.to_string());
            if items.len() == MAX_RECOMMENDATIONS {
                break;
            }
        }
    }
    items
}

/// Truncate to a character count without splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
