// ============================================================
// Layer 3: Keyword Fallback
// ============================================================
// Answers without a model. Used when the artifacts could not
// be loaded, or when a single prediction fails.
//
// Rules are checked in a fixed order and the first match wins.
// Emergency comes first: "emergency chest pain" must never be
// answered as a headache or as small talk, even though "pain"
// also appears in the headache rule.
//
// Matching is plain substring search on the lowercased input,
// so "head" also fires for "headache" and "forehead".

/// One keyword rule: any keyword present → this response.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub category: FallbackCategory,
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackCategory {
    Emergency,
    Headache,
    ColdFlu,
    FacilityLookup,
    General,
}

/// Rules in priority order.
pub const RULES: [KeywordRule; 4] = [
    KeywordRule {
        category: FallbackCategory::Emergency,
        keywords: &["emergency", "urgent", "help", "pain"],
        response: "If you're experiencing a medical emergency, please call emergency services immediately.",
    },
    KeywordRule {
        category: FallbackCategory::Headache,
        keywords: &["headache", "head", "pain"],
        response: "Headaches can be caused by various factors including stress, dehydration, or lack of sleep. \
                   For persistent headaches, please consult a healthcare professional.",
    },
    KeywordRule {
        category: FallbackCategory::ColdFlu,
        keywords: &["cold", "flu", "fever", "cough"],
        response: "Common cold symptoms include coughing, sore throat, and congestion. Rest, stay hydrated, \
                   and consider over-the-counter medications for symptom relief. Consult a doctor if symptoms \
                   persist or worsen.",
    },
    KeywordRule {
        category: FallbackCategory::FacilityLookup,
        keywords: &["doctor", "hospital", "clinic", "appointment"],
        response: "I can help you find nearby healthcare facilities. Would you like me to search for hospitals, \
                   clinics, or doctor's offices in your area?",
    },
];

pub const GENERAL_RESPONSE: &str =
    "I'm here to provide general health information. How can I assist you today?";

/// Which rule fires for this input.
pub fn classify(raw_text: &str) -> FallbackCategory {
    let text = raw_text.to_lowercase();
    RULES
        .iter()
        .find(|rule| contains_any(&text, rule.keywords))
        .map(|rule| rule.category)
        .unwrap_or(FallbackCategory::General)
}

/// Canned response for this input. Never fails.
pub fn fallback_response(raw_text: &str) -> String {
    let category = classify(raw_text);
    RULES
        .iter()
        .find(|rule| rule.category == category)
        .map(|rule| rule.response)
        .unwrap_or(GENERAL_RESPONSE)
        .to_string()
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_beats_pain_overlap() {
        assert_eq!(classify("emergency chest pain"), FallbackCategory::Emergency);
        assert_eq!(classify("My head is in PAIN"), FallbackCategory::Emergency);
        assert!(fallback_response("emergency chest pain").contains("call emergency services"));
    }

    #[test]
    fn test_headache() {
        assert_eq!(classify("I have a terrible headache"), FallbackCategory::Headache);
        assert!(fallback_response("I have a terrible headache").starts_with("Headaches can be caused"));
    }

    #[test]
    fn test_cold_flu_and_facilities() {
        assert_eq!(classify("Is this the FLU?"), FallbackCategory::ColdFlu);
        assert_eq!(classify("where is the nearest hospital"), FallbackCategory::FacilityLookup);
    }

    #[test]
    fn test_general_default() {
        assert_eq!(classify(""), FallbackCategory::General);
        assert_eq!(fallback_response("how much water should I drink"), GENERAL_RESPONSE);
    }

    #[test]
    fn test_substring_semantics() {
        // "help" is an emergency keyword even inside a polite question
        assert_eq!(classify("can you help me with my cough"), FallbackCategory::Emergency);
    }
}
