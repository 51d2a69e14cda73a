//! Rule-based message triage.
//!
//! Everything here is a pure function over the lowercased message text:
//! fixed keyword lists, substring matching only. This is the entire
//! "classifier" — no scoring, no NLP pipeline, no state.

/// Keywords that always bypass generation with a canned safety reply.
pub const EMERGENCY_KEYWORDS: [&str; 7] = [
    "bleeding",
    "pregnant",
    "chest pain",
    "faint",
    "unconscious",
    "breathing",
    "seizure",
];

/// Phrases that mean the patient considers themselves recovered.
pub const RECOVERY_PHRASES: [&str; 10] = [
    "i am fine",
    "i'm fine",
    "i am okay",
    "i'm okay",
    "i feel better",
    "i am well",
    "i'm well",
    "i have recovered",
    "no more pain",
    "no more fever",
];

/// The symptom vocabulary tracked in patient memory.
pub const SYMPTOM_VOCABULARY: [&str; 12] = [
    "fever", "headache", "pain", "cough", "cold", "tired", "fatigue", "vomiting", "diarrhea",
    "bleeding", "swelling", "nausea",
];

const GREETINGS: [&str; 6] = [
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
];

/// Does the message contain an emergency keyword?
pub fn is_emergency(text: &str) -> bool {
    let text = text.to_lowercase();
    EMERGENCY_KEYWORDS.iter().any(|d| text.contains(d))
}

/// Does the message say the patient has recovered?
pub fn is_recovered(text: &str) -> bool {
    let text = text.to_lowercase();
    RECOVERY_PHRASES.iter().any(|p| text.contains(p))
}

/// Is the message a plain greeting?
pub fn is_greeting(text: &str) -> bool {
    let text = text.to_lowercase();
    GREETINGS.iter().any(|g| text.contains(g))
}

/// Is the patient asking how the assistant is doing?
pub fn is_how_are_you(text: &str) -> bool {
    text.to_lowercase().contains("how are you")
}

/// Vocabulary symptoms mentioned in the message, in vocabulary order.
pub fn detect_symptoms(text: &str) -> Vec<&'static str> {
    let text = text.to_lowercase();
    SYMPTOM_VOCABULARY
        .iter()
        .filter(|s| text.contains(*s))
        .copied()
        .collect()
}

/// Duration phrase implied by the message, if any.
///
/// "yesterday" wins over "today" when both appear.
pub fn detect_duration(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    if text.contains("yesterday") {
        Some("since yesterday")
    } else if text.contains("today") {
        Some("today")
    } else {
        None
    }
}

/// Stated severity, if any.
pub fn detect_severity(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    if text.contains("severe") || text.contains("unbearable") {
        Some("severe")
    } else if text.contains("moderate") {
        Some("moderate")
    } else if text.contains("mild") || text.contains("slight") {
        Some("mild")
    } else {
        None
    }
}

/// Symptom-combination escalation over the accumulated symptom set.
///
/// Single-symptom escalations (chest pain, bleeding) are already covered by
/// the emergency keyword scan, so only the combination rule lives here.
pub fn assess<S: AsRef<str>>(symptoms: &[S]) -> Option<&'static str> {
    let has = |name: &str| symptoms.iter().any(|s| s.as_ref() == name);

    if has("fever") && has("headache") && has("vomiting") {
        return Some(
            "Fever, headache and vomiting together can signal malaria or a serious infection",
        );
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("I have chest pain right now")]
    #[case("She is PREGNANT and dizzy")]
    #[case("trouble breathing since dinner")]
    #[case("he had a seizure")]
    #[case("I keep fainting")]
    fn emergency_keywords_trigger(#[case] text: &str) {
        assert!(is_emergency(text));
    }

    #[rstest]
    #[case("I have a mild headache")]
    #[case("just tired today")]
    #[case("")]
    fn non_emergencies_pass(#[case] text: &str) {
        assert!(!is_emergency(text));
    }

    #[rstest]
    #[case("I am fine now, thanks")]
    #[case("i'm okay")]
    #[case("No more fever since this morning")]
    #[case("I have recovered fully")]
    fn recovery_phrases_match(#[case] text: &str) {
        assert!(is_recovered(text));
    }

    #[test]
    fn recovery_requires_a_known_phrase() {
        assert!(!is_recovered("the fever is gone down a bit"));
    }

    #[test]
    fn symptoms_come_back_in_vocabulary_order() {
        let found = detect_symptoms("Nausea and a bad headache with fever");
        assert_eq!(found, vec!["fever", "headache", "nausea"]);
    }

    #[test]
    fn symptom_detection_is_case_insensitive() {
        assert_eq!(detect_symptoms("COUGH and Cold"), vec!["cough", "cold"]);
    }

    #[test]
    fn no_symptoms_in_small_talk() {
        assert!(detect_symptoms("thank you doctor").is_empty());
    }

    #[rstest]
    #[case("it started yesterday", Some("since yesterday"))]
    #[case("it began today", Some("today"))]
    #[case("since yesterday, worse today", Some("since yesterday"))]
    #[case("for a while now", None)]
    fn duration_detection(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(detect_duration(text), expected);
    }

    #[rstest]
    #[case("the pain is severe", Some("severe"))]
    #[case("unbearable cramps", Some("severe"))]
    #[case("a moderate ache", Some("moderate"))]
    #[case("only a slight cough", Some("mild"))]
    #[case("a mild fever", Some("mild"))]
    #[case("some discomfort", None)]
    fn severity_detection(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(detect_severity(text), expected);
    }

    #[test]
    fn greeting_and_probe_detection() {
        assert!(is_greeting("Hello there"));
        assert!(is_greeting("good morning doctor"));
        assert!(is_how_are_you("hi, how are you?"));
        assert!(!is_how_are_you("how old are you"));
    }

    #[test]
    fn combination_rule_needs_all_three() {
        assert!(assess(&["fever", "headache", "vomiting"]).is_some());
        assert!(assess(&["fever", "headache", "vomiting", "cough"]).is_some());
        assert!(assess(&["fever", "headache"]).is_none());
        assert!(assess::<&str>(&[]).is_none());
    }
}
