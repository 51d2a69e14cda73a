//! Model output cleanup.
//!
//! Local chat models leak role labels and boilerplate disclaimers into their
//! completions; this strips the known artifacts and normalizes whitespace.

use regex::Regex;
use std::sync::OnceLock;

/// Role-label artifacts stripped from completions.
const ROLE_LABELS: [&str; 5] = ["Doctor:", "Assistant:", "Respond:", "Bot:", "Advice:"];

fn disclaimer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Remember.*?provider\.").expect("valid regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Strip role labels and disclaimer boilerplate, collapse whitespace, trim.
pub fn sanitize(text: &str) -> String {
    let mut out = text.to_string();
    for label in ROLE_LABELS {
        out = out.replace(label, "");
    }

    let out = disclaimer_re().replace_all(&out, "");
    let out = whitespace_re().replace_all(&out, " ");

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Doctor: rest well", "rest well")]
    #[case("Bot: Advice: drink water", "drink water")]
    #[case("Assistant: Respond: you will be fine", "you will be fine")]
    fn role_labels_are_stripped(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize(raw), expected);
    }

    #[test]
    fn whitespace_collapses_to_single_spaces() {
        assert_eq!(
            sanitize("take  rest\n\nand\tdrink   water\n"),
            "take rest and drink water"
        );
    }

    #[test]
    fn disclaimer_sentence_is_dropped() {
        let raw = "Rest today. Remember to consult your healthcare provider. Drink water.";
        assert_eq!(sanitize(raw), "Rest today. Drink water.");
    }

    #[test]
    fn disclaimer_match_is_case_insensitive() {
        let raw = "remember to ask your provider. Sleep early.";
        assert_eq!(sanitize(raw), "Sleep early.");
    }

    #[test]
    fn clean_text_is_untouched() {
        assert_eq!(sanitize("You should rest."), "You should rest.");
    }
}
