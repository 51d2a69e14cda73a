//! Prompt assembly for the assistant model.
//!
//! One fixed template, interpolating the accumulated patient memory, a short
//! window of recent turns, and the latest message. Nothing here talks to the
//! model.

pub mod sanitize;

pub use sanitize::sanitize;

use crate::memory::RecentWindow;
use crate::types::{MessageRole, PatientMemory};
use std::fmt::Write;

/// Safe home-care one-liners keyed by vocabulary symptom. Suggestions for
/// symptoms present in memory are appended to the prompt context.
const HOME_CARE: [(&str, &str); 4] = [
    (
        "headache",
        "Rest, stay hydrated, and consider acetaminophen if safe.",
    ),
    (
        "fever",
        "Drink fluids, rest, and monitor your temperature. Seek hospital care if it stays high.",
    ),
    (
        "nausea",
        "Eat small bland meals, stay hydrated; ginger tea may help.",
    ),
    (
        "fatigue",
        "Rest, maintain hydration, and keep a balanced diet.",
    ),
];

const EMPATHY_STARTERS: [&str; 6] = [
    "I'm sorry you're feeling this way.",
    "That sounds uncomfortable.",
    "I understand your concern.",
    "Thank you for telling me.",
    "I'm glad you reached out.",
    "I'm here to support you.",
];

/// Build the generation prompt for one patient message.
pub fn build(message: &str, memory: &PatientMemory, recent: &RecentWindow) -> String {
    let mut context = String::new();

    if !memory.symptoms.is_empty() {
        let _ = writeln!(context, "Symptoms: {}", memory.symptoms.join(", "));
    }
    if let Some(duration) = &memory.duration {
        let _ = writeln!(context, "Duration: {duration}");
    }
    if let Some(severity) = &memory.severity {
        let _ = writeln!(context, "Severity: {severity}");
    }

    let care: Vec<&str> = HOME_CARE
        .iter()
        .filter(|(symptom, _)| memory.symptoms.iter().any(|s| s == symptom))
        .map(|(_, advice)| *advice)
        .collect();
    if !care.is_empty() {
        let _ = writeln!(context, "Home care: {}", care.join(" "));
    }

    if !recent.is_empty() {
        let _ = writeln!(context, "Conversation so far:");
        for turn in recent.messages() {
            let speaker = match turn.role {
                MessageRole::User => "Patient",
                MessageRole::Assistant => "Assistant",
            };
            let _ = writeln!(context, "{speaker}: {}", turn.content);
        }
    }

    format!(
        "You are a calm, supportive hospital virtual assistant.\n\
         Do not repeat yourself.\n\
         Give short, human-like advice.\n\
         If serious, advise hospital visit.\n\
         \n\
         {context}\n\
         Patient: {message}\n\
         Reply naturally in one short paragraph.\n"
    )
}

/// One of the fixed empathy openers, chosen at random.
pub fn empathy_prefix() -> &'static str {
    EMPATHY_STARTERS[rand::random_range(0..EMPATHY_STARTERS.len())]
}

/// Prefix a model reply with an empathy opener.
pub fn with_empathy(reply: &str) -> String {
    format!("{} {}", empathy_prefix(), reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use chrono::Utc;

    #[test]
    fn prompt_interpolates_memory() {
        let memory = PatientMemory {
            symptoms: vec!["headache".to_string(), "nausea".to_string()],
            duration: Some("since yesterday".to_string()),
            severity: Some("mild".to_string()),
        };
        let prompt = build("can I take something?", &memory, &RecentWindow::new(6));

        assert!(prompt.contains("Symptoms: headache, nausea"));
        assert!(prompt.contains("Duration: since yesterday"));
        assert!(prompt.contains("Severity: mild"));
        assert!(prompt.contains("Patient: can I take something?"));
        assert!(prompt.contains("Reply naturally in one short paragraph."));
    }

    #[test]
    fn empty_memory_adds_no_context_lines() {
        let prompt = build("hello", &PatientMemory::default(), &RecentWindow::new(6));

        assert!(!prompt.contains("Symptoms:"));
        assert!(!prompt.contains("Duration:"));
        assert!(!prompt.contains("Severity:"));
        assert!(!prompt.contains("Home care:"));
        assert!(!prompt.contains("Conversation so far:"));
    }

    #[test]
    fn home_care_follows_remembered_symptoms() {
        let memory = PatientMemory {
            symptoms: vec!["fever".to_string()],
            duration: None,
            severity: None,
        };
        let prompt = build("still warm", &memory, &RecentWindow::new(6));

        assert!(prompt.contains("Home care: Drink fluids"));
        assert!(!prompt.contains("acetaminophen"));
    }

    #[test]
    fn recent_turns_are_labelled() {
        let mut recent = RecentWindow::new(6);
        recent.push(ChatMessage {
            role: MessageRole::User,
            content: "my head hurts".to_string(),
            timestamp: Utc::now(),
        });
        recent.push(ChatMessage {
            role: MessageRole::Assistant,
            content: "How long has it hurt?".to_string(),
            timestamp: Utc::now(),
        });

        let prompt = build("since this morning", &PatientMemory::default(), &recent);

        assert!(prompt.contains("Patient: my head hurts"));
        assert!(prompt.contains("Assistant: How long has it hurt?"));
    }

    #[test]
    fn empathy_prefix_is_from_the_fixed_list() {
        let reply = with_empathy("Rest and drink water.");
        assert!(EMPATHY_STARTERS.iter().any(|s| reply.starts_with(s)));
        assert!(reply.ends_with("Rest and drink water."));
    }
}
