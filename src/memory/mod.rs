//! Patient memory updates and the bounded prompt window.

use crate::triage;
use crate::types::{ChatMessage, PatientMemory};
use std::collections::VecDeque;

/// Fold one patient message into the memory record.
///
/// A recovery phrase wipes the record wholesale. Otherwise newly mentioned
/// vocabulary symptoms are appended (never duplicated, so repeating the same
/// message is a no-op) and duration/severity are overwritten when the message
/// states them — last mention wins.
pub fn update(memory: &mut PatientMemory, text: &str) {
    if triage::is_recovered(text) {
        memory.reset();
        return;
    }

    for symptom in triage::detect_symptoms(text) {
        if !memory.symptoms.iter().any(|s| s == symptom) {
            memory.symptoms.push(symptom.to_string());
        }
    }

    if let Some(duration) = triage::detect_duration(text) {
        memory.duration = Some(duration.to_string());
    }

    if let Some(severity) = triage::detect_severity(text) {
        memory.severity = Some(severity.to_string());
    }
}

/// Bounded view of the most recent conversation turns, used for prompt
/// context. Oldest entries fall off once the cap is reached.
pub struct RecentWindow {
    cap: usize,
    messages: VecDeque<ChatMessage>,
}

impl RecentWindow {
    /// Create an empty window holding at most `cap` messages.
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            messages: VecDeque::new(),
        }
    }

    /// Build a window from stored history, keeping only the newest `cap`.
    pub fn from_history(cap: usize, history: Vec<ChatMessage>) -> Self {
        let mut window = Self::new(cap);
        for message in history {
            window.push(message);
        }
        window
    }

    /// Append a message, dropping the oldest if over capacity.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > self.cap {
            self.messages.pop_front();
        }
    }

    /// Messages currently in the window, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    /// Number of messages currently held.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when the window holds nothing.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
