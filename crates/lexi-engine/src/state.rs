use std::collections::{BTreeSet, HashMap, HashSet};

use lexi_core::WordStore;
use lexi_types::{ElementId, RecallInteraction};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::translation::TranslationQueue;

/// Everything one reading session accumulates
#[derive(Debug, Default)]
pub struct EngineState {
    pub store: WordStore,
    /// Words the learner hovered or clicked this session
    pub hovered_words: HashSet<String>,
    /// Known words that were shown at least once
    pub displayed_vocab_words: BTreeSet<String>,
    pub translations: TranslationQueue,
    pub recall_buffer: Vec<RecallInteraction>,
    pub flush_timer: Option<JoinHandle<()>>,
    /// Once set, never cleared
    pub session_finished: bool,
    pub hover_started: HashMap<ElementId, Instant>,
    pub sentence_hover_started: HashMap<String, Instant>,
    /// Resolved sentence translations, reused on later hovers
    pub sentence_translations: HashMap<String, String>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known words shown but never interacted with, in sorted order
    pub fn unseen_vocab_words(&self) -> Vec<String> {
        self.displayed_vocab_words
            .iter()
            .filter(|word| !self.hovered_words.contains(*word))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_is_displayed_minus_hovered() {
        let mut state = EngineState::new();
        for word in ["C", "A", "B"] {
            state.displayed_vocab_words.insert(word.to_string());
        }
        state.hovered_words.insert("A".to_string());
        state.hovered_words.insert("Z".to_string());

        assert_eq!(state.unseen_vocab_words(), vec!["B", "C"]);
    }
}
