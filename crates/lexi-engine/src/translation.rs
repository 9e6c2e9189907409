use std::collections::VecDeque;

use lexi_types::EngineEvent;

use crate::engine::Engine;

/// Words waiting for a background translation. The most recently requested
/// word is served first; at most one word is in flight.
#[derive(Debug, Default)]
pub struct TranslationQueue {
    pending: VecDeque<String>,
    in_flight: Option<String>,
}

impl TranslationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `word` to the front, dropping any older occurrence
    pub fn promote(&mut self, word: &str) {
        self.pending.retain(|w| w != word);
        self.pending.push_front(word.to_string());
    }

    /// Next word to resolve, only while nothing is in flight
    pub fn begin_next(&mut self) -> Option<String> {
        if self.in_flight.is_some() {
            return None;
        }

        let word = self.pending.pop_front()?;
        self.in_flight = Some(word.clone());
        Some(word)
    }

    pub fn settle(&mut self) {
        self.in_flight = None;
    }

    pub fn is_translating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Engine {
    /// Put `word` at the front of the queue unless it is already resolved
    pub async fn request_translation(&self, word: &str) {
        {
            let mut state = self.state.lock().await;
            if !state.store.needs_translation(word) {
                return;
            }
            state.translations.promote(word);
        }

        self.drain_translations();
    }

    /// Queue every mounted word that still lacks a translation
    pub async fn queue_all_untranslated(&self) {
        let queued = {
            let mut state = self.state.lock().await;
            let words: Vec<String> = state
                .store
                .mounted_words()
                .into_iter()
                .filter(|w| state.store.needs_translation(w))
                .collect();

            for word in &words {
                state.translations.promote(word);
            }
            words.len()
        };

        if queued > 0 {
            tracing::debug!("Queued {} words for background translation", queued);
            self.drain_translations();
        }
    }

    /// Start a worker; it exits at once if another one holds the queue
    fn drain_translations(&self) {
        let engine = self.clone();
        tokio::spawn(async move { engine.run_translations().await });
    }

    async fn run_translations(&self) {
        loop {
            let word = {
                let mut state = self.state.lock().await;
                let Some(word) = state.translations.begin_next() else {
                    return;
                };
                if !state.store.needs_translation(&word) {
                    state.translations.settle();
                    continue;
                }
                word
            };

            let result = self.api.translate_word(&word).await;

            let resolved = {
                let mut state = self.state.lock().await;
                state.translations.settle();

                match result {
                    Ok(translation) if state.store.apply_translation(&word, &translation) => {
                        Some(translation)
                    }
                    Ok(_) => None,
                    Err(e) => {
                        tracing::warn!("Translation of '{}' failed: {}", word, e);
                        None
                    }
                }
            };

            if let Some(translation) = resolved {
                tracing::debug!("Resolved '{}' -> '{}'", word, translation);
                self.emit(EngineEvent::TranslationResolved { word, translation });
            }
        }
    }
}
