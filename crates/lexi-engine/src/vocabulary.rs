use lexi_client::VocabularyEntry;
use lexi_core::{DEFAULT_KNOWN_COLOR, OverlayAttrs};
use lexi_types::{EngineEvent, NotificationLevel};

use crate::engine::Engine;

impl Engine {
    /// Add an unknown word to the vocabulary, looking up its translation
    /// first when none is known yet
    pub async fn save_word(&self, attrs: OverlayAttrs) {
        let word = attrs.original;
        let mut translation = attrs.translation;

        if translation.is_empty() || translation == word {
            match self.api.translate_word(&word).await {
                Ok(found) if !found.is_empty() => {
                    self.state
                        .lock()
                        .await
                        .store
                        .set_explicit_translation(&word, &found);
                    self.emit(EngineEvent::TranslationResolved {
                        word: word.clone(),
                        translation: found.clone(),
                    });
                    translation = found;
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Lookup before saving '{}' failed: {}", word, e),
            }
        }

        let entry = VocabularyEntry {
            word: word.clone(),
            pos: attrs.pos,
            grammar_info: attrs.grammar,
            translation,
        };

        match self.api.save_vocabulary(&entry).await {
            Ok(saved) => {
                let color = {
                    let mut state = self.state.lock().await;
                    state.store.mark_known(&word, saved.color.as_deref());
                    state.displayed_vocab_words.insert(word.clone());
                    state
                        .store
                        .entry(&word)
                        .and_then(|entry| entry.color.clone())
                        .unwrap_or_else(|| DEFAULT_KNOWN_COLOR.to_string())
                };

                tracing::info!("Saved '{}' to vocabulary", word);
                self.emit(EngineEvent::VocabularySaved {
                    word: word.clone(),
                    color,
                });
                self.notify(
                    NotificationLevel::Success,
                    format!("'{}' added to your vocabulary", word),
                );
            }
            Err(e) if e.is_auth() => {
                self.notify(NotificationLevel::Warning, "Please login to continue");
            }
            Err(e) => {
                tracing::error!("Saving '{}' failed: {}", word, e);
                self.notify(
                    NotificationLevel::Error,
                    format!("Could not save '{}'", word),
                );
            }
        }
    }
}
