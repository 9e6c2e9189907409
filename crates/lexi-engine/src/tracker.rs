use lexi_types::{ElementId, EngineEvent, NotificationLevel, RecallInteraction};
use tokio::time::Instant;

use crate::engine::Engine;

impl Engine {
    /// Pointer entered an overlay
    pub async fn hover_start(&self, id: ElementId) {
        let word = {
            let mut state = self.state.lock().await;
            let Some(word) = state.store.word_for(id).map(str::to_string) else {
                tracing::debug!("Hover on unmounted element {}", id);
                return;
            };
            state.hover_started.insert(id, Instant::now());
            word
        };

        self.request_translation(&word).await;
    }

    /// Pointer left an overlay. Reports the dwell time and, for known words,
    /// records whether the hover was long enough to count as a lookup.
    pub async fn hover_end(&self, id: ElementId) {
        let (word, duration, known) = {
            let mut state = self.state.lock().await;
            let Some(started) = state.hover_started.remove(&id) else {
                return;
            };
            let Some(word) = state.store.word_for(id).map(str::to_string) else {
                return;
            };

            state.hovered_words.insert(word.clone());
            let known = state.store.is_known(&word);
            (word, started.elapsed(), known)
        };

        let millis = duration.as_millis() as u64;
        let api = self.api.clone();
        let hovered = word.clone();
        tokio::spawn(async move {
            if let Err(e) = api.track_hover(&hovered, millis).await {
                tracing::debug!("Hover on '{}' not tracked: {}", hovered, e);
            }
        });

        if known {
            let looked_up = duration > self.config.tracking.hover_threshold();
            self.record_interaction(RecallInteraction::new(word, looked_up))
                .await;
        }
    }

    /// Click on an overlay: a known word counts as a lookup, an unknown one
    /// is saved to the vocabulary
    pub async fn click(&self, id: ElementId) {
        let Some(attrs) = self.state.lock().await.store.attrs_for(id) else {
            tracing::debug!("Click on unmounted element {}", id);
            return;
        };

        if !attrs.in_vocabulary {
            self.save_word(attrs).await;
            return;
        }

        self.state
            .lock()
            .await
            .hovered_words
            .insert(attrs.original.clone());
        self.record_interaction(RecallInteraction::new(attrs.original.clone(), true))
            .await;
        self.notify(
            NotificationLevel::Info,
            format!("'{}' is already in your vocabulary", attrs.original),
        );
    }

    /// Pointer entered a sentence; shows its translation, fetching it the
    /// first time
    pub async fn sentence_hover_start(&self, text: &str) {
        let cached = {
            let mut state = self.state.lock().await;
            state
                .sentence_hover_started
                .insert(text.to_string(), Instant::now());
            state.sentence_translations.get(text).cloned()
        };

        if let Some(translation) = cached {
            self.emit(EngineEvent::SentenceTranslated {
                sentence: text.to_string(),
                translation,
            });
            return;
        }

        let engine = self.clone();
        let sentence = text.to_string();
        tokio::spawn(async move { engine.resolve_sentence(sentence).await });
    }

    async fn resolve_sentence(&self, sentence: String) {
        let translation = match self.api.translate_sentence(&sentence).await {
            Ok(translation) if !translation.is_empty() => translation,
            Ok(_) => return,
            Err(e) => {
                tracing::debug!("Sentence translation failed: {}", e);
                return;
            }
        };

        self.state
            .lock()
            .await
            .sentence_translations
            .insert(sentence.clone(), translation.clone());
        self.emit(EngineEvent::SentenceTranslated {
            sentence,
            translation,
        });
    }

    pub async fn sentence_hover_end(&self, text: &str) {
        let Some(started) = self.state.lock().await.sentence_hover_started.remove(text) else {
            return;
        };

        let millis = started.elapsed().as_millis() as u64;
        let api = self.api.clone();
        let text = text.to_string();
        tokio::spawn(async move {
            if let Err(e) = api.track_sentence_hover(&text, millis).await {
                tracing::debug!("Sentence hover not tracked: {}", e);
            }
        });
    }
}
