use lexi_client::Delivery;
use lexi_types::{EngineEvent, FinishTrigger, RecallInteraction};

use crate::engine::Engine;

impl Engine {
    /// Buffer an interaction and restart the debounce timer. Everything
    /// buffered within one quiet window is sent as a single write.
    pub async fn record_interaction(&self, interaction: RecallInteraction) {
        let mut state = self.state.lock().await;
        if state.session_finished {
            tracing::debug!("Session finished, dropping interaction for '{}'", interaction.word);
            return;
        }

        state.recall_buffer.push(interaction);

        if let Some(timer) = state.flush_timer.take() {
            timer.abort();
        }

        let engine = self.clone();
        let delay = self.config.tracking.recall_debounce();
        state.flush_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.flush_recalls().await;
        }));
    }

    async fn flush_recalls(&self) {
        let entries = {
            let mut state = self.state.lock().await;
            state.flush_timer = None;
            std::mem::take(&mut state.recall_buffer)
        };

        if entries.is_empty() {
            return;
        }

        // Detached so that a later timer abort cannot cancel the write
        let api = self.api.clone();
        tokio::spawn(async move {
            match api.batch_recall(&entries, Delivery::Normal).await {
                Ok(()) => tracing::debug!("Sent {} recall interactions", entries.len()),
                Err(e) => tracing::warn!("Recall batch of {} dropped: {}", entries.len(), e),
            }
        });
    }

    /// Close the session: every known word that was shown but never touched
    /// is reported as not looked up, and the whole buffer goes out in one
    /// keepalive write. Later calls do nothing.
    pub async fn finish_session(&self, trigger: FinishTrigger) {
        let entries = {
            let mut state = self.state.lock().await;
            if state.session_finished {
                tracing::debug!("Session already finished, ignoring {:?}", trigger);
                return;
            }
            state.session_finished = true;

            if let Some(timer) = state.flush_timer.take() {
                timer.abort();
            }

            let unseen = state.unseen_vocab_words();
            state
                .recall_buffer
                .extend(unseen.into_iter().map(|word| RecallInteraction::new(word, false)));
            std::mem::take(&mut state.recall_buffer)
        };

        tracing::info!(
            "Session finished ({:?}), flushing {} interactions",
            trigger,
            entries.len()
        );

        if !entries.is_empty() {
            let send = self.api.batch_recall(&entries, Delivery::KeepAlive);
            match tokio::time::timeout(self.config.network.teardown_timeout(), send).await {
                Ok(Ok(())) => tracing::debug!("Final recall batch delivered"),
                Ok(Err(e)) => tracing::warn!("Final recall batch dropped: {}", e),
                Err(_) => tracing::warn!("Final recall batch timed out"),
            }
        }

        self.emit(EngineEvent::SessionFinished);
    }
}
