use kanal::AsyncReceiver;
use lexi_types::{AppEvent, FinishTrigger};
use tokio_util::sync::CancellationToken;

use crate::engine::Engine;

/// Engine's main loop: applies host events until the channel closes or
/// `shutdown` fires. Shutdown closes the session like a page teardown.
pub async fn event_loop(
    engine: Engine,
    app_to_engine_rx: AsyncReceiver<AppEvent>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting, waiting for events");

    loop {
        let event = tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("[EVENT_LOOP] Shutdown requested");
                engine.finish_session(FinishTrigger::PageHide).await;
                return Ok(());
            }
            event = app_to_engine_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] {:?}", event);
        handle_event(&engine, event).await;
    }
}

async fn handle_event(engine: &Engine, event: AppEvent) {
    match event {
        AppEvent::HoverStart(id) => engine.hover_start(id).await,
        AppEvent::HoverEnd(id) => engine.hover_end(id).await,
        AppEvent::Click(id) => {
            // Saving waits on the network; keep hovers flowing meanwhile
            let engine = engine.clone();
            tokio::spawn(async move { engine.click(id).await });
        }
        AppEvent::SentenceHoverStart(text) => engine.sentence_hover_start(&text).await,
        AppEvent::SentenceHoverEnd(text) => engine.sentence_hover_end(&text).await,
        AppEvent::Finish(trigger) => engine.finish_session(trigger).await,
    }
}
