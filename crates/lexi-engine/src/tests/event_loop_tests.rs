use std::time::Duration;

use lexi_client::Delivery;
use lexi_core::Node;
use lexi_types::{AppEvent, FinishTrigger, RecallInteraction};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::fake::{Call, FakeApi, engine, known, overlay_id, settle};
use crate::event_loop;

#[tokio::test(start_paused = true)]
async fn host_events_drive_the_engine() {
    let (engine, api, _events) = engine(FakeApi {
        tokens: vec![known("사과", "사과", "NNG")],
        ..Default::default()
    });
    let nodes = engine
        .annotate_text(vec![Node::Text("사과".to_string())], "사과")
        .await;
    let id = overlay_id(&nodes, "사과");

    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(event_loop(engine.clone(), rx, shutdown.clone()));

    tx.send(AppEvent::HoverStart(id)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;
    tx.send(AppEvent::HoverEnd(id)).await.unwrap();
    tx.send(AppEvent::SentenceHoverStart("사과".to_string()))
        .await
        .unwrap();
    tx.send(AppEvent::SentenceHoverEnd("사과".to_string()))
        .await
        .unwrap();
    tx.send(AppEvent::Finish(FinishTrigger::NavigationConfirmed))
        .await
        .unwrap();
    settle().await;

    assert!(engine.is_session_finished().await);
    assert_eq!(
        api.batches(),
        vec![(vec![RecallInteraction::new("사과", true)], Delivery::KeepAlive)]
    );
    assert!(
        api.calls()
            .iter()
            .any(|c| matches!(c, Call::TrackSentence(text, _) if text == "사과"))
    );

    shutdown.cancel();
    let result = timeout(Duration::from_secs(2), handle).await.unwrap();
    assert!(result.unwrap().is_ok());
}

#[tokio::test(start_paused = true)]
async fn shutdown_flushes_the_session() {
    let (engine, api, _events) = engine(FakeApi::default());
    engine
        .state
        .lock()
        .await
        .displayed_vocab_words
        .insert("물".to_string());

    let (_tx, rx) = kanal::unbounded_async::<AppEvent>();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(event_loop(engine.clone(), rx, shutdown.clone()));

    settle().await;
    shutdown.cancel();
    timeout(Duration::from_secs(2), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    assert!(engine.is_session_finished().await);
    assert_eq!(
        api.batches(),
        vec![(vec![RecallInteraction::new("물", false)], Delivery::KeepAlive)]
    );
}

#[tokio::test]
async fn closed_channel_ends_the_loop_with_an_error() {
    let (engine, _api, _events) = engine(FakeApi::default());
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    drop(tx);

    let result = timeout(
        Duration::from_secs(2),
        event_loop(engine, rx, CancellationToken::new()),
    )
    .await
    .unwrap();

    assert!(result.is_err());
}
