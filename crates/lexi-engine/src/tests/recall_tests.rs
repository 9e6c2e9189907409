use std::time::Duration;

use lexi_client::Delivery;
use lexi_types::{EngineEvent, FinishTrigger, RecallInteraction};

use super::fake::{FakeApi, drain, engine, settle};

fn interaction(word: &str, had_lookup: bool) -> RecallInteraction {
    RecallInteraction::new(word, had_lookup)
}

#[tokio::test(start_paused = true)]
async fn one_write_per_debounce_window() {
    for count in [0usize, 1, 50] {
        let (engine, api, _events) = engine(FakeApi::default());

        let expected: Vec<_> = (0..count)
            .map(|i| interaction(&format!("단어{i}"), i % 2 == 0))
            .collect();
        for entry in &expected {
            engine.record_interaction(entry.clone()).await;
        }

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(api.batches().is_empty(), "flushed early for {count}");

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;

        let batches = api.batches();
        if count == 0 {
            assert!(batches.is_empty());
        } else {
            assert_eq!(batches, vec![(expected, Delivery::Normal)], "count {count}");
        }
    }
}

#[tokio::test(start_paused = true)]
async fn each_interaction_restarts_the_window() {
    let (engine, api, _events) = engine(FakeApi::default());

    engine.record_interaction(interaction("사과", true)).await;
    tokio::time::sleep(Duration::from_millis(600)).await;
    engine.record_interaction(interaction("배", false)).await;
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(api.batches().is_empty());

    tokio::time::sleep(Duration::from_millis(500)).await;
    settle().await;

    assert_eq!(
        api.batches(),
        vec![(
            vec![interaction("사과", true), interaction("배", false)],
            Delivery::Normal
        )]
    );
}

#[tokio::test(start_paused = true)]
async fn session_end_reports_shown_but_untouched_words() {
    let (engine, api, events) = engine(FakeApi::default());
    {
        let mut state = engine.state.lock().await;
        for word in ["C", "A", "B"] {
            state.displayed_vocab_words.insert(word.to_string());
        }
        state.hovered_words.insert("A".to_string());
    }

    engine.finish_session(FinishTrigger::PageHide).await;

    assert_eq!(
        api.batches(),
        vec![(
            vec![interaction("B", false), interaction("C", false)],
            Delivery::KeepAlive
        )]
    );
    assert!(engine.is_session_finished().await);
    assert_eq!(drain(&events), vec![EngineEvent::SessionFinished]);
}

#[tokio::test(start_paused = true)]
async fn session_end_takes_the_pending_buffer_along() {
    let (engine, api, _events) = engine(FakeApi::default());
    engine
        .state
        .lock()
        .await
        .displayed_vocab_words
        .insert("물".to_string());

    engine.record_interaction(interaction("사과", true)).await;
    engine.finish_session(FinishTrigger::VisibilityHidden).await;

    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(
        api.batches(),
        vec![(
            vec![interaction("사과", true), interaction("물", false)],
            Delivery::KeepAlive
        )]
    );
}

#[tokio::test(start_paused = true)]
async fn session_finishes_once() {
    let (engine, api, events) = engine(FakeApi::default());
    engine
        .state
        .lock()
        .await
        .displayed_vocab_words
        .insert("물".to_string());

    engine.finish_session(FinishTrigger::PageHide).await;
    engine
        .finish_session(FinishTrigger::NavigationConfirmed)
        .await;
    engine.record_interaction(interaction("사과", true)).await;
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(api.batches().len(), 1);
    assert_eq!(drain(&events), vec![EngineEvent::SessionFinished]);
}

#[tokio::test(start_paused = true)]
async fn nothing_to_report_sends_nothing() {
    let (engine, api, events) = engine(FakeApi::default());

    engine.finish_session(FinishTrigger::PageHide).await;

    assert!(api.batches().is_empty());
    assert_eq!(drain(&events), vec![EngineEvent::SessionFinished]);
}
