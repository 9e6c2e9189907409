use std::collections::HashMap;

use lexi_core::Node;
use lexi_types::EngineEvent;
use tokio::sync::Semaphore;

use super::fake::{FakeApi, drain, engine, settle, token};

fn dictionary(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn one_call_in_flight_and_latest_request_first() {
    let (engine, api, _events) = engine(FakeApi {
        translations: dictionary(&[("가", "a"), ("나", "b"), ("다", "c"), ("라", "d")]),
        gate: Some(Semaphore::new(0)),
        ..Default::default()
    });

    engine.request_translation("가").await;
    settle().await;
    assert_eq!(api.translated(), vec!["가"]);

    engine.request_translation("나").await;
    engine.request_translation("다").await;
    engine.request_translation("라").await;
    settle().await;
    assert_eq!(api.translated(), vec!["가"]);

    api.gate.as_ref().unwrap().add_permits(4);
    settle().await;

    assert_eq!(api.translated(), vec!["가", "라", "다", "나"]);
    assert_eq!(api.max_translating(), 1);
    for (word, expected) in [("가", "a"), ("나", "b"), ("다", "c"), ("라", "d")] {
        assert_eq!(engine.translation_of(word).await.as_deref(), Some(expected));
    }
}

#[tokio::test(start_paused = true)]
async fn resolved_words_are_not_requested_again() {
    let (engine, api, events) = engine(FakeApi {
        translations: dictionary(&[("사과", "apple")]),
        ..Default::default()
    });

    engine.request_translation("사과").await;
    settle().await;
    engine.request_translation("사과").await;
    settle().await;

    assert_eq!(api.translated(), vec!["사과"]);
    assert_eq!(
        drain(&events),
        vec![EngineEvent::TranslationResolved {
            word: "사과".to_string(),
            translation: "apple".to_string(),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn empty_result_leaves_the_word_unresolved() {
    let (engine, api, events) = engine(FakeApi::default());

    engine.request_translation("어휘").await;
    settle().await;

    assert_eq!(engine.translation_of("어휘").await, None);
    assert!(drain(&events).is_empty());

    // still eligible for a later attempt
    engine.request_translation("어휘").await;
    settle().await;
    assert_eq!(api.translated().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn analysis_queues_every_untranslated_word() {
    let mut translated = token("물", "물", "NNG");
    translated.translation = "water".to_string();

    let (engine, api, _events) = engine(FakeApi {
        tokens: vec![token("사과", "사과", "NNG"), translated, token("배", "배", "NNG")],
        translations: dictionary(&[("사과", "apple"), ("배", "pear")]),
        ..Default::default()
    });

    let text = "사과 물 배";
    engine
        .annotate_text(vec![Node::Text(text.to_string())], text)
        .await;
    settle().await;

    // each queued word jumps ahead of the ones queued before it
    assert_eq!(api.translated(), vec!["사과", "배"]);
    assert_eq!(engine.translation_of("배").await.as_deref(), Some("pear"));
    assert_eq!(engine.translation_of("물").await.as_deref(), Some("water"));
}

#[tokio::test(start_paused = true)]
async fn hover_request_overtakes_background_queue() {
    let (engine, api, _events) = engine(FakeApi {
        tokens: vec![
            token("가", "가", "NNG"),
            token("나", "나", "NNG"),
            token("다", "다", "NNG"),
        ],
        gate: Some(Semaphore::new(0)),
        ..Default::default()
    });

    let text = "가 나 다";
    engine
        .annotate_text(vec![Node::Text(text.to_string())], text)
        .await;
    settle().await;
    assert_eq!(api.translated(), vec!["다"]);

    engine.request_translation("가").await;
    api.gate.as_ref().unwrap().add_permits(3);
    settle().await;

    assert_eq!(api.translated(), vec!["다", "가", "나"]);
    assert_eq!(api.max_translating(), 1);
}
