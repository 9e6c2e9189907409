use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexi_client::{ClientError, LexiApi};
use lexi_config::Config;
use lexi_core::html::tokens_from_html;
use lexi_core::ocr::{OcrLayout, OcrOverlay};
use lexi_core::{CandidateIndex, Node, OverlayAttrs, OverlayMapper};
use lexi_types::{ElementId, EngineEvent, FinishTrigger, NotificationLevel, OcrItem, Token};
use tokio::sync::Mutex;

use crate::state::EngineState;

/// Annotation and interaction engine for one reading session.
///
/// Cheap to clone; clones share state. Outcomes the host should show are
/// published on the event channel returned by [`Engine::new`].
#[derive(Clone)]
pub struct Engine {
    pub(crate) api: Arc<dyn LexiApi>,
    pub(crate) config: Arc<Config>,
    pub(crate) state: Arc<Mutex<EngineState>>,
    events: AsyncSender<EngineEvent>,
}

impl Engine {
    pub fn new(api: Arc<dyn LexiApi>, config: Config) -> (Self, AsyncReceiver<EngineEvent>) {
        let (events, rx) = kanal::unbounded_async();

        let engine = Self {
            api,
            config: Arc::new(config),
            state: Arc::new(Mutex::new(EngineState::new())),
            events,
        };
        (engine, rx)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze `text` and wrap every interactive word found in `nodes`
    pub async fn annotate_text(&self, nodes: Vec<Node>, text: &str) -> Vec<Node> {
        match self.api.analyze(text).await {
            Ok(tokens) => self.annotate_tokens(nodes, &tokens).await,
            Err(e) => {
                self.report_failure("analyze text", &e);
                nodes
            }
        }
    }

    /// Same as [`Engine::annotate_text`], through the pre-rendered markup
    /// endpoint
    pub async fn annotate_via_html(&self, nodes: Vec<Node>, text: &str) -> Vec<Node> {
        match self.api.analyze_html(text).await {
            Ok(html) => self.annotate_from_html(nodes, &html).await,
            Err(e) => {
                self.report_failure("analyze text", &e);
                nodes
            }
        }
    }

    /// Annotate from markup the analyzer already rendered
    pub async fn annotate_from_html(&self, nodes: Vec<Node>, html: &str) -> Vec<Node> {
        let tokens = tokens_from_html(html);
        self.annotate_tokens(nodes, &tokens).await
    }

    async fn annotate_tokens(&self, nodes: Vec<Node>, tokens: &[Token]) -> Vec<Node> {
        let index = CandidateIndex::from_tokens(tokens);
        let annotated = OverlayMapper::hangul(&index).annotate(nodes);

        let mounted = self
            .mount(annotated.overlays().map(|o| (o.id, &o.attrs)))
            .await;

        tracing::info!(
            "Annotation pass: {} tokens, {} new overlays, {} mounted",
            tokens.len(),
            annotated.created,
            mounted
        );
        self.announce(mounted).await;

        annotated.nodes
    }

    /// Analyze the joined OCR text once and place an overlay over each
    /// interactive word found in the image
    pub async fn annotate_ocr(&self, items: Vec<OcrItem>) -> Vec<OcrOverlay> {
        let mut layout = OcrLayout::new(items);

        let tokens = match self.api.analyze(layout.full_text()).await {
            Ok(tokens) => tokens,
            Err(e) => {
                self.report_failure("analyze image text", &e);
                return Vec::new();
            }
        };
        let overlays = layout.place_all(&tokens);

        let mounted = self.mount(overlays.iter().map(|o| (o.id, &o.attrs))).await;
        tracing::info!(
            "OCR pass: {} tokens, {} overlays placed",
            tokens.len(),
            mounted
        );
        self.announce(mounted).await;

        overlays
    }

    /// Replace the mounted overlays with `overlays`; returns how many
    async fn mount<'a, I>(&self, overlays: I) -> usize
    where
        I: Iterator<Item = (ElementId, &'a OverlayAttrs)>,
    {
        let mut state = self.state.lock().await;
        state.store.unmount_all();

        let mut count = 0;
        for (id, attrs) in overlays {
            state.store.mount(id, attrs);
            if attrs.in_vocabulary {
                state.displayed_vocab_words.insert(attrs.original.clone());
            }
            count += 1;
        }
        count
    }

    async fn announce(&self, mounted: usize) {
        if mounted == 0 {
            self.emit(EngineEvent::NothingInteractive);
            return;
        }

        self.emit(EngineEvent::AnalysisReady { overlays: mounted });
        self.queue_all_untranslated().await;
    }

    /// Learner is done with the text: record it, then close the session.
    /// A rejected write leaves the session open.
    pub async fn finish_analysis(&self, text: &str) {
        if let Err(e) = self.api.finish_analysis(text).await {
            self.report_failure("finish the analysis", &e);
            return;
        }

        self.finish_session(FinishTrigger::Explicit).await;
        self.notify(NotificationLevel::Success, "Analysis finished");
    }

    pub async fn attrs_for(&self, id: ElementId) -> Option<OverlayAttrs> {
        self.state.lock().await.store.attrs_for(id)
    }

    pub async fn translation_of(&self, word: &str) -> Option<String> {
        self.state
            .lock()
            .await
            .store
            .entry(word)
            .map(|entry| entry.translation.clone())
            .filter(|t| !t.is_empty())
    }

    pub async fn is_session_finished(&self) -> bool {
        self.state.lock().await.session_finished
    }

    pub(crate) fn emit(&self, event: EngineEvent) {
        if let Err(e) = self.events.try_send(event) {
            tracing::debug!("Engine event dropped: {}", e);
        }
    }

    pub(crate) fn notify(&self, level: NotificationLevel, message: impl Into<String>) {
        self.emit(EngineEvent::Notify {
            level,
            message: message.into(),
        });
    }

    pub(crate) fn report_failure(&self, action: &str, error: &ClientError) {
        if error.is_auth() {
            self.notify(NotificationLevel::Warning, "Please login to continue");
            return;
        }

        tracing::error!("Failed to {}: {}", action, error);
        self.notify(NotificationLevel::Error, format!("Failed to {}", action));
    }
}
