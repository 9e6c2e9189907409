use std::sync::Arc;

use async_trait::async_trait;
use lexi_config::endpoints::EndpointsConfig;
use lexi_types::{RecallInteraction, Token};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ClientError;
use crate::session::Session;
use crate::transport::ApiRequest;

/// How a write should be delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delivery {
    #[default]
    Normal,
    /// Must survive teardown of the surface that issued it
    KeepAlive,
}

/// A word to add to the user's vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VocabularyEntry {
    pub word: String,
    pub pos: String,
    pub grammar_info: String,
    pub translation: String,
}

impl VocabularyEntry {
    fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("korean_word".to_string(), self.word.clone()),
            ("pos".to_string(), self.pos.clone()),
            ("grammar_info".to_string(), self.grammar_info.clone()),
            ("translation".to_string(), self.translation.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedWord {
    pub color: Option<String>,
}

/// Remote analyzer and learner store
#[async_trait]
pub trait LexiApi: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Vec<Token>, ClientError>;

    /// Pre-rendered markup with one `.interactive-word` element per token
    async fn analyze_html(&self, text: &str) -> Result<String, ClientError>;

    /// Empty when the translator has nothing for the word
    async fn translate_word(&self, word: &str) -> Result<String, ClientError>;

    async fn translate_sentence(&self, sentence: &str) -> Result<String, ClientError>;

    async fn track_hover(&self, word: &str, duration_ms: u64) -> Result<(), ClientError>;

    async fn track_sentence_hover(&self, text: &str, duration_ms: u64) -> Result<(), ClientError>;

    async fn batch_recall(
        &self,
        interactions: &[RecallInteraction],
        delivery: Delivery,
    ) -> Result<(), ClientError>;

    async fn save_vocabulary(&self, entry: &VocabularyEntry) -> Result<SavedWord, ClientError>;

    async fn finish_analysis(&self, text: &str) -> Result<(), ClientError>;
}

/// [`LexiApi`] over HTTP through a [`Session`]
#[derive(Clone)]
pub struct HttpApi {
    session: Arc<Session>,
    endpoints: EndpointsConfig,
}

impl HttpApi {
    pub fn new(session: Arc<Session>, endpoints: EndpointsConfig) -> Self {
        Self { session, endpoints }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Execute and decode, mapping auth rejections and non-2xx statuses
    async fn invoke<T>(&self, request: ApiRequest) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let response = self.session.execute(&request).await?;

        match response.status {
            401 | 403 => Err(ClientError::AuthRequired),
            _ if !response.is_success() => Err(ClientError::Status {
                status: response.status,
            }),
            _ => response.json(),
        }
    }
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    #[serde(default, alias = "words")]
    tokens: Vec<Token>,
}

#[derive(Deserialize)]
struct AnalyzeHtmlResponse {
    #[serde(default)]
    html: String,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translation: Option<String>,
}

/// Acknowledgement shared by the write endpoints
#[derive(Deserialize)]
struct Ack {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

fn default_success() -> bool {
    true
}

impl Ack {
    fn into_result(self) -> Result<Self, ClientError> {
        if self.success {
            return Ok(self);
        }

        let reason = self
            .error
            .or(self.message)
            .unwrap_or_else(|| "request rejected".to_string());
        Err(ClientError::Api(reason))
    }
}

#[async_trait]
impl LexiApi for HttpApi {
    async fn analyze(&self, text: &str) -> Result<Vec<Token>, ClientError> {
        let request =
            ApiRequest::post_json(&self.endpoints.analyze, json!({ "text": text })).with_fallback();
        let response: AnalyzeResponse = self.invoke(request).await?;

        tracing::debug!("Analyzer returned {} tokens", response.tokens.len());
        Ok(response.tokens)
    }

    async fn analyze_html(&self, text: &str) -> Result<String, ClientError> {
        let request = ApiRequest::post_json(&self.endpoints.analyze_html, json!({ "text": text }))
            .with_fallback();
        let response: AnalyzeHtmlResponse = self.invoke(request).await?;
        Ok(response.html)
    }

    async fn translate_word(&self, word: &str) -> Result<String, ClientError> {
        let request =
            ApiRequest::post_json(&self.endpoints.translate_word, json!({ "word": word }))
                .with_fallback();
        let response: TranslateResponse = self.invoke(request).await?;
        Ok(response.translation.unwrap_or_default())
    }

    async fn translate_sentence(&self, sentence: &str) -> Result<String, ClientError> {
        let request = ApiRequest::post_json(
            &self.endpoints.translate_sentence,
            json!({ "sentence": sentence }),
        )
        .with_fallback();
        let response: TranslateResponse = self.invoke(request).await?;
        Ok(response.translation.unwrap_or_default())
    }

    async fn track_hover(&self, word: &str, duration_ms: u64) -> Result<(), ClientError> {
        let request = ApiRequest::post_json(
            &self.endpoints.track_hover,
            json!({ "korean_word": word, "duration": duration_ms }),
        );
        let ack: Ack = self.invoke(request).await?;
        ack.into_result().map(|_| ())
    }

    async fn track_sentence_hover(&self, text: &str, duration_ms: u64) -> Result<(), ClientError> {
        let request = ApiRequest::post_json(
            &self.endpoints.track_sentence_hover,
            json!({ "punctuation": text, "duration": duration_ms }),
        );
        let ack: Ack = self.invoke(request).await?;
        ack.into_result().map(|_| ())
    }

    async fn batch_recall(
        &self,
        interactions: &[RecallInteraction],
        delivery: Delivery,
    ) -> Result<(), ClientError> {
        let mut request = ApiRequest::post_json(
            &self.endpoints.batch_recall,
            json!({ "interactions": interactions }),
        );
        if delivery == Delivery::KeepAlive {
            request = request.with_keepalive();
        }

        let ack: Ack = self.invoke(request).await?;
        ack.into_result().map(|_| ())
    }

    async fn save_vocabulary(&self, entry: &VocabularyEntry) -> Result<SavedWord, ClientError> {
        let request = ApiRequest::post_json(
            &self.endpoints.save_vocabulary,
            json!({
                "korean_word": entry.word,
                "pos": entry.pos,
                "grammar_info": entry.grammar_info,
                "translation": entry.translation,
            }),
        );

        let ack: Ack = match self.invoke(request).await {
            Err(ClientError::AuthRequired) => {
                tracing::info!("Bearer save rejected, retrying with session cookie");
                let form =
                    ApiRequest::post_form(&self.endpoints.save_vocabulary_session, entry.fields())
                        .anonymous();
                self.invoke(form).await?
            }
            other => other?,
        };

        let ack = ack.into_result()?;
        Ok(SavedWord {
            color: ack.color.filter(|c| !c.is_empty()),
        })
    }

    async fn finish_analysis(&self, text: &str) -> Result<(), ClientError> {
        let request = ApiRequest::post_json(&self.endpoints.finish_analysis, json!({ "text": text }))
            .with_keepalive();
        let ack: Ack = self.invoke(request).await?;
        ack.into_result().map(|_| ())
    }
}
