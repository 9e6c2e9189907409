use serde::{Deserialize, Serialize};

fn default_analyze() -> String {
    "/analysis/api/v1/analyze/".to_string()
}

fn default_analyze_html() -> String {
    "/analysis/api/v1/analyze-html/".to_string()
}

fn default_translate_word() -> String {
    "/analysis/translate-word/".to_string()
}

fn default_translate_sentence() -> String {
    "/analysis/api/translate-sentence".to_string()
}

fn default_track_hover() -> String {
    "/analysis/track-hover/".to_string()
}

fn default_track_sentence_hover() -> String {
    "/analysis/track-sentence-hover/".to_string()
}

fn default_batch_recall() -> String {
    "/analysis/batch-update-recalls/".to_string()
}

fn default_save_vocabulary() -> String {
    "/users/api/v1/save-vocabulary/".to_string()
}

fn default_save_vocabulary_session() -> String {
    "/users/save-vocabulary/".to_string()
}

fn default_finish_analysis() -> String {
    "/analysis/finish-analysis/".to_string()
}

fn default_refresh_token() -> String {
    "/api/v1/token/refresh/".to_string()
}

/// Paths of the remote analyzer and store, relative to a host
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EndpointsConfig {
    #[serde(default = "default_analyze")]
    pub analyze: String,
    #[serde(default = "default_analyze_html")]
    pub analyze_html: String,
    #[serde(default = "default_translate_word")]
    pub translate_word: String,
    #[serde(default = "default_translate_sentence")]
    pub translate_sentence: String,
    #[serde(default = "default_track_hover")]
    pub track_hover: String,
    #[serde(default = "default_track_sentence_hover")]
    pub track_sentence_hover: String,
    #[serde(default = "default_batch_recall")]
    pub batch_recall: String,
    #[serde(default = "default_save_vocabulary")]
    pub save_vocabulary: String,
    /// Cookie-session variant used when the bearer path is rejected
    #[serde(default = "default_save_vocabulary_session")]
    pub save_vocabulary_session: String,
    #[serde(default = "default_finish_analysis")]
    pub finish_analysis: String,
    #[serde(default = "default_refresh_token")]
    pub refresh_token: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            analyze: default_analyze(),
            analyze_html: default_analyze_html(),
            translate_word: default_translate_word(),
            translate_sentence: default_translate_sentence(),
            track_hover: default_track_hover(),
            track_sentence_hover: default_track_sentence_hover(),
            batch_recall: default_batch_recall(),
            save_vocabulary: default_save_vocabulary(),
            save_vocabulary_session: default_save_vocabulary_session(),
            finish_analysis: default_finish_analysis(),
            refresh_token: default_refresh_token(),
        }
    }
}
