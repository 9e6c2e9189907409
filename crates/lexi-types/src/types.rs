use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One analyzed unit of text as returned by the analyzer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Token {
    pub surface: String,
    /// Dictionary form
    pub base: String,
    /// Sejong part-of-speech tag, possibly compound (`VV+EP`)
    pub pos: String,
    pub translation: String,
    #[serde(rename = "in_vocab")]
    pub in_vocabulary: bool,
    #[serde(rename = "color")]
    pub highlight_color: Option<String>,
    pub grammar_info: String,
}

impl Token {
    /// Identity key: base form when present, surface otherwise
    pub fn key(&self) -> &str {
        let base = self.base.trim();
        if base.is_empty() {
            self.surface.trim()
        } else {
            base
        }
    }
}

/// Relative box, every field in `[0, 1]` of the image size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrItem {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "boundingBox", default)]
    pub bounding_box: Option<BoundingBox>,
}

/// A `(word, had_lookup)` observation for the recall model.
/// On the wire it is a two element array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "(String, bool)", from = "(String, bool)")]
pub struct RecallInteraction {
    pub word: String,
    pub had_lookup: bool,
}

impl RecallInteraction {
    pub fn new(word: impl Into<String>, had_lookup: bool) -> Self {
        Self {
            word: word.into(),
            had_lookup,
        }
    }
}

impl From<RecallInteraction> for (String, bool) {
    fn from(value: RecallInteraction) -> Self {
        (value.word, value.had_lookup)
    }
}

impl From<(String, bool)> for RecallInteraction {
    fn from((word, had_lookup): (String, bool)) -> Self {
        Self { word, had_lookup }
    }
}

/// Handle of a mounted overlay element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lexi-word-{}", self.0.simple())
    }
}

/// Why a session is being closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishTrigger {
    PageHide,
    VisibilityHidden,
    NavigationConfirmed,
    /// User pressed "finish analysis"
    Explicit,
}

/// Host -> engine
#[derive(Debug, Clone)]
pub enum AppEvent {
    HoverStart(ElementId),
    HoverEnd(ElementId),
    Click(ElementId),
    SentenceHoverStart(String),
    SentenceHoverEnd(String),
    Finish(FinishTrigger),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Engine -> host
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Notify {
        level: NotificationLevel,
        message: String,
    },
    TranslationResolved {
        word: String,
        translation: String,
    },
    SentenceTranslated {
        sentence: String,
        translation: String,
    },
    VocabularySaved {
        word: String,
        color: String,
    },
    /// Overlays for a pass are mounted; hosts may bind finish controls now
    AnalysisReady {
        overlays: usize,
    },
    /// An analysis pass found nothing interactive
    NothingInteractive,
    SessionFinished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_key_prefers_base() {
        let token = Token {
            surface: "먹었다".to_string(),
            base: "먹다".to_string(),
            ..Default::default()
        };
        assert_eq!(token.key(), "먹다");

        let bare = Token {
            surface: "학교".to_string(),
            base: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(bare.key(), "학교");
    }

    #[test]
    fn token_reads_analyzer_field_names() {
        let json = r#"{"surface":"책","base":"책","pos":"NNG","in_vocab":true,"color":"rgba(255, 255, 0, 0.9)"}"#;
        let token: Token = serde_json::from_str(json).unwrap();
        assert!(token.in_vocabulary);
        assert_eq!(token.highlight_color.as_deref(), Some("rgba(255, 255, 0, 0.9)"));
        assert!(token.translation.is_empty());
    }

    #[test]
    fn recall_interaction_is_a_pair_on_the_wire() {
        let json = serde_json::to_string(&RecallInteraction::new("사과", false)).unwrap();
        assert_eq!(json, r#"["사과",false]"#);

        let back: RecallInteraction = serde_json::from_str(r#"["배",true]"#).unwrap();
        assert_eq!(back, RecallInteraction::new("배", true));
    }
}
