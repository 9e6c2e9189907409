use serde::{Deserialize, Serialize};

use self::endpoints::EndpointsConfig;
use self::network::NetworkConfig;
use self::tracking::TrackingConfig;

pub mod endpoints;
pub mod network;
pub mod tracking;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub tracking: TrackingConfig,
    pub endpoints: EndpointsConfig,
}

impl Config {
    /// Build from `LEXI_*` environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            network: NetworkConfig::new(),
            tracking: TrackingConfig::new(),
            endpoints: EndpointsConfig::default(),
        }
    }

    /// Same as [`Config::new`] but loads a `.env` file first when one exists
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::new()
    }

    /// Parse a JSON profile; missing sections and fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_keeps_defaults() {
        let config = Config::from_json(
            r#"{"network":{"hosts":["https://a.example","https://b.example"]},"tracking":{"recall_debounce_ms":250}}"#,
        )
        .unwrap();

        assert_eq!(config.network.primary_host(), Some("https://a.example"));
        assert_eq!(config.network.max_attempts, 2);
        assert_eq!(config.tracking.recall_debounce_ms, 250);
        assert_eq!(config.tracking.hover_threshold_ms, 1000);
        assert_eq!(config.endpoints.batch_recall, "/analysis/batch-update-recalls/");
        assert_eq!(
            config.endpoints.translate_sentence,
            "/analysis/api/translate-sentence"
        );
    }
}
