#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Invalid request: {0}")]
    Invalid(String),
}

impl TransportError {
    /// Failures worth another attempt after a backoff
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            TransportError::Connection(_) => true,
            TransportError::Invalid(_) => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Authentication required")]
    AuthRequired,

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("No API host configured")]
    NoHosts,
}

impl ClientError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::AuthRequired)
    }
}
