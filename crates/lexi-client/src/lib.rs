mod api;
mod error;
mod retry;
mod session;
mod transport;

#[cfg(test)]
mod tests;

pub use api::{Delivery, HttpApi, LexiApi, SavedWord, VocabularyEntry};
pub use error::{ClientError, TransportError};
pub use retry::RetryPolicy;
pub use session::{Session, Tokens};
pub use transport::{ApiRequest, ApiResponse, Body, Method, ReqwestTransport, Transport};

use std::sync::Arc;

use lexi_config::Config;

/// HTTP API over the real network stack, configured from `config`
pub fn connect(config: &Config) -> Result<HttpApi, ClientError> {
    if config.network.hosts.is_empty() {
        return Err(ClientError::NoHosts);
    }

    let transport = ReqwestTransport::new(config.network.timeout())?;
    let session = Session::new(config, Arc::new(transport));

    tracing::info!("API hosts: {:?}", config.network.hosts);
    Ok(HttpApi::new(Arc::new(session), config.endpoints.clone()))
}
