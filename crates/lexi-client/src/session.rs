use std::sync::Arc;

use lexi_config::Config;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::{Mutex, RwLock};

use crate::error::ClientError;
use crate::retry::RetryPolicy;
use crate::transport::{ApiRequest, ApiResponse, Transport};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    pub access: String,
    pub refresh: Option<String>,
}

impl Tokens {
    pub fn new(access: impl Into<String>, refresh: Option<String>) -> Self {
        Self {
            access: access.into(),
            refresh,
        }
    }
}

#[derive(Deserialize)]
struct RefreshResponse {
    #[serde(default, alias = "access_token")]
    access: String,
}

/// Authenticated access to an ordered list of API hosts.
///
/// A 401 on an authenticated request triggers one token refresh followed by
/// one retry. Fallback-eligible requests walk the host list and move on only
/// when a host answers 404.
pub struct Session {
    transport: Arc<dyn Transport>,
    hosts: Vec<String>,
    refresh_path: String,
    retry: RetryPolicy,
    tokens: RwLock<Option<Tokens>>,
    refresh_gate: Mutex<()>,
}

impl Session {
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self::with_hosts(
            config.network.hosts.clone(),
            config.endpoints.refresh_token.clone(),
            RetryPolicy::from_config(&config.network),
            transport,
        )
    }

    pub fn with_hosts(
        hosts: Vec<String>,
        refresh_path: impl Into<String>,
        retry: RetryPolicy,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            hosts,
            refresh_path: refresh_path.into(),
            retry,
            tokens: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub async fn login(&self, tokens: Tokens) {
        *self.tokens.write().await = Some(tokens);
        tracing::info!("Session authenticated");
    }

    pub async fn logout(&self) {
        *self.tokens.write().await = None;
        tracing::info!("Session cleared");
    }

    pub async fn access_token(&self) -> Option<String> {
        self.tokens.read().await.as_ref().map(|t| t.access.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let Some(primary) = self.hosts.first() else {
            return Err(ClientError::NoHosts);
        };

        if !request.fallback {
            return self.execute_on(primary, request).await;
        }

        let mut last = None;
        for host in &self.hosts {
            let response = self.execute_on(host, request).await?;
            if !response.is_not_found() {
                return Ok(response);
            }
            tracing::debug!("{}{} not found, trying next host", host, request.path);
            last = Some(response);
        }

        last.ok_or(ClientError::NoHosts)
    }

    async fn execute_on(&self, host: &str, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let token = if request.authenticated {
            self.access_token().await
        } else {
            None
        };

        let response = self.send(host, request, token.as_deref()).await?;
        if response.status != 401 || !request.authenticated {
            return Ok(response);
        }

        match self.refresh(token.as_deref()).await {
            Some(fresh) => self.send(host, request, Some(&fresh)).await,
            None => Ok(response),
        }
    }

    async fn send(
        &self,
        host: &str,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let response = self
            .retry
            .run(|| self.transport.send(host, request, bearer))
            .await?;
        Ok(response)
    }

    /// Exchange the refresh token for a new access token. Concurrent callers
    /// share one exchange: whoever waited on the gate reuses a token that
    /// changed in the meantime.
    async fn refresh(&self, stale: Option<&str>) -> Option<String> {
        let _gate = self.refresh_gate.lock().await;

        let current = self.access_token().await;
        if current.is_some() && current.as_deref() != stale {
            return current;
        }

        let refresh = self
            .tokens
            .read()
            .await
            .as_ref()
            .and_then(|t| t.refresh.clone())?;
        let primary = self.hosts.first()?;

        let request = ApiRequest::post_json(&self.refresh_path, json!({ "refresh": refresh })).anonymous();
        let response = match self.send(primary, &request, None).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                tracing::warn!("Token refresh rejected: HTTP {}", response.status);
                return None;
            }
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                return None;
            }
        };

        let access = match response.json::<RefreshResponse>() {
            Ok(body) if !body.access.is_empty() => body.access,
            Ok(_) => {
                tracing::warn!("Token refresh returned no access token");
                return None;
            }
            Err(e) => {
                tracing::warn!("Token refresh response unreadable: {}", e);
                return None;
            }
        };

        let mut tokens = self.tokens.write().await;
        let stored = tokens.as_mut()?;
        stored.access = access.clone();

        tracing::debug!("Access token refreshed");
        Some(access)
    }
}
