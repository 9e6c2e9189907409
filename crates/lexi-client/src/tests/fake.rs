use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{ApiRequest, ApiResponse, RetryPolicy, Session, Transport, TransportError};

#[derive(Debug, Clone)]
pub struct Call {
    pub host: String,
    pub request: ApiRequest,
    pub bearer: Option<String>,
}

type Responder =
    dyn Fn(&str, &ApiRequest, Option<&str>) -> Result<ApiResponse, TransportError> + Send + Sync;

/// In-memory transport answering through a closure and recording every call
pub struct FakeTransport {
    responder: Box<Responder>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&str, &ApiRequest, Option<&str>) -> Result<ApiResponse, TransportError>
            + Send
            + Sync
            + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.request.path == path)
            .collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(
        &self,
        host: &str,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        self.calls.lock().unwrap().push(Call {
            host: host.to_string(),
            request: request.clone(),
            bearer: bearer.map(str::to_string),
        });

        // let concurrent requests interleave
        tokio::task::yield_now().await;

        (self.responder)(host, request, bearer)
    }
}

pub const REFRESH: &str = "/api/v1/token/refresh/";

pub fn session(hosts: &[&str], transport: Arc<FakeTransport>) -> Session {
    Session::with_hosts(
        hosts.iter().map(|h| h.to_string()).collect(),
        REFRESH,
        RetryPolicy::default(),
        transport,
    )
}

pub fn json(status: u16, body: serde_json::Value) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::new(status, body.to_string()))
}
