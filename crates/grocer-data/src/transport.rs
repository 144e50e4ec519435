//! The wire underneath [`FetchClient`](crate::FetchClient).

use async_trait::async_trait;
use std::collections::HashMap;

use crate::request::RequestBuilder;
use crate::response::Response;
use crate::FetchError;

/// Executes a prepared request.
///
/// Request signing and token refresh belong to implementations of this
/// trait; the client above it only builds requests and reads responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Transport backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, TLS roots, timeouts).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let mut builder = self.client.request(request.method.clone(), request.url.as_str());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::RequestError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::ParseError(e.to_string()))?
            .to_vec();

        Ok(Response::new(status, headers, body))
    }
}
