//! HTTP client and network collaborators for the Groceteria storefront.
//!
//! The state layer treats the network as an opaque service: "a function that
//! performs operation X and returns or fails". This crate provides that
//! service:
//!
//! - [`Fetch`] / [`Mutate`] - per-domain collaborator traits
//! - [`RestResource`] - collaborator over the REST API
//! - [`InMemoryResource`] - seeded collaborator for tests and offline use
//! - [`FetchClient`] - JSON request builder over a pluggable [`Transport`]
//! - [`ApiError`] - the failure taxonomy every collaborator reports
//!
//! # Example
//!
//! ```rust,ignore
//! use grocer_data::{FetchClient, ReqwestTransport, RestResource, Fetch};
//! use grocer_commerce::catalog::Product;
//!
//! let client = FetchClient::new(ReqwestTransport::new())
//!     .with_base_url("http://localhost:8000/api/v1");
//! let products: RestResource<Product> = RestResource::new(client, "/products");
//! let all = products.fetch_collection().await?;
//! ```

mod error;
mod memory;
mod request;
mod resource;
mod response;
mod transport;

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;

pub use error::{ApiError, FetchError};
pub use memory::{Gate, InMemoryResource, InMemorySession, Materialize};
pub use request::RequestBuilder;
pub use resource::{Fetch, Mutate, RestResource, RestSession, Session};
pub use response::{ApiEnvelope, Response};
pub use transport::{ReqwestTransport, Transport};

/// HTTP client for making API requests.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl FetchClient {
    /// Create a new HTTP client over a transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Create a client over an already shared transport.
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_bearer_token(self, token: impl AsRef<str>) -> Self {
        self.with_default_header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::GET, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::POST, url)
    }

    /// Create a PATCH request.
    pub fn patch(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::PATCH, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::DELETE, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url).accept("application/json");
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        tracing::trace!(
            method = %self.builder.method,
            url = %self.builder.url,
            "sending request"
        );
        self.transport.execute(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApiError, Fetch, FetchClient, FetchError, InMemoryResource, Mutate, RestResource,
        Session,
    };
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    /// Transport that records requests and replays canned responses.
    #[derive(Default)]
    pub struct ScriptedTransport {
        pub requests: Mutex<Vec<RequestBuilder>>,
        pub responses: Mutex<Vec<Response>>,
    }

    impl ScriptedTransport {
        pub fn respond(status: u16, body: &str) -> Arc<Self> {
            let transport = Self::default();
            transport
                .responses
                .try_lock()
                .expect("fresh mutex")
                .push(Response::new(status, HashMap::new(), body.as_bytes().to_vec()));
            Arc::new(transport)
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.requests.lock().await.push(request);
            self.responses
                .lock()
                .await
                .pop()
                .ok_or_else(|| FetchError::RequestError("connection refused".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedTransport;
    use super::*;

    #[tokio::test]
    async fn test_base_url_and_default_headers() {
        let transport = ScriptedTransport::respond(200, "{}");
        let client = FetchClient::from_shared(transport.clone())
            .with_base_url("http://localhost:8000/api/v1/")
            .with_bearer_token("t0k");

        client.get("/products").send().await.unwrap();

        let requests = transport.requests.lock().await;
        assert_eq!(requests[0].url(), "http://localhost:8000/api/v1/products");
        assert_eq!(
            requests[0].headers().get("Authorization").map(String::as_str),
            Some("Bearer t0k")
        );
    }

    #[tokio::test]
    async fn test_absolute_url_bypasses_base() {
        let transport = ScriptedTransport::respond(200, "{}");
        let client = FetchClient::from_shared(transport.clone()).with_base_url("http://api");

        client.get("https://cdn.example.com/x").send().await.unwrap();

        assert_eq!(
            transport.requests.lock().await[0].url(),
            "https://cdn.example.com/x"
        );
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces() {
        let client = FetchClient::from_shared(Arc::new(ScriptedTransport::default()));
        let err = client.get("/news").send().await.unwrap_err();
        assert!(matches!(err, FetchError::RequestError(_)));
    }
}
