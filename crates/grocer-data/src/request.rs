//! HTTP request builder.

use crate::FetchError;
use http::Method;
use serde::Serialize;
use std::collections::HashMap;

/// A transport-agnostic description of one HTTP request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_sets_content_type() {
        let req = RequestBuilder::new(Method::POST, "/news")
            .json(&serde_json::json!({"title": "Hi"}))
            .unwrap();
        assert_eq!(
            req.headers().get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(req.body(), Some(br#"{"title":"Hi"}"#.as_slice()));
    }

    #[test]
    fn test_bearer_auth() {
        let req = RequestBuilder::new(Method::GET, "/users/me").bearer_auth("abc");
        assert_eq!(
            req.headers().get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
    }
}
