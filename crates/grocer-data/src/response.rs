//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// The API wraps every payload as `{ "status": "success", "data": ... }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Parse the body as an API envelope and return its `data`.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        self.json::<ApiEnvelope<T>>().map(|envelope| envelope.data)
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The server's error message: the JSON `message` field when present,
    /// otherwise the raw body, otherwise the status code.
    pub fn error_message(&self) -> String {
        if let Ok(body) = serde_json::from_slice::<ErrorBody>(&self.body) {
            return body.message;
        }
        match self.text() {
            Ok(text) if !text.trim().is_empty() => text,
            _ => format!("Request failed with status {}", self.status),
        }
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::HttpError {
                status: self.status,
                message: self.error_message(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(404, b"").is_success());
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_response_envelope_data() {
        let resp = make_response(200, br#"{"status":"success","data":[1,2,3]}"#);
        let data: Vec<i32> = resp.data().unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn test_response_envelope_missing_data() {
        let resp = make_response(200, br#"{"status":"success"}"#);
        assert!(resp.data::<Vec<i32>>().is_err());
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/html".to_string());
        let resp = Response::new(200, headers, Vec::new());
        assert_eq!(resp.header("content-type"), Some("text/html"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_error_for_status_uses_server_message() {
        let resp = make_response(
            404,
            br#"{"status":"fail","message":"No product found with that ID"}"#,
        );
        match resp.error_for_status() {
            Err(FetchError::HttpError { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "No product found with that ID");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(make_response(502, b"Bad Gateway").error_message(), "Bad Gateway");
        assert_eq!(
            make_response(500, b"").error_message(),
            "Request failed with status 500"
        );
    }
}
