//! Transport collaborator seam.
//!
//! # Data Flow
//! ```text
//! dispatch pipeline
//!     → Request (method, absolute URL, headers, body or query)
//!     → auth handler mutates the Request
//!     → Transport::issue (blocking, exactly once per dispatch)
//!     → Response (status, headers, raw body bytes)
//!     → response handler
//! ```
//!
//! # Design Decisions
//! - The tree never talks HTTP directly; everything goes through the
//!   `Transport` trait so tests can substitute a scripted implementation
//! - Bodies stay raw bytes; structured decoding is best-effort and on demand

pub mod http;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::method::Method;

pub use http::HttpTransport;

/// Header map attached to nodes, endpoints, and requests.
///
/// Names are kept as inserted; the last insert for a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Insert a header, replacing any previous value for the name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(name.into(), value.into());
    }

    /// Look up a header value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    /// Whether a header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Iterate over all headers.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// An outgoing request, fully resolved by the dispatch pipeline.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Absolute URL: cumulative base URL plus the substituted path.
    pub url: String,
    pub headers: Headers,
    /// JSON body for POST/PUT/PATCH dispatches with leftover parameters.
    pub body: Option<Value>,
    /// Query string pairs for every other method.
    pub query: Vec<(String, String)>,
}

impl Request {
    /// Create a bare request with no headers or payload.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
            query: Vec::new(),
        }
    }

    /// Attach a header, consuming and returning the request. Convenient in
    /// auth handlers:
    ///
    /// ```
    /// # use declarest::Request;
    /// let auth = |req: Request| req.with_header("Authorization", "Bearer token");
    /// ```
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A raw transport response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Final URL the transport talked to.
    pub url: String,
    pub headers: Headers,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// Success/failure classification: true for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as (lossy) UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Best-effort structured decode: parsed JSON, or a string of the raw
    /// bytes when the body is not valid JSON.
    pub fn json(&self) -> Value {
        decode_json_lossy(&self.body)
    }

    /// Typed decode of the body.
    pub fn json_as<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// The transport collaborator: issues one blocking HTTP round trip.
///
/// The dispatch pipeline applies the resolved auth handler to `request`
/// before calling `issue`, so implementations only move bytes.
pub trait Transport: Send + Sync {
    fn issue(&self, request: Request) -> Result<Response>;
}

/// Parse bytes as JSON, falling back to a string of the raw bytes.
pub(crate) fn decode_json_lossy(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_last_insert_wins() {
        let mut headers = Headers::new();
        headers.insert("X-Token", "1");
        headers.insert("X-Token", "2");
        assert_eq!(headers.get("X-Token"), Some("2"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_response_success_classification() {
        let mut response = Response {
            status: 200,
            url: String::new(),
            headers: Headers::new(),
            body: Vec::new(),
        };
        assert!(response.is_success());
        response.status = 299;
        assert!(response.is_success());
        response.status = 301;
        assert!(!response.is_success());
        response.status = 404;
        assert!(!response.is_success());
    }

    #[test]
    fn test_json_decode_falls_back_to_raw() {
        let response = Response {
            status: 200,
            url: String::new(),
            headers: Headers::new(),
            body: b"not json".to_vec(),
        };
        assert_eq!(response.json(), Value::from("not json"));

        let response = Response {
            body: br#"{"id": 3}"#.to_vec(),
            ..response
        };
        assert_eq!(response.json()["id"], 3);
    }

    #[test]
    fn test_request_with_header() {
        let request =
            Request::new(Method::Get, "http://localhost/x").with_header("X-Custom", "1");
        assert_eq!(request.headers.get("X-Custom"), Some("1"));
    }
}
