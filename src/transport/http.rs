//! Default HTTP transport over a blocking reqwest client.
//!
//! # Responsibilities
//! - Translate the resolved `Request` into a real HTTP round trip
//! - Apply the configured timeout and User-Agent
//! - Map transport-level failures to `Error::Transport`

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::method::Method;
use crate::transport::{Headers, Request, Response, Transport};

/// Blocking HTTP transport used by default for every client root.
///
/// Holds a connection-reusing [`reqwest::blocking::Client`]; clones share it.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport with reqwest's default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Create a transport honoring the timeout and User-Agent from a
    /// [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs));
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder.build().map_err(Error::transport)?;
        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn issue(&self, request: Request) -> Result<Response> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(Error::transport)?;

        let status = response.status().as_u16();
        let url = response.url().to_string();
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str(), value);
            }
        }
        let body = response.bytes().map_err(Error::transport)?.to_vec();

        Ok(Response {
            status,
            url,
            headers,
            body,
        })
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
        Method::Options => reqwest::Method::OPTIONS,
        Method::Head => reqwest::Method::HEAD,
        Method::Connect => reqwest::Method::CONNECT,
        Method::Trace => reqwest::Method::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_mapping_is_canonical() {
        for method in Method::ALL {
            assert_eq!(to_reqwest_method(method).as_str(), method.as_str());
        }
    }

    #[test]
    fn test_from_config_applies_settings() {
        let config = ClientConfig {
            base_url: "http://localhost".to_string(),
            timeout_secs: 5,
            user_agent: Some("declarest-test".to_string()),
            ..ClientConfig::default()
        };
        // Builder settings are opaque; this only checks construction succeeds.
        HttpTransport::from_config(&config).unwrap();
    }
}
