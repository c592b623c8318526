//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration for a client root and its bundled HTTP transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Absolute base URL every route path is appended to
    /// (e.g., "https://api.example.com").
    pub base_url: String,

    /// Request timeout in seconds for the bundled transport.
    pub timeout_secs: u64,

    /// Optional User-Agent for every request.
    pub user_agent: Option<String>,

    /// Headers seeded onto the root node; endpoints inherit them unless a
    /// nearer map shadows them.
    pub headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 30,
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}
