//! Ancestor-chain resolution of effective endpoint configuration.
//!
//! # Responsibilities
//! - Nearest-ancestor lookup for headers, auth handler, response handler
//! - Root-to-leaf concatenation of base URL fragments
//!
//! # Design Decisions
//! - Explicit iterative walks over the weak parent links, bounded by
//!   `MAX_TREE_DEPTH`; no dynamic lookup tricks
//! - An endpoint's own value always wins; absence means "ask the parent"

use std::sync::{Arc, Weak};

use crate::handlers::{AuthHandler, ResponseHandler};
use crate::transport::Headers;
use crate::tree::endpoint::EndpointInner;
use crate::tree::node::NodeInner;
use crate::tree::MAX_TREE_DEPTH;

/// Iterate over an endpoint's ancestors, leaf-side parent first.
fn ancestors(endpoint: &EndpointInner) -> impl Iterator<Item = Arc<NodeInner>> {
    let mut current = endpoint.parent.upgrade();
    std::iter::from_fn(move || {
        let node = current.take()?;
        current = node.parent.as_ref().and_then(Weak::upgrade);
        Some(node)
    })
    .take(MAX_TREE_DEPTH)
}

/// Effective header map: the endpoint's own, else the nearest ancestor's
/// non-empty setting, else an empty map.
pub(crate) fn effective_headers(endpoint: &EndpointInner) -> Headers {
    if let Some(headers) = &endpoint.headers {
        return headers.clone();
    }
    for node in ancestors(endpoint) {
        let state = node.state.read().expect("node state lock poisoned");
        if let Some(headers) = &state.headers {
            return headers.clone();
        }
    }
    Headers::new()
}

/// Effective auth handler; `None` means identity.
pub(crate) fn effective_auth(endpoint: &EndpointInner) -> Option<AuthHandler> {
    if let Some(auth) = &endpoint.auth {
        return Some(auth.clone());
    }
    for node in ancestors(endpoint) {
        let state = node.state.read().expect("node state lock poisoned");
        if let Some(auth) = &state.auth {
            return Some(auth.clone());
        }
    }
    None
}

/// Effective response handler; `None` means identity.
pub(crate) fn effective_handler(endpoint: &EndpointInner) -> Option<ResponseHandler> {
    if let Some(handler) = &endpoint.handler {
        return Some(handler.clone());
    }
    for node in ancestors(endpoint) {
        let state = node.state.read().expect("node state lock poisoned");
        if let Some(handler) = &state.handler {
            return Some(handler.clone());
        }
    }
    None
}

/// Cumulative base URL: every ancestor's fragment concatenated in
/// root-to-leaf order. The endpoint's own substituted path is appended by
/// the dispatcher.
pub(crate) fn cumulative_base_url(endpoint: &EndpointInner) -> String {
    let mut fragments: Vec<String> = ancestors(endpoint)
        .map(|node| node.base_url.clone())
        .collect();
    fragments.reverse();
    fragments.concat()
}
