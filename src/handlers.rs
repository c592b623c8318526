//! Response and auth handler contracts, plus stock implementations.
//!
//! # Design Decisions
//! - Handlers are plain `Fn` values shared via `Arc`, inherited down the tree
//! - The default response handler is the identity: status checking is opt-in
//! - Auth handlers mutate the outgoing request immediately before transport

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::transport::{Request, Response};

/// Transforms or inspects the raw transport response before it reaches the
/// caller. Returning an error aborts the dispatch.
pub type ResponseHandler = Arc<dyn Fn(Response) -> Result<Response> + Send + Sync>;

/// Mutates the outgoing request (typically attaching credentials) right
/// before the transport issues it.
pub type AuthHandler = Arc<dyn Fn(Request) -> Request + Send + Sync>;

/// Response handler that enforces success: non-2xx statuses become
/// [`Error::Request`], with 401/403 specialized to [`Error::RequestAuth`].
///
/// Install it where status checking is wanted:
///
/// ```
/// # use declarest::{handlers, Node};
/// let client = Node::root("http://localhost");
/// client.set_handler(handlers::check_ok).unwrap();
/// ```
pub fn check_ok(response: Response) -> Result<Response> {
    if response.is_success() {
        return Ok(response);
    }
    if matches!(response.status, 401 | 403) {
        return Err(Error::RequestAuth {
            code: response.status,
            content: response.body,
        });
    }
    Err(Error::Request {
        code: response.status,
        content: response.body,
        url: response.url,
    })
}

/// Auth handler that leaves the request untouched. Useful to explicitly
/// shadow an inherited auth handler on a subtree.
pub fn no_auth(request: Request) -> Request {
    request
}
