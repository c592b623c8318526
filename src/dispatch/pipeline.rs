//! The ordered request pipeline behind every endpoint call.

use crate::dispatch::binder;
use crate::error::{Error, Result};
use crate::method::Method;
use crate::params::Params;
use crate::transport::{Request, Response};
use crate::tree::inherit;
use crate::tree::Endpoint;

/// Run one dispatch. Order is part of the contract:
///
/// 1. the method must be declared on the endpoint;
/// 2. required parameters are checked in declaration order;
/// 3. path tokens are bound and consumed;
/// 4. leftovers become the body (POST/PUT/PATCH) or the query string;
/// 5. headers/auth/handler/base URL resolve through the ancestor chain;
/// 6. the auth handler mutates the request, then the transport issues it;
/// 7. the response handler (identity by default) produces the result.
///
/// Steps 1-5 fail before any network traffic.
pub(crate) fn make_request(endpoint: &Endpoint, method: Method, params: Params) -> Result<Response> {
    let inner = endpoint.inner();

    if !inner.methods.contains(&method) {
        return Err(Error::NotImplemented(format!(
            "{} is not a valid method for the {} route",
            method, inner.path
        )));
    }

    for required in &inner.required_params {
        if !params.contains(required) {
            return Err(Error::ParamValidation {
                param: required.clone(),
            });
        }
    }

    let (path, params) = binder::bind_path_params(&inner.path, params)?;
    let (body, query) = binder::split_payload(method, params);

    let headers = inherit::effective_headers(inner);
    let auth = inherit::effective_auth(inner);
    let handler = inherit::effective_handler(inner);
    let base_url = inherit::cumulative_base_url(inner);

    let mut request = Request {
        method,
        url: format!("{base_url}{path}"),
        headers,
        body,
        query,
    };
    if let Some(auth) = auth {
        request = auth(request);
    }

    tracing::debug!(method = %method, url = %request.url, route = %inner.name, "dispatching request");

    let transport = endpoint
        .transport()
        .ok_or_else(|| Error::Transport("no transport configured at the tree root".to_string()))?;
    let response = transport.issue(request)?;

    match handler {
        Some(handler) => handler(response),
        None => Ok(response),
    }
}
