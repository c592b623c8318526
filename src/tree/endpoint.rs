//! Endpoint: a leaf route bound to a path template and its methods.

use std::sync::{Arc, Weak};

use crate::dispatch;
use crate::error::Result;
use crate::handlers::{AuthHandler, ResponseHandler};
use crate::method::Method;
use crate::params::Params;
use crate::transport::{Headers, Response, Transport};
use crate::tree::node::NodeInner;

/// Shared endpoint storage. Immutable once registered.
pub(crate) struct EndpointInner {
    pub(crate) parent: Weak<NodeInner>,
    pub(crate) name: String,
    /// `/`-prefixed path template; `:name` tokens bind call parameters.
    pub(crate) path: String,
    /// Non-empty, enforced at registration. The first entry is the default
    /// dispatch method.
    pub(crate) methods: Vec<Method>,
    /// Checked in declaration order on every call.
    pub(crate) required_params: Vec<String>,
    pub(crate) headers: Option<Headers>,
    pub(crate) auth: Option<AuthHandler>,
    pub(crate) handler: Option<ResponseHandler>,
}

/// A dispatchable route on a started tree.
///
/// Cheap to clone and safe to share across threads; dispatch is stateless.
#[derive(Clone)]
pub struct Endpoint {
    inner: Arc<EndpointInner>,
    /// Pins the tree so the ancestor chain stays resolvable.
    root: Arc<NodeInner>,
}

impl Endpoint {
    pub(crate) fn from_parts(inner: Arc<EndpointInner>, root: Arc<NodeInner>) -> Self {
        Self { inner, root }
    }

    /// The name this endpoint was registered under.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The path template, always `/`-prefixed.
    pub fn path(&self) -> &str {
        &self.inner.path
    }

    /// Declared methods, in registration order.
    pub fn methods(&self) -> &[Method] {
        &self.inner.methods
    }

    /// The method used when calling the endpoint without naming one.
    pub fn default_method(&self) -> Method {
        // methods is non-empty by the registration invariant
        self.inner.methods[0]
    }

    /// Dispatch with the default (first declared) method.
    pub fn call(&self, params: Params) -> Result<Response> {
        dispatch::make_request(self, self.default_method(), params)
    }

    /// Symbolic method resolution plus dispatch: `method` is normalized
    /// case-insensitively, must be canonical, and must be declared on this
    /// endpoint.
    pub fn send(&self, method: &str, params: Params) -> Result<Response> {
        let method = Method::validate(method)?;
        dispatch::make_request(self, method, params)
    }

    pub(crate) fn inner(&self) -> &EndpointInner {
        &self.inner
    }

    /// The tree's transport, held by the root.
    pub(crate) fn transport(&self) -> Option<Arc<dyn Transport>> {
        self.root.transport.clone()
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.inner.name)
            .field("path", &self.inner.path)
            .field("methods", &self.inner.methods)
            .finish()
    }
}
