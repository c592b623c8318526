//! Node: the root client and its route groups.
//!
//! # Responsibilities
//! - Builder-phase registration (routes, groups, batch CRUD, defaults)
//! - Started-state tracking at the root, reached by walking parent links
//! - Dual-mode symbolic resolution (method shortcut vs. children lookup)

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::handlers::{AuthHandler, ResponseHandler};
use crate::method::Method;
use crate::transport::{Headers, HttpTransport, Request, Response, Transport};
use crate::tree::endpoint::{Endpoint, EndpointInner};

/// Shared node storage. Handles clone the `Arc`; the tree owns children
/// strongly and parents weakly, so no reference cycles form.
pub(crate) struct NodeInner {
    pub(crate) parent: Option<Weak<NodeInner>>,
    /// This node's fragment of the cumulative base URL.
    pub(crate) base_url: String,
    /// Set on the root only; resolved by walking up from any endpoint.
    pub(crate) transport: Option<Arc<dyn Transport>>,
    /// Authoritative on the root only.
    started: AtomicBool,
    pub(crate) state: RwLock<NodeState>,
}

pub(crate) struct NodeState {
    pub(crate) headers: Option<Headers>,
    pub(crate) auth: Option<AuthHandler>,
    pub(crate) handler: Option<ResponseHandler>,
    children: HashMap<String, Child>,
}

#[derive(Clone)]
enum Child {
    Group(Arc<NodeInner>),
    Route(Arc<EndpointInner>),
}

/// A namespace unit: the root client or a route group.
///
/// Cheap to clone; clones observe the same tree.
#[derive(Clone)]
pub struct Node {
    inner: Arc<NodeInner>,
    /// The tree root, pinned so parent back-references stay upgradeable
    /// for as long as any handle exists.
    root: Arc<NodeInner>,
}

/// Result of symbolic resolution against a [`Node`].
#[derive(Clone)]
pub enum Resolved {
    /// Unstarted tree, name was a canonical HTTP method: a bound
    /// register-with-this-method shortcut.
    Register(Registrar),
    /// Started tree, name mapped to a child group.
    Group(Node),
    /// Started tree, name mapped to an endpoint.
    Route(Endpoint),
}

/// Register-with-a-fixed-method shortcut produced by resolving a method
/// name on an unstarted node.
#[derive(Clone)]
pub struct Registrar {
    node: Node,
    method: Method,
}

impl Registrar {
    /// The method every registration through this shortcut declares.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Register `name` at `path` with the bound method.
    pub fn register(&self, name: &str, path: &str) -> Result<()> {
        self.register_with(name, path, RouteOptions::default())
    }

    /// Register with per-route options.
    pub fn register_with(&self, name: &str, path: &str, options: RouteOptions) -> Result<()> {
        self.node
            .register_parsed(name, path, vec![self.method], options)
    }
}

/// Per-route options for `register_with` and `standard_with`.
#[derive(Clone, Default)]
pub struct RouteOptions {
    pub(crate) handler: Option<ResponseHandler>,
    pub(crate) auth: Option<AuthHandler>,
    pub(crate) headers: Option<Headers>,
    pub(crate) required_params: Vec<String>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Response handler overriding anything inherited.
    pub fn handler(
        mut self,
        handler: impl Fn(Response) -> Result<Response> + Send + Sync + 'static,
    ) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Auth handler overriding anything inherited.
    pub fn auth_handler(mut self, auth: impl Fn(Request) -> Request + Send + Sync + 'static) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    /// Attach a header to the route's own header map.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.get_or_insert_with(Headers::new).insert(name, value);
        self
    }

    /// Parameters that must be present on every call, checked in the order
    /// given here.
    pub fn required_params(mut self, params: &[&str]) -> Self {
        self.required_params = params.iter().map(|p| p.to_string()).collect();
        self
    }
}

/// Options for `group_with` and the root constructor.
#[derive(Clone, Default)]
pub struct GroupOptions {
    pub(crate) handler: Option<ResponseHandler>,
    pub(crate) auth: Option<AuthHandler>,
    pub(crate) headers: Option<Headers>,
}

impl GroupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default response handler for the subtree.
    pub fn handler(
        mut self,
        handler: impl Fn(Response) -> Result<Response> + Send + Sync + 'static,
    ) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Default auth handler for the subtree.
    pub fn auth_handler(mut self, auth: impl Fn(Request) -> Request + Send + Sync + 'static) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    /// Attach a header to the node's header map.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.get_or_insert_with(Headers::new).insert(name, value);
        self
    }
}

impl Node {
    /// Create a root client for `base_url` with the bundled HTTP transport.
    pub fn root(base_url: impl Into<String>) -> Node {
        Self::with_transport(base_url, Arc::new(HttpTransport::new()))
    }

    /// Create a root client with defaults for the whole tree.
    pub fn root_with(base_url: impl Into<String>, options: GroupOptions) -> Node {
        let node = Self::root(base_url);
        {
            let mut state = node.write_state();
            state.headers = options.headers;
            state.auth = options.auth;
            state.handler = options.handler;
        }
        node
    }

    /// Create a root client issuing requests through a custom transport.
    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Node {
        let inner = Arc::new(NodeInner {
            parent: None,
            base_url: base_url.into(),
            transport: Some(transport),
            started: AtomicBool::new(false),
            state: RwLock::new(NodeState {
                headers: None,
                auth: None,
                handler: None,
                children: HashMap::new(),
            }),
        });
        Node {
            root: inner.clone(),
            inner,
        }
    }

    /// Create a root client from a validated [`ClientConfig`]: bundled
    /// transport with the configured timeout/User-Agent, root headers seeded
    /// from the config.
    pub fn from_config(config: &ClientConfig) -> Result<Node> {
        let transport = HttpTransport::from_config(config)?;
        let node = Self::with_transport(config.base_url.clone(), Arc::new(transport));
        for (name, value) in &config.headers {
            node.add_header(name.as_str(), value.as_str())?;
        }
        Ok(node)
    }

    /// Whether this node's tree has been started. The flag lives at the
    /// root; every node in the tree answers identically.
    pub fn is_started(&self) -> bool {
        self.root.started.load(Ordering::Acquire)
    }

    /// Freeze the whole tree. Callable from any node; finds the root by
    /// walking parent links and flips its flag once. Irreversible.
    pub fn start(&self) {
        if !self.root.started.swap(true, Ordering::AcqRel) {
            tracing::info!(base_url = %self.root.base_url, "client started");
        }
    }

    /// Register a route accepting the given methods. Spellings are
    /// normalized case-insensitively; anything outside the canonical set
    /// fails with [`Error::NotImplemented`].
    pub fn register(&self, name: &str, path: &str, methods: &[&str]) -> Result<()> {
        self.register_with(name, path, methods, RouteOptions::default())
    }

    /// Register a route with per-route options.
    pub fn register_with(
        &self,
        name: &str,
        path: &str,
        methods: &[&str],
        options: RouteOptions,
    ) -> Result<()> {
        // Started-guard first: on a frozen tree the misuse is structural,
        // whatever the method spellings say.
        self.ensure_building("register")?;
        let methods = methods
            .iter()
            .map(|m| Method::validate(m))
            .collect::<Result<Vec<_>>>()?;
        self.register_parsed(name, path, methods, options)
    }

    fn register_parsed(
        &self,
        name: &str,
        path: &str,
        methods: Vec<Method>,
        options: RouteOptions,
    ) -> Result<()> {
        self.ensure_building("register")?;
        if methods.is_empty() {
            return Err(Error::Usage(format!(
                "route {name:?} must declare at least one method"
            )));
        }

        let path = normalize_path(path);
        let mut state = self.write_state();
        if state.children.contains_key(name) {
            return Err(Error::Usage(format!(
                "a route or group named {name:?} already exists here"
            )));
        }

        let endpoint = Arc::new(EndpointInner {
            parent: Arc::downgrade(&self.inner),
            name: name.to_string(),
            path: path.clone(),
            methods,
            required_params: options.required_params,
            headers: options.headers,
            auth: options.auth,
            handler: options.handler,
        });
        state.children.insert(name.to_string(), Child::Route(endpoint));

        tracing::debug!(name, path = %path, "route registered");
        Ok(())
    }

    /// Create a child group whose `prefix` joins the cumulative base URL.
    pub fn group(&self, name: &str, prefix: &str) -> Result<Node> {
        self.group_with(name, prefix, GroupOptions::default())
    }

    /// Create a child group with subtree defaults.
    pub fn group_with(&self, name: &str, prefix: &str, options: GroupOptions) -> Result<Node> {
        self.ensure_building("group")?;

        let mut state = self.write_state();
        if state.children.contains_key(name) {
            return Err(Error::Usage(format!(
                "a route or group named {name:?} already exists here"
            )));
        }

        let child = Arc::new(NodeInner {
            parent: Some(Arc::downgrade(&self.inner)),
            base_url: prefix.to_string(),
            transport: None,
            started: AtomicBool::new(false),
            state: RwLock::new(NodeState {
                headers: options.headers,
                auth: options.auth,
                handler: options.handler,
                children: HashMap::new(),
            }),
        });
        state.children.insert(name.to_string(), Child::Group(child.clone()));

        tracing::debug!(name, prefix, "group registered");
        Ok(Node {
            inner: child,
            root: self.root.clone(),
        })
    }

    /// Batch-register conventional CRUD routes: `all` (GET `/`) and
    /// `create` (POST `/`), plus `get`/`overwrite`/`update`/`delete` on
    /// `/:param` when a path-parameter name is given.
    pub fn standard(&self, param: Option<&str>) -> Result<()> {
        self.standard_with(param, RouteOptions::default())
    }

    /// Batch-register CRUD routes, applying `options` to every generated
    /// route.
    pub fn standard_with(&self, param: Option<&str>, options: RouteOptions) -> Result<()> {
        self.register_parsed("all", "/", vec![Method::Get], options.clone())?;
        self.register_parsed("create", "/", vec![Method::Post], options.clone())?;

        if let Some(param) = param {
            let path = format!("/:{param}");
            self.register_parsed("get", &path, vec![Method::Get], options.clone())?;
            self.register_parsed("overwrite", &path, vec![Method::Put], options.clone())?;
            self.register_parsed("update", &path, vec![Method::Patch], options.clone())?;
            self.register_parsed("delete", &path, vec![Method::Delete], options)?;
        }
        Ok(())
    }

    /// Merge a header into this node's header map.
    pub fn add_header(&self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.ensure_building("add_header")?;
        let mut state = self.write_state();
        state.headers.get_or_insert_with(Headers::new).insert(name, value);
        Ok(())
    }

    /// Set this node's default response handler.
    pub fn set_handler(
        &self,
        handler: impl Fn(Response) -> Result<Response> + Send + Sync + 'static,
    ) -> Result<()> {
        self.ensure_building("set_handler")?;
        self.write_state().handler = Some(Arc::new(handler));
        Ok(())
    }

    /// Set this node's default auth handler.
    pub fn set_auth_handler(
        &self,
        auth: impl Fn(Request) -> Request + Send + Sync + 'static,
    ) -> Result<()> {
        self.ensure_building("set_auth_handler")?;
        self.write_state().auth = Some(Arc::new(auth));
        Ok(())
    }

    /// Symbolic resolution, the mode-dependent name contract:
    ///
    /// - unstarted: `name` must be a canonical HTTP method (any case) and
    ///   yields a bound [`Registrar`]; anything else is [`Error::Usage`]
    ///   listing the valid method names.
    /// - started: `name` is looked up in the children map and yields the
    ///   group or endpoint registered under it; unknown names are
    ///   [`Error::NotImplemented`].
    ///
    /// Builder operations are ordinary methods on this type, so before
    /// `start()` they always win over symbolic names; after `start()` only
    /// the children map is consulted, so an endpoint registered under a
    /// builder-operation name (`group`, `start`, ...) is reachable here.
    pub fn resolve(&self, name: &str) -> Result<Resolved> {
        if !self.is_started() {
            return match Method::parse(name) {
                Some(method) => Ok(Resolved::Register(Registrar {
                    node: self.clone(),
                    method,
                })),
                None => Err(Error::Usage(format!(
                    "endpoint registrations use the methods \"{}\"",
                    Method::lowercase_list()
                ))),
            };
        }

        let state = self.read_state();
        match state.children.get(name) {
            Some(Child::Group(inner)) => Ok(Resolved::Group(self.handle_for(inner.clone()))),
            Some(Child::Route(inner)) => Ok(Resolved::Route(self.endpoint_for(inner.clone()))),
            None => Err(Error::NotImplemented(format!(
                "there is no route named {name:?}"
            ))),
        }
    }

    /// Look up an endpoint on a started tree.
    pub fn endpoint(&self, name: &str) -> Result<Endpoint> {
        self.ensure_started(name)?;
        let state = self.read_state();
        match state.children.get(name) {
            Some(Child::Route(inner)) => Ok(self.endpoint_for(inner.clone())),
            Some(Child::Group(_)) => Err(Error::Usage(format!(
                "{name:?} names a group, not an endpoint"
            ))),
            None => Err(Error::NotImplemented(format!(
                "there is no route named {name:?}"
            ))),
        }
    }

    /// Look up a child group on a started tree.
    pub fn subgroup(&self, name: &str) -> Result<Node> {
        self.ensure_started(name)?;
        let state = self.read_state();
        match state.children.get(name) {
            Some(Child::Group(inner)) => Ok(self.handle_for(inner.clone())),
            Some(Child::Route(_)) => Err(Error::Usage(format!(
                "{name:?} names an endpoint, not a group"
            ))),
            None => Err(Error::NotImplemented(format!(
                "there is no route named {name:?}"
            ))),
        }
    }

    /// This node's fragment of the cumulative base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn ensure_building(&self, operation: &str) -> Result<()> {
        if self.is_started() {
            return Err(Error::Usage(format!(
                "the client is started; {operation} is a builder operation"
            )));
        }
        Ok(())
    }

    fn ensure_started(&self, name: &str) -> Result<()> {
        if !self.is_started() {
            return Err(Error::Usage(format!(
                "the client is not started; call start() before looking up {name:?}"
            )));
        }
        Ok(())
    }

    fn handle_for(&self, inner: Arc<NodeInner>) -> Node {
        Node {
            inner,
            root: self.root.clone(),
        }
    }

    fn endpoint_for(&self, inner: Arc<EndpointInner>) -> Endpoint {
        Endpoint::from_parts(inner, self.root.clone())
    }

    fn read_state(&self) -> RwLockReadGuard<'_, NodeState> {
        self.inner.state.read().expect("node state lock poisoned")
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, NodeState> {
        self.inner.state.write().expect("node state lock poisoned")
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("base_url", &self.inner.base_url)
            .field("started", &self.is_started())
            .finish()
    }
}

impl std::fmt::Debug for Registrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registrar")
            .field("method", &self.method)
            .finish()
    }
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register(registrar) => f.debug_tuple("Register").field(registrar).finish(),
            Self::Group(node) => f.debug_tuple("Group").field(node).finish(),
            Self::Route(endpoint) => f.debug_tuple("Route").field(endpoint).finish(),
        }
    }
}

// The nine per-method registration shortcuts: `client.get("health", "/__health")`
// is `register` with the single bound method.
macro_rules! method_shortcuts {
    ($($fn_name:ident => $variant:ident),+ $(,)?) => {
        impl Node {
            $(
                #[doc = concat!(
                    "Register `name` at `path` accepting only ",
                    stringify!($variant),
                    " requests."
                )]
                pub fn $fn_name(&self, name: &str, path: &str) -> Result<()> {
                    self.register_parsed(name, path, vec![Method::$variant], RouteOptions::default())
                }
            )+
        }
    };
}

method_shortcuts! {
    get => Get,
    post => Post,
    put => Put,
    patch => Patch,
    delete => Delete,
    options => Options,
    head => Head,
    connect => Connect,
    trace => Trace,
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
