//! Declarative REST API clients.
//!
//! Describe an API as a tree of named groups and endpoints, freeze it with
//! [`Node::start`], then dispatch requests through the names:
//!
//! ```
//! use declarest::Node;
//!
//! let client = Node::root("https://todos.example.com");
//! client.get("health", "/__health").unwrap();
//!
//! let todos = client.group("todos", "/todos").unwrap();
//! todos.get("all", "/").unwrap();
//! todos.get("one", "/:id").unwrap();
//! todos.post("create", "/").unwrap();
//!
//! client.start();
//!
//! // client.endpoint("health").unwrap().call(params! {})           → GET /__health
//! // client.subgroup("todos").unwrap().endpoint("one").unwrap()
//! //     .call(params! { id = 3 })                                 → GET /todos/3
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//!  builder phase                     started phase
//!  ─────────────                     ─────────────
//!  Node::root ── group() ── Node     resolve()/endpoint()
//!      │            │                    │
//!  register()   register()            Endpoint ── call()/send()
//!      │            │                    │
//!      └── tree (children strong,       dispatch pipeline
//!          parents weak) ──────────▶    (params → path → body/query
//!                                        → inherited config → Transport)
//! ```

// Core engine
pub mod error;
pub mod method;
pub mod params;
pub mod tree;

// Collaborators and ambient concerns
pub mod config;
pub mod handlers;
pub mod transport;

mod dispatch;

pub use config::{load_config, ClientConfig, ConfigError};
pub use error::{Error, Result};
pub use handlers::{AuthHandler, ResponseHandler};
pub use method::Method;
pub use params::Params;
pub use transport::{Headers, HttpTransport, Request, Response, Transport};
pub use tree::{Endpoint, GroupOptions, Node, Registrar, Resolved, RouteOptions};
