//! Hierarchical route registry.
//!
//! # Data Flow
//! ```text
//! Builder phase:
//!     Node::root(base_url)
//!         → group() / register() / standard() build the tree
//!         → start() walks to the root and freezes everything at once
//!
//! Started phase:
//!     resolve(name) / endpoint(name) / subgroup(name)
//!         → Endpoint handle
//!         → call() / send() run the dispatch pipeline
//! ```
//!
//! # Design Decisions
//! - Two explicit modes instead of runtime name interception: builder
//!   operations are ordinary methods, symbolic resolution is string lookup
//! - Children hold strong references down the tree, parents are weak
//!   back-references; every handle pins the root so the chain stays alive
//! - The started flag lives at the root only and never reverts

mod endpoint;
pub(crate) mod inherit;
mod node;

pub use endpoint::Endpoint;
pub use node::{GroupOptions, Node, Registrar, Resolved, RouteOptions};

/// Upper bound on ancestor walks. Real trees are a handful of levels deep;
/// the bound keeps a corrupted parent chain from looping forever.
pub(crate) const MAX_TREE_DEPTH: usize = 64;
