//! Per-request dispatch pipeline.
//!
//! # Data Flow
//! ```text
//! Endpoint::call / Endpoint::send
//!     → pipeline.rs (validate method, required params)
//!     → binder.rs (bind :tokens, split leftovers into body/query)
//!     → inherit walk (headers, auth, handler, base URL)
//!     → Transport::issue (exactly one blocking call)
//!     → response handler (identity by default)
//! ```
//!
//! # Design Decisions
//! - Every validation failure happens before the network is touched
//! - The pipeline holds no state; concurrent dispatch needs no locks

mod binder;
mod pipeline;

pub(crate) use pipeline::make_request;
