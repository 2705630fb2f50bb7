//! HTTP transport for the graph service.
//!
//! Thin JSON shims over [`GraphServiceHandler`](crate::api::handler): routing,
//! request/response structs and the error-to-status mapping live here, all
//! graph semantics live in the handler.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
