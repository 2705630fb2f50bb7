//! Server-side graph object registry.

pub mod registry;

pub use registry::GraphRegistry;
