//! graphserve - a lightweight graph-as-a-service server implemented in Rust
//!
//! This crate hosts graph objects in a single server process, hands out integer
//! graph ids to remote clients, ingests CSV files as vertex/edge data, and can
//! load server-local "graph creation extensions" whose functions are invoked by
//! name over the RPC boundary.

pub mod api;
pub mod config;
pub mod core;
pub mod engine;
pub mod extensions;
pub mod graph;
pub mod utils;
