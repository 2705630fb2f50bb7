pub mod algorithms;
pub mod data;
pub mod extensions;
pub mod graphs;
pub mod health;
