//! # domains
//!
//! Core models, pagination rules and port traits for Rusty-Posts.
//! Nothing in this crate performs I/O; adapters implement the ports.

pub mod errors;
pub mod models;
pub mod pagination;
pub mod ports;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use pagination::*;
pub use ports::*;
