//! # Handlers
//!
//! Coordinates the flow between HTTP requests and the services.

pub mod auth;
pub mod health;
pub mod posts;
