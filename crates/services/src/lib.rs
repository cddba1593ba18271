//! # services
//!
//! Business operations for Rusty-Posts. Services receive their ports as
//! `Arc<dyn Trait>` at construction and never touch HTTP or SQL directly.

pub mod auth;
pub mod posts;
pub mod validation;

pub use auth::{AuthService, LoginOutcome, Registration};
pub use posts::PostService;
