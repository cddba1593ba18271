//! # storage-adapters
//!
//! Persistence implementations of the `domains` repository ports.
//! Each backend sits behind its own cargo feature; SQLite is the default.

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

#[cfg(feature = "db-sqlite")]
pub use sqlite::{connect, SqlitePostRepository, SqliteUserRepository};
