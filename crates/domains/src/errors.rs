//! # DomainError
//!
//! Centralized error handling for Rusty-Posts.
//! Every adapter maps its own failures into one of these variants so the
//! API layer can translate them into status codes in a single place.

use thiserror::Error;

/// The primary error type for all domain and service operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Resource not found (e.g., User, Post)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty content, non-positive limit)
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or invalid caller credentials
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists (e.g., duplicate email)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persistence failure (e.g., database unreachable, constraint failure)
    #[error("storage error: {0}")]
    Storage(String),

    /// Any other infrastructure failure (hashing, token signing)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound(resource.to_string(), id.to_string())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }
}

/// A specialized Result type for Rusty-Posts logic.
pub type Result<T> = std::result::Result<T, DomainError>;
