//! # auth-adapters
//!
//! Implementations of the `PasswordHasher` and `TokenService` ports.
//! Argon2 hashing is always compiled; JWT bearer tokens sit behind the
//! `auth-jwt` feature.

pub mod password;

#[cfg(feature = "auth-jwt")]
pub mod jwt;

#[cfg(feature = "auth-jwt")]
pub use jwt::JwtTokenService;
pub use password::Argon2PasswordHasher;
