//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be wired into the services.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{
    AccessToken, CallerIdentity, NewPost, NewUser, Post, PostSummary, User, UserCredentials,
    UserId,
};
use crate::pagination::PageWindow;

/// Persistence contract for users.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. Fails with `Conflict` on a duplicate username or email.
    async fn create(&self, user: NewUser) -> Result<User>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;
    /// Loads the stored password hash alongside the user. Login only.
    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;
}

/// Persistence contract for posts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Inserts a post; the store assigns `id` and `created_at`.
    async fn create(&self, post: NewPost) -> Result<Post>;
    /// Posts joined with their author, newest first, restricted to `window`.
    async fn list_with_authors(&self, window: PageWindow) -> Result<Vec<PostSummary>>;
    /// Count of all posts.
    async fn count(&self) -> Result<u64>;
}

/// One-way password hashing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Issues and verifies bearer tokens.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenService: Send + Sync {
    fn issue(&self, user: &User) -> Result<AccessToken>;
    /// Fails with `Unauthorized` on a malformed, forged or expired token.
    fn verify(&self, token: &str) -> Result<CallerIdentity>;
}
