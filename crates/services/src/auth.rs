//! # AuthService
//!
//! Registration, login and bearer-token resolution. Hashing and token
//! signing live behind the `PasswordHasher` and `TokenService` ports.
//! Hashing is CPU-bound and runs on the blocking pool.

use std::sync::Arc;

use domains::{
    AccessToken, CallerIdentity, DomainError, NewUser, PasswordHasher, Result, TokenService, User,
    UserRepository,
};

use crate::validation;

/// Raw registration input as received from the client.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: AccessToken,
    pub user: User,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    #[tracing::instrument(skip_all, fields(username = %input.username))]
    pub async fn register(&self, input: Registration) -> Result<User> {
        let username = validation::username(&input.username)?;
        let email = validation::email(&input.email)?;
        validation::password(&input.password)?;

        let hasher = Arc::clone(&self.hasher);
        let password_hash = blocking(move || hasher.hash(&input.password)).await?;
        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Unknown email and wrong password fail identically.
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let email = email.trim().to_lowercase();
        let Some(credentials) = self.users.find_credentials_by_email(&email).await? else {
            tracing::warn!("login failed: unknown email");
            return Err(invalid_credentials());
        };

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let stored = credentials.password_hash.clone();
        if !blocking(move || hasher.verify(&password, &stored)).await? {
            tracing::warn!(user_id = %credentials.user.id, "login failed: wrong password");
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(&credentials.user)?;
        tracing::info!(user_id = %credentials.user.id, "login succeeded");
        Ok(LoginOutcome {
            token,
            user: credentials.user,
        })
    }

    /// Resolves a bearer token into the caller identity.
    pub fn authenticate(&self, token: &str) -> Result<CallerIdentity> {
        self.tokens.verify(token)
    }
}

fn invalid_credentials() -> DomainError {
    DomainError::unauthorized("invalid credentials")
}

/// Runs `work` on tokio's blocking pool.
async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|err| {
        tracing::error!(error = %err, "password hashing task failed");
        DomainError::Internal("password hashing task failed".into())
    })?
}
