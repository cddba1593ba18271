use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{DomainError, NewUser, Result, User, UserCredentials, UserId, UserRepository};
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use super::{now, storage_error, timestamp};

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId(self.id),
            username: self.username,
            email: self.email,
            created_at: self.created_at,
        }
    }

    fn into_credentials(self) -> UserCredentials {
        UserCredentials {
            user: User {
                id: UserId(self.id),
                username: self.username,
                email: self.email,
                created_at: self.created_at,
            },
            password_hash: self.password_hash,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[tracing::instrument(skip_all, fields(username = %user.username))]
    async fn create(&self, user: NewUser) -> Result<User> {
        let id = UserId::new();
        let created_at = now();

        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.as_uuid())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(timestamp(created_at))
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                if db.message().contains("users.email") {
                    DomainError::Conflict("email already registered".into())
                } else {
                    DomainError::Conflict("username already taken".into())
                }
            }
            other => storage_error(other),
        })?;

        Ok(User {
            id,
            username: user.username,
            email: user.email,
            created_at,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(UserRow::into_user))
    }

    #[tracing::instrument(skip_all)]
    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(UserRow::into_credentials))
    }
}
