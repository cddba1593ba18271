//! # SQLite backend
//!
//! Maps the relational model onto the `domains` models. The schema lives in
//! `migrations/` and is applied on [`connect`].

mod posts;
mod users;

pub use posts::SqlitePostRepository;
pub use users::SqliteUserRepository;

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use domains::DomainError;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens a pool for `url` and brings the schema up to date.
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never reaped.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, DomainError> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(storage_error)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = url.contains(":memory:") || url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(storage_error)?;

    MIGRATOR.run(&pool).await.map_err(|err| {
        tracing::error!(error = %err, "schema migration failed");
        DomainError::Storage(err.to_string())
    })?;

    tracing::info!(url, in_memory, "sqlite store ready");
    Ok(pool)
}

/// Log and wrap a driver failure.
pub(crate) fn storage_error(err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "database operation failed");
    DomainError::Storage(err.to_string())
}

/// Insert timestamp, truncated to what the column keeps.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so that text order matches time order.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    connect("sqlite::memory:", 1).await.unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn connect_applies_migrations() {
        let pool = memory_pool().await;
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'posts') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["posts".to_string(), "users".to_string()]);
    }

    #[test]
    fn timestamps_are_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let text = timestamp(whole);
        assert_eq!(text, "2026-01-01T12:00:00.000000Z");
        assert_eq!(timestamp(now()).len(), text.len());
    }
}
