//! # Rusty-Posts Binary
//!
//! The entry point that assembles the application: settings, logging, the
//! store, the adapters and finally the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::AppState;
use auth_adapters::{Argon2PasswordHasher, JwtTokenService};
use configs::{LogFormat, LogSettings, Settings};
use services::{AuthService, PostService};
use storage_adapters::{SqlitePostRepository, SqliteUserRepository};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = configs::load_dotenv();
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings.log);
    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    // 1. Store
    let pool = storage_adapters::connect(&settings.database.url, settings.database.max_connections)
        .await
        .context("opening database")?;
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let posts = Arc::new(SqlitePostRepository::new(pool));

    // 2. Auth
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let tokens = Arc::new(JwtTokenService::new(
        &settings.auth.jwt_secret,
        chrono::Duration::minutes(settings.auth.token_ttl_minutes),
    ));

    // 3. Services
    let state = AppState::new(
        PostService::new(posts, users.clone()),
        AuthService::new(users, hasher, tokens),
    );

    let addr = settings.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "rusty-posts listening");

    axum::serve(listener, api_adapters::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    tracing::info!("rusty-posts stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
