//! # configs
//!
//! Layered application settings. Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. `config/local.toml` (optional, not committed)
//! 4. environment variables prefixed with `APP_`, nested keys split by `__`
//!    (e.g. `APP_SERVER__PORT=8080`, `APP_AUTH__JWT_SECRET=...`)
//!
//! A `.env` file in the working directory can be loaded into the process
//! environment first with [`load_dotenv`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// sqlx connection URL, e.g. `sqlite://rusty_posts.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    /// HMAC key for bearer tokens. Required; there is no default.
    pub jwt_secret: SecretString,
    pub token_ttl_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    pub format: LogFormat,
}

/// Loads `./.env` into the process environment. Returns the file's path
/// when one was read, so the caller can log it once tracing is up.
pub fn load_dotenv() -> Option<PathBuf> {
    load_dotenv_from(Path::new(".env"))
}

pub fn load_dotenv_from(path: &Path) -> Option<PathBuf> {
    dotenvy::from_path(path).ok().map(|()| path.to_path_buf())
}

impl Settings {
    /// Loads the config files and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(None)
    }

    /// Same layering as [`Settings::load`], but with an explicit variable map
    /// standing in for the process environment when `vars` is set.
    pub fn from_env(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite://rusty_posts.db")?
            .set_default("database.max_connections", 5)?
            .set_default("auth.token_ttl_minutes", 60)?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.expose_secret().trim().is_empty() {
            return Err(ConfigError::Invalid("auth.jwt_secret must not be empty".into()));
        }
        if self.auth.token_ttl_minutes < 1 {
            return Err(ConfigError::Invalid(
                "auth.token_ttl_minutes must be at least 1".into(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_fill_everything_but_the_secret() {
        let settings = Settings::from_env(vars(&[("APP_AUTH__JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(settings.server.bind_addr(), "127.0.0.1:3000");
        assert_eq!(settings.database.url, "sqlite://rusty_posts.db");
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.auth.token_ttl_minutes, 60);
        assert_eq!(settings.auth.jwt_secret.expose_secret(), "s3cret");
        assert_eq!(settings.log.level, "info");
        assert_eq!(settings.log.format, LogFormat::Pretty);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::from_env(vars(&[
            ("APP_AUTH__JWT_SECRET", "s3cret"),
            ("APP_SERVER__PORT", "8080"),
            ("APP_DATABASE__URL", "sqlite::memory:"),
            ("APP_LOG__FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.url, "sqlite::memory:");
        assert_eq!(settings.log.format, LogFormat::Json);
    }

    #[test]
    fn missing_secret_fails() {
        assert!(matches!(
            Settings::from_env(vars(&[])),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn blank_secret_is_invalid() {
        assert!(matches!(
            Settings::from_env(vars(&[("APP_AUTH__JWT_SECRET", "  ")])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn dotenv_path_is_reported_only_when_read() {
        let path = std::env::temp_dir().join(format!("configs-{}.env", std::process::id()));
        std::fs::write(&path, "CONFIGS_DOTENV_MARKER=1\n").unwrap();

        assert_eq!(load_dotenv_from(&path), Some(path.clone()));
        assert_eq!(std::env::var("CONFIGS_DOTENV_MARKER").as_deref(), Ok("1"));

        std::fs::remove_file(&path).unwrap();
        assert_eq!(load_dotenv_from(&path), None);
    }

    #[test]
    fn secret_is_redacted_in_debug_output() {
        let settings = Settings::from_env(vars(&[("APP_AUTH__JWT_SECRET", "s3cret")])).unwrap();
        assert!(!format!("{settings:?}").contains("s3cret"));
    }
}
