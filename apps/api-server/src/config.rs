//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use blog_infra::DatabaseConfig;

const DEFAULT_DATABASE_URL: &str = "sqlite://blog.db?mode=rwc";

/// Where posts are kept.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// `DATABASE_URL=memory` - nothing survives a restart.
    Memory,
    Database(DatabaseConfig),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
    /// Directory whose `index.html` is served for non-API paths.
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            storage: Self::storage_from_env(),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
        }
    }

    fn storage_from_env() -> StorageConfig {
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        if url.eq_ignore_ascii_case("memory") {
            return StorageConfig::Memory;
        }

        StorageConfig::Database(DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(10),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(1),
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
