//! Application state - shared across all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use blog_core::PostStore;
use blog_infra::InMemoryPostRepository;

use crate::config::{AppConfig, StorageConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostStore,
    /// Backend name reported by the health check.
    pub storage: &'static str,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    /// Build the application state, connecting and migrating the database if one is configured.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let state = match &config.storage {
            StorageConfig::Memory => {
                tracing::warn!("DATABASE_URL=memory - posts will not survive a restart");
                Self::in_memory(config.static_dir.clone())
            }
            StorageConfig::Database(db_config) => {
                Self::with_database(db_config, config.static_dir.clone()).await?
            }
        };

        tracing::info!(storage = state.storage, "Application state initialized");
        Ok(state)
    }

    /// State backed by the in-memory repository.
    pub fn in_memory(static_dir: PathBuf) -> Self {
        Self {
            posts: PostStore::new(Arc::new(InMemoryPostRepository::new())),
            storage: "memory",
            static_dir: Arc::new(static_dir),
        }
    }

    #[cfg(feature = "database")]
    async fn with_database(
        db_config: &blog_infra::DatabaseConfig,
        static_dir: PathBuf,
    ) -> anyhow::Result<Self> {
        use anyhow::Context;
        use blog_infra::{DatabaseConnections, SqlPostRepository};
        use migration::{Migrator, MigratorTrait};

        let connections = DatabaseConnections::init(db_config)
            .await
            .context("failed to connect to database")?;

        Migrator::up(&connections.main, None)
            .await
            .context("failed to apply migrations")?;
        tracing::info!("Database migrations applied");

        let storage = connections.backend_name();
        Ok(Self {
            posts: PostStore::new(Arc::new(SqlPostRepository::new(connections.main))),
            storage,
            static_dir: Arc::new(static_dir),
        })
    }

    #[cfg(not(feature = "database"))]
    async fn with_database(
        _db_config: &blog_infra::DatabaseConfig,
        static_dir: PathBuf,
    ) -> anyhow::Result<Self> {
        tracing::warn!("Built without database support - using in-memory repository");
        Ok(Self::in_memory(static_dir))
    }
}
