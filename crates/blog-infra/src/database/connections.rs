#[cfg(feature = "database")]
use std::time::Duration;

#[cfg(feature = "database")]
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbBackend, DbConn, DbErr};

/// Configuration for the posts database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// An in-memory SQLite database lives per connection, so the pool must be a single one.
    pub fn is_sqlite_memory(&self) -> bool {
        self.url.starts_with("sqlite") && self.url.contains(":memory:")
    }

    fn pool_bounds(&self) -> (u32, u32) {
        if self.is_sqlite_memory() {
            (1, 1)
        } else {
            (self.max_connections, self.min_connections.min(self.max_connections))
        }
    }
}

/// Connection to the database holding the `posts` table.
#[cfg(feature = "database")]
pub struct DatabaseConnections {
    pub main: DbConn,
}

#[cfg(feature = "database")]
impl DatabaseConnections {
    /// Open the connection pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let (max, min) = config.pool_bounds();
        let opts = ConnectOptions::new(&config.url)
            .max_connections(max)
            .min_connections(min)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(backend = ?main.get_database_backend(), pool = max, "Database connected");

        Ok(Self { main })
    }

    /// Short name of the backend, for health reporting.
    pub fn backend_name(&self) -> &'static str {
        match self.main.get_database_backend() {
            DbBackend::Sqlite => "sqlite",
            DbBackend::Postgres => "postgres",
            DbBackend::MySql => "mysql",
        }
    }
}
