//! Database connection management and the SeaORM post repository.

mod connections;

#[cfg(feature = "database")]
pub mod entity;
#[cfg(feature = "database")]
mod sql_repo;

pub use connections::DatabaseConfig;

#[cfg(feature = "database")]
pub use connections::DatabaseConnections;
#[cfg(feature = "database")]
pub use sql_repo::SqlPostRepository;
