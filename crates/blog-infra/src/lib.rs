//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - SQLite and PostgreSQL support
//! - `minimal` - No database drivers, in-memory repository only
//! - `sqlite` - SQLite via SeaORM
//! - `postgres` - PostgreSQL via SeaORM

pub mod database;
pub mod memory;

pub use database::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "database")]
pub use database::{DatabaseConnections, SqlPostRepository};
