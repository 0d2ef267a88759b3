//! # Blog Core
//!
//! The domain layer of the blog backend.
//! Post rules, the repository port and the store service live here, with no
//! infrastructure dependencies, so the client can reuse the same validation.

pub mod domain;
pub mod error;
pub mod ports;
pub mod store;

pub use error::DomainError;
pub use store::PostStore;
