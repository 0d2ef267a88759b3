//! # Blog Shared
//!
//! Wire types shared between the API server and the client.

pub mod dto;
pub mod response;

pub use dto::{PostPayload, PostResponse};
pub use response::{AckResponse, ErrorResponse};
