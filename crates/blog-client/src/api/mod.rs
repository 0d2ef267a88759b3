//! Posts API port and its HTTP implementation.

mod http;

use async_trait::async_trait;
use blog_shared::PostPayload;

use crate::Post;
use crate::error::ClientError;

pub use http::HttpPostsApi;

/// The five remote post operations the cache relies on.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// GET /api/posts
    async fn list_posts(&self) -> Result<Vec<Post>, ClientError>;

    /// GET /api/posts/{id}
    async fn get_post(&self, id: i64) -> Result<Post, ClientError>;

    /// POST /api/posts
    async fn create_post(&self, payload: &PostPayload) -> Result<Post, ClientError>;

    /// PUT /api/posts/{id}
    async fn update_post(&self, id: i64, payload: &PostPayload) -> Result<Post, ClientError>;

    /// DELETE /api/posts/{id}
    async fn delete_post(&self, id: i64) -> Result<(), ClientError>;
}
