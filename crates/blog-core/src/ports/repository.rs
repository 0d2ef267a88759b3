use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostId};
use crate::error::RepoError;

/// Post repository - the single `posts` table.
///
/// Implementations assign ids and timestamps themselves; callers only ever
/// hand over a validated [`PostDraft`].
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, highest id first.
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError>;

    /// Insert a new row and return it as stored.
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Overwrite title and content, refreshing `updated_at`.
    /// Returns [`RepoError::NotFound`] when no row matched.
    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, RepoError>;

    /// Hard delete. Returns [`RepoError::NotFound`] when no row matched.
    async fn delete(&self, id: PostId) -> Result<(), RepoError>;
}
