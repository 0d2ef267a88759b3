//! Post store - the authoritative CRUD surface over a [`PostRepository`].
//!
//! Every operation checks its inputs in the same order: identifier shape,
//! then payload shape, then existence. Handlers pass raw path segments and
//! raw body fields straight through.

use std::sync::Arc;

use crate::domain::{Post, PostDraft, PostId, parse_post_id};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

#[derive(Clone)]
pub struct PostStore {
    repo: Arc<dyn PostRepository>,
}

impl PostStore {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.list_newest_first().await.map_err(storage)
    }

    pub async fn get(&self, raw_id: &str) -> Result<Post, DomainError> {
        let id = parse_post_id(raw_id)?;

        self.repo
            .find_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(DomainError::NotFound { id })
    }

    pub async fn create(
        &self,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Post, DomainError> {
        let draft = PostDraft::parse(title, content)?;

        let post = self.repo.insert(draft).await.map_err(storage)?;
        tracing::debug!(post_id = post.id, "Post created");
        Ok(post)
    }

    pub async fn update(
        &self,
        raw_id: &str,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Post, DomainError> {
        let id = parse_post_id(raw_id)?;
        let draft = PostDraft::parse(title, content)?;

        let post = self
            .repo
            .update(id, draft)
            .await
            .map_err(|e| not_found_or_storage(e, id))?;
        tracing::debug!(post_id = id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<PostId, DomainError> {
        let id = parse_post_id(raw_id)?;

        self.repo
            .delete(id)
            .await
            .map_err(|e| not_found_or_storage(e, id))?;
        tracing::debug!(post_id = id, "Post deleted");
        Ok(id)
    }
}

fn storage(err: RepoError) -> DomainError {
    DomainError::Storage(err.to_string())
}

fn not_found_or_storage(err: RepoError, id: PostId) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::NotFound { id },
        other => storage(other),
    }
}
