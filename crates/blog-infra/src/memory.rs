//! In-memory post repository - used when no database is configured.
//!
//! Same contract as the SQL repository, including ids that are never reused.
//! Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::domain::{Post, PostDraft, PostId};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

struct MemoryState {
    posts: BTreeMap<PostId, Post>,
    last_id: PostId,
}

pub struct InMemoryPostRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                posts: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.values().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.get(&id).cloned())
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        let (title, content) = draft.into_parts();
        let now = Utc::now();

        state.last_id += 1;
        let post = Post {
            id: state.last_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        let post = state.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        let (title, content) = draft.into_parts();

        post.title = title;
        post.content = content;
        post.updated_at = Utc::now().max(post.created_at);

        Ok(post.clone())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> PostDraft {
        PostDraft::parse(Some(title.to_string()), Some("Some post content".to_string())).unwrap()
    }

    #[tokio::test]
    async fn ids_increase_and_survive_deletes() {
        let repo = InMemoryPostRepository::new();

        let a = repo.insert(draft("First")).await.unwrap();
        let b = repo.insert(draft("Second")).await.unwrap();
        assert!(b.id > a.id);

        repo.delete(b.id).await.unwrap();
        let c = repo.insert(draft("Third")).await.unwrap();
        assert!(c.id > b.id);

        let ids: Vec<_> = repo
            .list_newest_first()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![c.id, a.id]);
    }

    #[tokio::test]
    async fn update_keeps_created_at() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(draft("First")).await.unwrap();

        let updated = repo.update(post.id, draft("Renamed")).await.unwrap();
        assert_eq!(updated.created_at, post.created_at);
        assert!(updated.updated_at >= updated.created_at);
        assert_eq!(updated.title, "Renamed");
    }

    #[tokio::test]
    async fn missing_rows_report_not_found() {
        let repo = InMemoryPostRepository::new();

        assert!(repo.find_by_id(1).await.unwrap().is_none());
        assert!(matches!(repo.update(1, draft("Nope")).await, Err(RepoError::NotFound)));
        assert!(matches!(repo.delete(1).await, Err(RepoError::NotFound)));
    }
}
